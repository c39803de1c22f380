//! Integration test for resources loader generation

use sitegen_codegen_lib::expression::encode_data_source_variable;
use sitegen_codegen_lib::*;
use sitegen_ir::*;

const EXPECTED_BLOG_LOADER: &str = r#"import { loadResource, isLocalResource, type System } from "@webstudio-is/sdk";
import { sitemap } from "./$resources.sitemap.xml";
export const loadResources = async (_props: { system: System }) => {
  let ApiBase = "https://cms.test";
  const system = _props.system;
  const customFetch: typeof fetch = (input, init) => {
    if (typeof input !== "string") {
      return fetch(input, init);
    }
    if (isLocalResource(input, "sitemap.xml")) {
      const response = new Response(JSON.stringify(sitemap));
      response.headers.set("content-type", "application/json; charset=utf-8");
      return Promise.resolve(response);
    }
    return fetch(input, init);
  };
  const [
    post,
    tags,
  ] = await Promise.all([
    loadResource(customFetch, {
      id: "res-post",
      name: "Post",
      url: `${ApiBase}/posts/${system?.params?.slug}`,
      method: "get",
      headers: [
        { name: "accept", value: "application/json" },
      ],
    }),
    loadResource(customFetch, {
      id: "res-tags",
      name: "Tags",
      url: ApiBase + "/tags",
      method: "post",
      headers: [
      ],
      body: JSON?.stringify({ slug: system?.params?.slug }),
    }),
  ]);
  return {
    post,
    tags,
  } as Record<string, unknown>;
};
"#;

fn blog_fixture() -> (Page, DataSources, Resources) {
    let api = encode_data_source_variable("api-base");
    let sys = encode_data_source_variable("sys");

    let page = Page::new("blog", "/blog/:slug", "body").with_system("sys");
    let data_sources = data_sources_from(vec![
        DataSource::parameter("sys", "system"),
        DataSource::variable(
            "api-base",
            "Api Base",
            VariableValue::String("https://cms.test".into()),
        ),
        DataSource::resource("ds-post", "post", "res-post"),
        DataSource::resource("ds-tags", "tags", "res-tags"),
    ]);
    let resources = resources_from(vec![
        Resource {
            headers: vec![ResourceHeader {
                name: "accept".into(),
                value: "\"application/json\"".into(),
            }],
            ..Resource::get(
                "res-post",
                "Post",
                format!("`${{{api}}}/posts/${{{sys}.params.slug}}`"),
            )
        },
        Resource {
            id: "res-tags".into(),
            name: "Tags".into(),
            url: format!("{api} + \"/tags\""),
            method: Method::Post,
            headers: vec![],
            body: Some(format!("JSON.stringify({{ slug: {sys}.params.slug }})")),
        },
    ]);
    (page, data_sources, resources)
}

#[test]
fn test_full_loader_module() {
    let (page, data_sources, resources) = blog_fixture();
    let mut scope = loader_scope();
    let code = generate_resources_loader(&mut scope, &page, &data_sources, &resources);
    assert_eq!(code, EXPECTED_BLOG_LOADER);
    println!("✅ Loader module generated");
}

#[test]
fn test_generation_is_deterministic() {
    let (page, data_sources, resources) = blog_fixture();
    let history = [("earlier-id", "post"), ("other-id", "system")];

    let mut first = Scope::with_history(resources::LOADER_IDENTIFIERS.iter().copied(), history);
    let mut second = Scope::with_history(resources::LOADER_IDENTIFIERS.iter().copied(), history);

    let a = generate_resources_loader(&mut first, &page, &data_sources, &resources);
    let b = generate_resources_loader(&mut second, &page, &data_sources, &resources);
    assert_eq!(a, b);

    // prior assignments push the new ids onto suffixed names
    assert!(a.contains("    post_1,\n"));
    assert!(a.contains("const system_1 = _props.system;"));
}

#[test]
fn test_project_json_to_files() {
    let sys = encode_data_source_variable("sys");
    let json = serde_json::json!({
        "pages": [
            { "id": "home", "name": "Home", "path": "/", "rootInstanceId": "home-body" },
            {
                "id": "post",
                "name": "Post",
                "path": "/posts/:id",
                "rootInstanceId": "post-body",
                "systemDataSourceId": "sys"
            }
        ],
        "instances": [
            { "id": "home-body", "component": "Body", "children": [] },
            { "id": "post-body", "component": "Body", "children": [{ "type": "id", "value": "post-box" }] },
            { "id": "post-box", "component": "Box", "children": [] }
        ],
        "dataSources": [
            { "type": "parameter", "id": "sys", "name": "system", "scopeInstanceId": "post-body" },
            { "type": "resource", "id": "ds-post", "name": "post data", "resourceId": "res-post", "scopeInstanceId": "post-box" },
            { "type": "resource", "id": "ds-stale", "name": "stale", "resourceId": "res-deleted", "scopeInstanceId": "post-box" }
        ],
        "resources": [
            {
                "id": "res-post",
                "name": "Post",
                "url": format!("\"https://cms.test/posts/\" + {sys}.params.id"),
                "method": "get",
                "headers": []
            }
        ]
    });
    let project = Project::from_json(&json.to_string()).unwrap();

    let generator = ResourcesLoaderGenerator {
        options: LoaderOptions::default(),
    };
    assert_eq!(generator.language(), "typescript-resources-loader");
    let code = generator.generate(&project).unwrap();
    assert_eq!(code.files.len(), 2);

    let home = &code.files[0];
    assert_eq!(home.path, "$resources._index.ts");
    assert!(!home.content.contains("Promise.all"));

    let post = &code.files[1];
    assert_eq!(post.path, "$resources.posts.$id.ts");
    assert!(post.content.contains("    postdata,\n"));
    assert!(post.content.contains("url: \"https://cms.test/posts/\" + system?.params?.id,"));
    assert!(!post.content.contains("stale"));
    println!("✅ Project files generated");
}
