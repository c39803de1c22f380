//! Serialize a [`LoaderModule`] to TypeScript source.

use crate::ast::*;

/// Local resource served from build-time data instead of the network.
pub const SITEMAP_RESOURCE: &str = "sitemap.xml";

pub fn render_module(module: &LoaderModule) -> String {
    let mut out = String::new();
    for import in &module.imports {
        render_import(&mut out, import);
    }
    render_function(&mut out, &module.function);
    out
}

fn render_import(out: &mut String, import: &Import) {
    let specifiers: Vec<String> = import
        .specifiers
        .iter()
        .map(|s| {
            if s.type_only {
                format!("type {}", s.name)
            } else {
                s.name.clone()
            }
        })
        .collect();
    out.push_str(&format!(
        "import {{ {} }} from {};\n",
        specifiers.join(", "),
        string_literal(&import.source)
    ));
}

fn render_function(out: &mut String, function: &LoaderFunction) {
    out.push_str(&format!(
        "export const {} = async ({}: {{ system: System }}) => {{\n",
        function.name, function.props
    ));

    for binding in &function.bindings {
        match binding {
            Binding::Variable { name, value } => {
                out.push_str(&format!("  let {} = {};\n", name, value));
            }
            Binding::System { name } => {
                out.push_str(&format!("  const {} = {}.system;\n", name, function.props));
            }
        }
    }

    if let Some(fetch) = &function.fetch {
        render_parallel_fetch(out, fetch);
    }

    out.push_str("  return {\n");
    for key in &function.result {
        out.push_str(&format!("    {},\n", key));
    }
    out.push_str("  } as Record<string, unknown>;\n");
    out.push_str("};\n");
}

fn render_parallel_fetch(out: &mut String, fetch: &ParallelFetch) {
    out.push_str(&format!(
        r#"  const {fetcher}: typeof fetch = (input, init) => {{
    if (typeof input !== "string") {{
      return fetch(input, init);
    }}
    if (isLocalResource(input, {resource})) {{
      const response = new Response(JSON.stringify({sitemap}));
      response.headers.set("content-type", "application/json; charset=utf-8");
      return Promise.resolve(response);
    }}
    return fetch(input, init);
  }};
"#,
        fetcher = fetch.fetcher,
        resource = string_literal(SITEMAP_RESOURCE),
        sitemap = fetch.sitemap,
    ));

    out.push_str("  const [\n");
    for target in &fetch.targets {
        out.push_str(&format!("    {},\n", target));
    }
    out.push_str("  ] = await Promise.all([\n");
    for loader in &fetch.loaders {
        render_descriptor(out, &fetch.fetcher, loader);
    }
    out.push_str("  ]);\n");
}

fn render_descriptor(out: &mut String, fetcher: &str, loader: &ResourceDescriptor) {
    out.push_str(&format!("    loadResource({}, {{\n", fetcher));
    out.push_str(&format!("      id: {},\n", string_literal(&loader.id)));
    out.push_str(&format!("      name: {},\n", string_literal(&loader.name)));
    out.push_str(&format!("      url: {},\n", loader.url));
    out.push_str(&format!("      method: {},\n", string_literal(loader.method.as_str())));
    out.push_str("      headers: [\n");
    for header in &loader.headers {
        out.push_str(&format!(
            "        {{ name: {}, value: {} }},\n",
            string_literal(&header.name),
            header.value
        ));
    }
    out.push_str("      ],\n");
    if let Some(body) = &loader.body {
        out.push_str(&format!("      body: {},\n", body));
    }
    out.push_str("    }),\n");
}

/// JSON string literal, which is also a valid JS string literal.
fn string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegen_ir::Method;

    fn empty_function() -> LoaderFunction {
        LoaderFunction {
            name: "loadResources".into(),
            props: "_props".into(),
            bindings: vec![],
            fetch: None,
            result: vec![],
        }
    }

    #[test]
    fn render_without_fetch() {
        let module = LoaderModule {
            imports: vec![Import {
                specifiers: vec![
                    ImportSpecifier::value("loadResource"),
                    ImportSpecifier::type_only("System"),
                ],
                source: "@webstudio-is/sdk".into(),
            }],
            function: empty_function(),
        };
        assert_eq!(
            render_module(&module),
            "import { loadResource, type System } from \"@webstudio-is/sdk\";\n\
             export const loadResources = async (_props: { system: System }) => {\n  \
             return {\n  } as Record<string, unknown>;\n};\n"
        );
    }

    #[test]
    fn render_bindings() {
        let mut function = empty_function();
        function.bindings = vec![
            Binding::Variable {
                name: "limit".into(),
                value: serde_json::json!(10),
            },
            Binding::Variable {
                name: "label".into(),
                value: serde_json::json!("a \"quoted\" value"),
            },
            Binding::System {
                name: "system".into(),
            },
        ];
        let out = render_module(&LoaderModule {
            imports: vec![],
            function,
        });
        assert!(out.contains("  let limit = 10;\n"));
        assert!(out.contains("  let label = \"a \\\"quoted\\\" value\";\n"));
        assert!(out.contains("  const system = _props.system;\n"));
    }

    #[test]
    fn render_descriptor_escapes_literals_and_omits_missing_body() {
        let mut out = String::new();
        render_descriptor(
            &mut out,
            "customFetch",
            &ResourceDescriptor {
                id: "res-1".into(),
                name: "Posts \"all\"".into(),
                url: "\"https://api.test\"".into(),
                method: Method::Get,
                headers: vec![HeaderDescriptor {
                    name: "accept".into(),
                    value: "\"application/json\"".into(),
                }],
                body: None,
            },
        );
        assert_eq!(
            out,
            "    loadResource(customFetch, {\n      id: \"res-1\",\n      name: \"Posts \\\"all\\\"\",\n      url: \"https://api.test\",\n      method: \"get\",\n      headers: [\n        { name: \"accept\", value: \"application/json\" },\n      ],\n    }),\n"
        );
    }
}
