//! `sitegen`: generates the per-page resources loader modules of a site.
//!
//! Usage:
//!   sitegen --project project.json generate --out app/__generated__
//!   sitegen --project project.json system --page /blog/:slug
//!
//! Settings may also come from a TOML file given with `--config`;
//! command-line flags win.

mod load;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sitegen_codegen_lib::{Codegen, LoaderOptions, ResourcesLoaderGenerator};
use sitegen_core::{ConfigOverrides, GeneratorConfig, SitegenError};
use sitegen_ir::{default_system, merge_system};
use tracing::info;

/// Site resources loader generator.
#[derive(Parser, Debug)]
#[command(name = "sitegen", about = "Generate resources loaders for site pages")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Project data JSON.
    #[arg(long = "project", short = 'p', global = true)]
    project: Option<PathBuf>,

    /// Published origin used for `system.origin`.
    #[arg(long = "origin", global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one `$resources.<route>.ts` module per page.
    Generate {
        /// Output directory.
        #[arg(long = "out", short = 'o')]
        out: Option<PathBuf>,

        /// Module to import `loadResource` and friends from.
        #[arg(long = "sdk-module")]
        sdk_module: Option<String>,

        /// Module exporting the build-time `sitemap`.
        #[arg(long = "sitemap-module")]
        sitemap_module: Option<String>,
    },

    /// Print the merged `system` object of a page as JSON.
    System {
        /// Page id or path.
        #[arg(long)]
        page: String,

        /// JSON object laid over the page default.
        #[arg(long = "override")]
        override_json: Option<String>,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            let code = err
                .downcast_ref::<SitegenError>()
                .map(SitegenError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut overrides = ConfigOverrides {
        project: cli.project,
        origin: cli.origin,
        ..Default::default()
    };
    if let Commands::Generate {
        out,
        sdk_module,
        sitemap_module,
    } = &cli.command
    {
        overrides.out_dir = out.clone();
        overrides.sdk_module = sdk_module.clone();
        overrides.sitemap_module = sitemap_module.clone();
    }
    let config = GeneratorConfig::load_or_default(cli.config.as_deref())?.apply(overrides);

    let project_path = config.require_project()?;
    info!("Loading project from {}", project_path.display());
    let project = load::load_project(project_path)?;

    match cli.command {
        Commands::Generate { .. } => {
            let generator = ResourcesLoaderGenerator {
                options: LoaderOptions::from(&config),
            };
            info!("Generating {} code...", generator.language());
            let code = generator.generate(&project)?;
            let count = load::write_files(&config.out_dir, &code)?;
            info!("Wrote {} modules to {}", count, config.out_dir.display());
        }
        Commands::System {
            page,
            override_json,
        } => {
            let page = project
                .page(&page)
                .ok_or_else(|| SitegenError::NotFound(format!("page '{}'", page)))?;
            let defaults = default_system(&config.origin, &page.path, &page.history);
            let right = override_json
                .as_deref()
                .map(load::parse_override)
                .transpose()?;
            let system = merge_system(&defaults, right.as_ref());
            println!("{}", serde_json::to_string_pretty(&system)?);
        }
    }

    Ok(())
}
