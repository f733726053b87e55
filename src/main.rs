//! OK Devs CLI
//!
//! Command-line tooling for the site shell:
//! - Resolve addresses to views
//! - Render a view headlessly from a site directory or a deployed site
//! - List views and dump the static data tables
//! - Serve a local preview
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use okdevs::config::{generate_default_config, Config, LoggingConfig};
use okdevs::data::SiteData;
use okdevs::host::{DirSource, FragmentSource, HttpSource, MemoryDom, MemoryHistory};
use okdevs::router::{
    encode_address, resolve_location, BasePath, Location, RenderOutcome, Router, RouterSettings,
    DEFAULT_VIEWS,
};
use okdevs::server::{self, PreviewConfig};
use okdevs::views::InitializerMap;

#[derive(Parser)]
#[command(name = "okdevs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "View router and tooling for the OK Devs site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DataTable {
    Projects,
    Solutions,
    Milestones,
    Posts,
    All,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which view an address resolves to
    Resolve {
        /// Address, e.g. "/OK-DEVS/#blog-building-in-the-open"
        address: String,
    },

    /// Render the view for an address and print the resulting markup
    Render {
        /// Address, or a full URL with --remote
        address: String,
        /// Site directory (default: site.root_dir)
        #[arg(long, conflicts_with = "remote")]
        site: Option<PathBuf>,
        /// Fetch fragments from the deployed site at ADDRESS
        #[arg(long)]
        remote: bool,
    },

    /// List registered views
    Views,

    /// Dump the static data tables as JSON
    Data {
        #[arg(value_enum, default_value = "all")]
        table: DataTable,
    },

    /// Serve a site directory for local preview
    Serve {
        /// Site directory (default: site.root_dir)
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// Base path to mount the site under
        #[arg(long)]
        base: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Resolve { address } => {
            let location = Location::from_address(&address, "/");
            let settings = config.router_settings(&location.pathname)?;
            print_resolution(&settings, &location, cli.format);
        }

        Commands::Render {
            address,
            site,
            remote,
        } => {
            if remote {
                let url = reqwest::Url::parse(&address)
                    .with_context(|| format!("invalid URL {}", address))?;
                let location = Location::new(url.path(), url.fragment().unwrap_or_default());
                let settings = config.router_settings(&location.pathname)?;
                let source = HttpSource::new(&address)?;
                render(settings, source, location, cli.format).await?;
            } else {
                let location = Location::from_address(&address, "/");
                let settings = config.router_settings(&location.pathname)?;
                let root = site.unwrap_or_else(|| PathBuf::from(&config.site.root_dir));
                let source = DirSource::new(root, settings.base_path.clone());
                render(settings, source, location, cli.format).await?;
            }
        }

        Commands::Views => {
            let settings = config.router_settings("/")?;
            let rows: Vec<_> = settings
                .registry
                .views()
                .map(|(view, path)| (view, path, settings.labels.label(view)))
                .collect();

            match cli.format {
                OutputFormat::Json => {
                    let rows: Vec<_> = rows
                        .iter()
                        .map(|(view, path, label)| {
                            json!({ "view": view, "fragment": path, "label": label })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Text => {
                    println!("{:<12} {:<26} LABEL", "VIEW", "FRAGMENT");
                    for (view, path, label) in rows {
                        println!("{:<12} {:<26} {}", view.as_str(), path, label);
                    }
                }
            }
        }

        Commands::Data { table } => {
            let data = SiteData::site();
            let value = match table {
                DataTable::Projects => serde_json::to_value(data.projects)?,
                DataTable::Solutions => serde_json::to_value(data.solutions)?,
                DataTable::Milestones => serde_json::to_value(data.milestones)?,
                DataTable::Posts => serde_json::to_value(data.posts)?,
                DataTable::All => serde_json::to_value(data)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Serve {
            root,
            host,
            port,
            base,
        } => {
            let base_path = base
                .or_else(|| config.site.base_path.clone())
                .map(|base| BasePath::new(&base))
                .unwrap_or_default();
            let preview = PreviewConfig {
                root: root.unwrap_or_else(|| PathBuf::from(&config.site.root_dir)),
                base_path,
                host: host.unwrap_or(config.server.host),
                port: port.unwrap_or(config.server.port),
            };
            server::serve(&preview).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr (or the configured file) so stdout stays parseable
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("okdevs={},tower_http=info", config.level)));

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }
    Ok(())
}

fn print_resolution(settings: &RouterSettings, location: &Location, format: OutputFormat) {
    let request = resolve_location(location, &settings.base_path, &settings.registry);
    let fragment = settings
        .base_path
        .join(settings.registry.fragment_path(&request.view).unwrap_or_default());
    let canonical = encode_address(&request.view, request.param(), &settings.base_path);

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "view": request.view,
                "param": request.param,
                "base_path": settings.base_path.as_str(),
                "fragment": fragment,
                "address": canonical,
            })
        ),
        OutputFormat::Text => {
            println!("view:      {}", request.view);
            if let Some(param) = request.param() {
                println!("param:     {}", param);
            }
            println!("base path: {}", settings.base_path);
            println!("fragment:  {}", fragment);
            println!("address:   {}", canonical);
        }
    }
}

async fn render<S: FragmentSource>(
    settings: RouterSettings,
    source: S,
    location: Location,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let dom = MemoryDom::for_layout(&settings.layout).with_nav_items(DEFAULT_VIEWS.iter().copied());
    let history = MemoryHistory::new(location);
    let router = Router::new(settings, source, dom, history)
        .with_initializers(InitializerMap::site_default(SiteData::site()));

    let outcome = router.handle_route().await;
    let container = &router.layout().container_id;
    let html = router.dom().inner_html(container).unwrap_or_default();
    let slots: Vec<(String, String)> = router
        .dom()
        .children(container)
        .into_iter()
        .filter_map(|id| {
            let inner = router.dom().inner_html(&id)?;
            (!inner.is_empty()).then_some((id, inner))
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let mut value = outcome_json(&outcome);
            value["html"] = json!(html);
            value["slots"] = json!(slots
                .iter()
                .map(|(id, inner)| (id.clone(), json!(inner)))
                .collect::<serde_json::Map<_, _>>());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("<!-- {} -->", outcome_summary(&outcome));
            println!("{}", html);
            for (id, inner) in &slots {
                println!("<!-- #{} -->", id);
                println!("{}", inner);
            }
        }
    }

    if let RenderOutcome::Failed { error, .. } = outcome {
        bail!(error);
    }
    Ok(())
}

fn outcome_summary(outcome: &RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Rendered { view } => format!("rendered {}", view),
        RenderOutcome::FellBack { requested, error } => {
            format!("{} unavailable ({}), rendered 404", requested, error)
        }
        RenderOutcome::Failed { view, error } => format!("failed to render {}: {}", view, error),
        RenderOutcome::Superseded { view } => format!("{} superseded", view),
        RenderOutcome::Skipped { view } => format!("no container for {}", view),
    }
}

fn outcome_json(outcome: &RenderOutcome) -> serde_json::Value {
    match outcome {
        RenderOutcome::Rendered { view } => json!({ "status": "rendered", "view": view }),
        RenderOutcome::FellBack { requested, error } => json!({
            "status": "fell_back",
            "view": requested,
            "error": error.to_string(),
        }),
        RenderOutcome::Failed { view, error } => json!({
            "status": "failed",
            "view": view,
            "error": error.to_string(),
        }),
        RenderOutcome::Superseded { view } => json!({ "status": "superseded", "view": view }),
        RenderOutcome::Skipped { view } => json!({ "status": "skipped", "view": view }),
    }
}
