//! # blueprints
//!
//! Command-line front end: serve the `/blueprints` API, or look up, open and
//! edit blueprints against the fixture data or a remote service.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use blueprints_client::{RemoteConfig, RemoteSource};
use blueprints_core::{Blueprint, BlueprintSource};
use blueprints_server::ServerConfig;
use blueprints_settings::{BlueprintsSettings, LoggingSettings, SourceBackend};
use blueprints_store::FixtureSource;
use blueprints_telemetry::{init_telemetry, parse_level, TelemetryConfig};
use blueprints_view::Viewer;

/// Blueprint lookup, rendering and editing.
#[derive(Parser, Debug)]
#[command(name = "blueprints", about = "Blueprint lookup, rendering and editing")]
struct Cli {
    /// Use the blueprint service at this URL instead of the configured backend.
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Settings file (defaults to `~/.blueprints/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the `/blueprints` HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (0 for auto-assign).
        #[arg(long)]
        port: Option<u16>,
    },
    /// List an author's blueprints with point counts.
    Lookup { author: String },
    /// Print the draw operations for one blueprint.
    Open {
        author: String,
        name: String,
        /// Emit JSON instead of path text.
        #[arg(long)]
        json: bool,
    },
    /// Submit a new blueprint from a JSON file.
    Create { file: PathBuf },
    /// Replace a stored blueprint with the contents of a JSON file.
    Update {
        author: String,
        name: String,
        file: PathBuf,
    },
}

fn load_settings(cli: &Cli) -> Result<BlueprintsSettings> {
    let settings = match &cli.settings {
        Some(path) => blueprints_settings::load_settings_from_path(path),
        None => blueprints_settings::load_settings(),
    };
    settings.context("Failed to load settings")
}

/// Telemetry config for the logging settings; the flag is false when the
/// level name was not recognized and INFO was used instead.
fn telemetry_config(logging: &LoggingSettings) -> (TelemetryConfig, bool) {
    let level = parse_level(&logging.level);
    let config = TelemetryConfig {
        log_level: level.unwrap_or(tracing::Level::INFO),
        json: logging.json,
        ..TelemetryConfig::default()
    };
    (config, level.is_some())
}

fn init_logging(settings: &BlueprintsSettings) -> Result<()> {
    let (config, level_known) = telemetry_config(&settings.logging);
    init_telemetry(&config)?;
    if !level_known {
        tracing::warn!(level = %settings.logging.level, "unknown log level, using info");
    }
    Ok(())
}

/// Pick the backend once; everything downstream sees only the trait.
fn build_source(cli: &Cli, settings: &BlueprintsSettings) -> Result<Arc<dyn BlueprintSource>> {
    let remote_url = match (&cli.remote, settings.source.backend) {
        (Some(url), _) => Some(url.clone()),
        (None, SourceBackend::Remote) => Some(settings.source.remote_url.clone()),
        (None, SourceBackend::Fixture) => None,
    };

    let source: Arc<dyn BlueprintSource> = match remote_url {
        Some(url) => {
            let config = RemoteConfig {
                base_url: url,
                connect_timeout: Duration::from_millis(settings.source.connect_timeout_ms),
                request_timeout: Duration::from_millis(settings.source.request_timeout_ms),
            };
            Arc::new(RemoteSource::new(config)?)
        }
        None => Arc::new(FixtureSource::seeded()),
    };
    tracing::debug!(source = source.name(), "blueprint source selected");
    Ok(source)
}

fn read_blueprint(path: &Path) -> Result<Blueprint> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid blueprint JSON in {}", path.display()))
}

async fn serve(
    source: Arc<dyn BlueprintSource>,
    settings: &BlueprintsSettings,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = ServerConfig {
        host: host.unwrap_or_else(|| settings.server.host.clone()),
        port: port.unwrap_or(settings.server.port),
        filter: settings.filter,
    };
    let handle = blueprints_server::start(config, source)
        .await
        .context("Failed to start server")?;

    println!("listening on port {}", handle.port);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl+c")?;

    tracing::info!("Shutting down");
    handle.shutdown().await;
    Ok(())
}

async fn run(cli: Cli, settings: BlueprintsSettings) -> Result<()> {
    let source = build_source(&cli, &settings)?;
    let mut viewer = Viewer::new(Arc::clone(&source));

    match cli.command {
        Command::Serve { host, port } => serve(source, &settings, host, port).await?,
        Command::Lookup { author } => {
            let view = viewer.lookup_author(&author).await?;
            if view.is_empty() {
                println!("no blueprints for {}", view.author());
            }
            for row in view.summaries() {
                println!("{:<24} {:>6}", row.name, row.point_count);
            }
            println!("{:<24} {:>6}", "total", view.total_points());
        }
        Command::Open { author, name, json } => {
            let ops = viewer.open_blueprint(&author, &name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ops)?);
            } else {
                for op in &ops {
                    println!("{op}");
                }
            }
        }
        Command::Create { file } => {
            let stored = viewer.create(read_blueprint(&file)?).await?;
            println!("created {} ({} points)", stored.key(), stored.point_count());
        }
        Command::Update { author, name, file } => {
            let stored = viewer.update(&author, &name, read_blueprint(&file)?).await?;
            println!("updated {} ({} points)", stored.key(), stored.point_count());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    init_logging(&settings)?;
    run(cli, settings).await
}
