//! CLI entry point for the vehicle API client.
//!
//! Issues single requests through [`MyBmwClient`] with the same headers,
//! hooks and response logging a library user gets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mybmw_client::{CarBrand, ClientConfig, ClientOptions, MyBmwClient, Region, StaticToken};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use url::Url;

#[derive(Parser)]
#[command(name = "mybmw-client")]
#[command(about = "Talk to the connected-vehicle API", long_about = None)]
struct Cli {
    /// Account region: na, row or cn (defaults to $MYBMW_REGION, then row)
    #[arg(short, long)]
    region: Option<String>,

    /// Sub-brand reported in the x-user-agent header
    #[arg(short, long)]
    brand: Option<String>,

    /// Request miles and gallons instead of kilometres and litres
    #[arg(long, default_value_t = false)]
    imperial: bool,

    /// Directory to write every response body to
    #[arg(long)]
    log_response_path: Option<PathBuf>,

    /// Override the region's server URL
    #[arg(long)]
    base_url: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a path and print the response body
    Get {
        /// Path relative to the server URL, e.g. /eadrax-vcs/v4/vehicles
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Print the default headers that would be sent
    Headers,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mybmw_client.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mybmw_client.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Get { path } => {
            let response = match client.get(&path).await {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, path = %path, "Request failed");
                    if let Some(body) = e.body() {
                        error!(body = %String::from_utf8_lossy(body), "Error response body");
                    }
                    return Err(e.into());
                }
            };

            info!(status = %response.status(), bytes = response.bytes().len(), "Request complete");

            match response.json::<serde_json::Value>() {
                Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
                Err(_) => println!("{}", response.text()),
            }
        }
        Commands::Headers => {
            for (name, value) in client.headers() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
        }
    }

    Ok(())
}

/// Builds the client from CLI flags and the environment.
fn build_client(cli: &Cli) -> Result<MyBmwClient> {
    let region = match &cli.region {
        Some(region) => region.clone(),
        None => std::env::var("MYBMW_REGION").unwrap_or_else(|_| "row".to_string()),
    };
    let region: Region = region
        .parse()
        .with_context(|| format!("unknown region '{region}'"))?;

    let brand = cli
        .brand
        .as_deref()
        .map(|b| b.parse::<CarBrand>().with_context(|| format!("unknown brand '{b}'")))
        .transpose()?;

    let token =
        std::env::var("MYBMW_ACCESS_TOKEN").context("MYBMW_ACCESS_TOKEN must be set")?;
    let authentication = StaticToken::new(region, &token)?;

    let mut config = ClientConfig::new(Arc::new(authentication)).with_metric_units(!cli.imperial);
    if let Some(path) = &cli.log_response_path {
        info!(path = %path.display(), "Response logging enabled");
        config = config.with_log_response_path(path);
    }

    let options = ClientOptions {
        base_url: cli.base_url.clone(),
        ..Default::default()
    };

    Ok(MyBmwClient::new(config, brand, options)?)
}
