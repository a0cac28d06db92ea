//! mediaprov — command-line front end for media providers.
//!
//! Reads `mediaprov.toml` (or the file named by `--config` /
//! `MEDIAPROV_CONFIG`) and prints results as JSON on stdout. Logs go to
//! stderr, filtered by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use http::HeaderMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediaprov_core::{
    create_youtube_provider, load_config, validate_config, Config, MediaEntity, MediaProvider,
    PlaybackOptions, ProviderStatus,
};

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "mediaprov.toml";

#[derive(Parser)]
#[command(name = "mediaprov", version, about = "Media provider toolkit")]
struct Cli {
    /// Configuration file
    #[arg(long, env = "MEDIAPROV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical reference for a URL or code
    Normalize {
        input: String,
    },
    /// Normalize input and fetch its metadata, printing the resulting media
    Transform {
        input: String,
    },
    /// Print the canonical URL of a reference
    Url {
        reference: String,
    },
    /// Print the embed player configuration for a reference
    Player {
        reference: String,
        /// Display format (a configured format, or "reference")
        #[arg(long, default_value = "reference")]
        format: String,
        /// Media width, used by "reference" and partial formats
        #[arg(long)]
        width: Option<u32>,
        /// Media height, used by "reference" and partial formats
        #[arg(long)]
        height: Option<u32>,
        /// Force the html5 (true) or legacy (false) embed
        #[arg(long)]
        html5: Option<bool>,
        /// Url parameter override, as name=value (repeatable)
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
        /// Inline player parameter override, as name=value (repeatable)
        #[arg(long = "player-param", value_name = "NAME=VALUE")]
        player_params: Vec<String>,
    },
    /// Print the download redirect for a reference
    Download {
        reference: String,
    },
    /// Print the provider descriptor
    Describe,
}

#[derive(Serialize)]
struct RedirectOutput {
    status: u16,
    location: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;
    validate_config(&config).context("Configuration validation failed")?;

    let provider = create_youtube_provider(&config).context("Failed to create provider")?;
    info!("Using provider: {}", provider.name());

    match cli.command {
        Commands::Normalize { input } => {
            print_json(&Value::from(provider.normalize(&input)))?;
        }
        Commands::Transform { input } => {
            let mut media = MediaEntity::with_raw_content(input);
            provider.transform(&mut media).await;
            print_json(&media)?;
            if media.provider_status == ProviderStatus::Error {
                bail!("metadata could not be fetched, media disabled");
            }
        }
        Commands::Url { reference } => {
            let media = stored_media(reference, None, None);
            print_json(&Value::from(provider.reference_url(&media)?))?;
        }
        Commands::Player {
            reference,
            format,
            width,
            height,
            html5,
            params,
            player_params,
        } => {
            let media = stored_media(reference, width, height);
            let options = PlaybackOptions {
                html5,
                allow_script_access: None,
                player_url_parameters: parse_pairs(&params)?,
                player_parameters: parse_pairs(&player_params)?,
            };
            let config = provider.playback_config(&media, &format, &options)?;
            print_json(&config)?;
        }
        Commands::Download { reference } => {
            let media = stored_media(reference, None, None);
            let response = provider.download_response(&media, HeaderMap::new())?;
            print_json(&RedirectOutput {
                status: response.status.as_u16(),
                location: response.location().map(str::to_string),
            })?;
        }
        Commands::Describe => {
            print_json(&provider.descriptor())?;
        }
    }

    Ok(())
}

fn resolve_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    if let Some(path) = explicit {
        info!("Loading configuration from {:?}", path);
        return load_config(path).with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        info!("Loading configuration from {:?}", default_path);
        return load_config(&default_path)
            .with_context(|| format!("Failed to load config from {:?}", default_path));
    }

    info!("No configuration file, using defaults");
    Ok(Config::default())
}

fn stored_media(reference: String, width: Option<u32>, height: Option<u32>) -> MediaEntity {
    let mut media = MediaEntity::new();
    media.provider_reference = Some(reference);
    media.width = width;
    media.height = height;
    media
}

/// Parse `name=value` pairs; values that are valid JSON keep their type.
fn parse_pairs(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for pair in pairs {
        let Some((name, raw)) = pair.split_once('=') else {
            bail!("expected NAME=VALUE, got '{}'", pair);
        };
        if name.is_empty() {
            bail!("empty parameter name in '{}'", pair);
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
        map.insert(name.to_string(), value);
    }
    Ok(map)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
