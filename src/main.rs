//! Pokédex CLI - browse, search and inspect the creature catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pokedex::aggregate::creature_detail;
use pokedex::mcp_interface::{self, CatalogSession};
use pokedex::{listing, CatalogConfig, CatalogResult, CreatureKey, DetailTab, HeightStyle, Route};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pokédex catalog client
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse, search and inspect the Pokédex catalog")]
#[command(version)]
struct Args {
    /// Configuration file path (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PokeAPI base URL
    #[arg(long, env = "POKEDEX_API_URL")]
    api_url: Option<String>,

    /// Catalog search endpoint base URL
    #[arg(long, env = "POKEDEX_SEARCH_URL")]
    search_url: Option<String>,

    /// Height label style
    #[arg(long)]
    height_style: Option<HeightStyle>,

    /// Skip the publish delay on listing pages
    #[arg(long)]
    no_delay: bool,

    /// Print view models as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of the catalog
    Browse {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search by id or name
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one creature
    Show {
        /// Id or name
        key: String,
        #[arg(short, long, default_value = "about")]
        tab: DetailTab,
    },
    /// Open a route such as /pokemon/25
    Open { route: String },
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_config(args: &Args) -> CatalogResult<CatalogConfig> {
    let mut config = CatalogConfig::load(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(url) = &args.search_url {
        config.search_base_url = url.clone();
    }
    if let Some(style) = args.height_style {
        config.height_style = style;
    }
    if args.no_delay {
        config.publish_delay_ms = 0;
    }
    Ok(config.validate()?)
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_json(session: &CatalogSession, command: &Command) -> ExitCode {
    let source = session.source.as_ref();
    match command {
        Command::Browse { page } => {
            print_json(&listing::browse(source, (*page).max(1), &session.config).await)
        }
        Command::Search { query, page } => {
            print_json(&listing::search(source, query, (*page).max(1), &session.config).await)
        }
        Command::Show { key, .. } => {
            let key = CreatureKey::from(key.as_str());
            print_json(&creature_detail(source, &key, &session.config).await)
        }
        Command::Open { route } => match mcp_interface::parse_route(route) {
            Ok(Route::Listing) => print_json(&listing::browse(source, 1, &session.config).await),
            Ok(Route::Creature(key)) => {
                print_json(&creature_detail(source, &key, &session.config).await)
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run_text(session: &CatalogSession, command: &Command) -> ExitCode {
    let text = match command {
        Command::Browse { page } => mcp_interface::browse_catalog(session, *page).await,
        Command::Search { query, page } => {
            mcp_interface::search_catalog(session, query, *page).await
        }
        Command::Show { key, tab } => {
            let key = CreatureKey::from(key.as_str());
            mcp_interface::show_creature(session, &key, Some(*tab)).await
        }
        Command::Open { route } => mcp_interface::open_route(session, route).await,
    };
    println!("{}", text.trim_end());
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = match CatalogSession::with_http(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start catalog client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.json {
        run_json(&session, &args.command).await
    } else {
        run_text(&session, &args.command).await
    }
}
