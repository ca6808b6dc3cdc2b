//! `munchies`: browse restaurants from the terminal.
//!
//! ```bash
//! munchies list
//! munchies list --filter "Top Rated" --filter "Fast food"
//! munchies status 7450001
//! ```

mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use munchies_core::{
    ClientConfig, MunchiesApi, NetworkService, RestaurantListState, RestaurantStatusState,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(name = "munchies", version, about = "Browse restaurants and their filters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides MUNCHIES_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants, optionally narrowed by filters
    List {
        /// Filter name or id; repeat to require several
        #[arg(short, long = "filter")]
        filters: Vec<String>,
    },

    /// Show whether a restaurant is open
    Status {
        /// Restaurant id
        id: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_config(base_url: Option<String>) -> ClientConfig {
    let config = ClientConfig::from_env();
    match base_url {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.base_url);
    info!("using {}", config.base_url);
    let network = NetworkService::from_config(&config).context("building HTTP client")?;

    match cli.command {
        Commands::List { filters } => list(&network, &filters).await,
        Commands::Status { id } => status(&network, &id).await,
    }
}

async fn list(network: &impl MunchiesApi, requested: &[String]) -> anyhow::Result<ExitCode> {
    let mut state = RestaurantListState::new();
    state.load(network, network).await;

    if let Some(message) = &state.error_message {
        eprintln!("{message}");
        return Ok(ExitCode::FAILURE);
    }

    for unknown in select_requested(&mut state, requested) {
        eprintln!("unknown filter: {unknown}");
    }

    println!("{}", render::chips(&state));
    println!();
    for restaurant in state.filtered_restaurants() {
        println!("{}", render::restaurant_card(&state, restaurant));
    }
    Ok(ExitCode::SUCCESS)
}

/// Select every requested filter once, however often or in whatever spelling
/// it was named. Returns the requests that match no loaded filter.
fn select_requested<'a>(state: &mut RestaurantListState, requested: &'a [String]) -> Vec<&'a str> {
    let mut unknown = Vec::new();
    for wanted in requested {
        let Some(id) = render::resolve_filter(&state.filters, wanted).map(str::to_string) else {
            unknown.push(wanted.as_str());
            continue;
        };
        if !state.is_filter_selected(&id) {
            state.toggle_filter(&id);
        }
    }
    unknown
}

async fn status(network: &impl MunchiesApi, id: &str) -> anyhow::Result<ExitCode> {
    let mut state = RestaurantStatusState::new(id);
    state.load(network).await;

    if let Some(message) = &state.error_message {
        eprintln!("{message}");
        return Ok(ExitCode::FAILURE);
    }
    println!("{id}: {}", state.status_text().unwrap_or_default());
    Ok(ExitCode::SUCCESS)
}
