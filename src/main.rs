/// African Hub admin console - Main entry point
///
/// Command-line front end for the marketplace admin API
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hub_admin::config::{self, TOKEN_DB_FILE};
use hub_admin::storage::DEFAULT_PROFILE;
use hub_admin::{cli, AdminApi, ClientConfig, TokenStore};
use log::info;

#[derive(Parser)]
#[command(name = "hub-admin")]
#[command(about = "African Hub Marketplace admin console")]
struct Args {
    /// Admin API base URL
    #[arg(long, env = "HUB_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: String,

    /// Config directory for the token store (default: ~/.hubadmin)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows per page on list screens
    #[arg(long, default_value_t = config::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Chat polling interval in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    poll_interval_ms: u64,

    /// Token profile to use
    #[arg(long, default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Enable verbose logging (DEBUG level)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store an admin bearer token
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    #[command(flatten)]
    Screen(cli::ScreenCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logger with appropriate level based on verbose flag
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config_dir = config::resolve_config_dir(args.config.as_deref())?;
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    let db_path = config_dir.join(TOKEN_DB_FILE);
    let store = TokenStore::new(&db_path)
        .with_context(|| format!("Failed to open token store {}", db_path.display()))?;

    info!("API: {}", args.api_url);
    info!("Config directory: {}", config_dir.display());

    let screen = match args.command {
        Command::Login { token } => {
            store.save_token(&args.profile, token.trim())?;
            println!("Token saved for profile {}", args.profile);
            return Ok(());
        }
        Command::Logout => {
            if store.clear_token(&args.profile)? {
                println!("Logged out of profile {}", args.profile);
            } else {
                println!("No token stored for profile {}", args.profile);
            }
            return Ok(());
        }
        Command::Screen(screen) => screen,
    };

    let client_config = ClientConfig::with_api_url(&args.api_url)
        .context("Invalid API URL")?
        .page_size(args.page_size)
        .poll_interval_ms(args.poll_interval_ms);

    let token = store.load_token(&args.profile)?;
    if token.is_none() {
        log::warn!("No token stored; run `hub-admin login --token <TOKEN>` first");
    }
    let api = Arc::new(AdminApi::new(&client_config, token)?);

    let action = screen.action();
    if let Err(e) = cli::execute(api, &client_config, screen).await {
        eprintln!("Failed to {}: {}", action, e);
        if e.is_unauthorized() {
            eprintln!("The stored token was rejected; log in again");
        }
        std::process::exit(1);
    }

    Ok(())
}
