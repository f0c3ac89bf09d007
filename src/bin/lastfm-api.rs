mod commands;

use clap::Parser;
use commands::{execute_command, utils::restore_session, Commands};
use lastfm_api::{LastFmClient, LastFmConfig};

/// Last.fm web service client
#[derive(Parser)]
#[command(
    name = "lastfm-api",
    about = "Call Last.fm web service methods from the command line",
    long_about = None
)]
struct Cli {
    /// Show debug logging and the trace of the last call
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Get credentials from environment
    let config = match LastFmConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables:");
            eprintln!("  LASTFM_API_KEY=your_api_key");
            eprintln!("  LASTFM_API_SECRET=your_api_secret");
            eprintln!();
            eprintln!("Authenticated calls also need:");
            eprintln!("  LASTFM_AUTH_TOKEN=token_from_the_auth_callback");
            eprintln!("  LASTFM_SESSION_KEY=key_from_auth_getSession");
            std::process::exit(1);
        }
    };

    let http_client = http_client::native::NativeClient::new();
    let mut client = match LastFmClient::new(Box::new(http_client), config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to create client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = restore_session(&mut client) {
        eprintln!("❌ Invalid session settings: {e}");
        std::process::exit(1);
    }

    if let Err(e) = execute_command(args.command, &mut client, args.verbose).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
