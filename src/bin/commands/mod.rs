pub mod utils;

use clap::Subcommand;
use lastfm_api::LastFmApi;
use utils::{parse_params, print_last_call, print_payload};

#[derive(Subcommand)]
pub enum Commands {
    /// Call a web service method
    ///
    /// Usage examples:
    /// # Search for an album
    /// lastfm-api call album search album=Believe
    ///
    /// # Love a track (needs LASTFM_AUTH_TOKEN and LASTFM_SESSION_KEY)
    /// lastfm-api call track love track=Believe artist=Cher
    Call {
        /// Entity name, e.g. album, artist, track, user
        entity: String,

        /// Method name, e.g. search, getInfo, addTags
        method: String,

        /// Call parameters as key=value pairs
        params: Vec<String>,
    },

    /// List the methods an entity supports
    Methods {
        /// Entity name
        entity: String,

        /// Only methods that require authentication
        #[arg(long, conflicts_with = "no_auth")]
        auth: bool,

        /// Only methods that don't require authentication
        #[arg(long)]
        no_auth: bool,
    },

    /// Print the page where users grant this application access
    LoginUrl,

    /// Exchange an auth token for a session key
    Session {
        /// The 32 character token passed to the auth callback
        token: String,

        /// Session method to use instead of auth.getSession
        #[arg(long)]
        method: Option<String>,
    },
}

pub async fn execute_command(
    command: Commands,
    client: &mut dyn LastFmApi,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Call {
            entity,
            method,
            params,
        } => {
            let params = parse_params(&params)?;
            let result = client.call(&entity, &method, params).await;
            if verbose {
                print_last_call(client.last_call().as_ref());
            }
            print_payload(result?.as_ref())?;
        }
        Commands::Methods {
            entity,
            auth,
            no_auth,
        } => {
            let filter = match (auth, no_auth) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            for method in client.api_methods(&entity, filter)? {
                println!("{method}");
            }
        }
        Commands::LoginUrl => {
            println!("{}", client.login_url());
        }
        Commands::Session { token, method } => {
            if let Some(method) = method {
                client.set_session_method(&method)?;
            }
            client.set_auth_token(&token)?;
            let key = client.fetch_session().await;
            if verbose {
                print_last_call(client.last_call().as_ref());
            }
            println!("✅ Session key: {}", key?);
            println!("   Export it as LASTFM_SESSION_KEY for authenticated calls");
        }
    }

    Ok(())
}
