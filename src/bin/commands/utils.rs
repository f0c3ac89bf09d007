use lastfm_api::{LastCall, LastFmClient, Params};
use serde_json::Value;
use std::env;

/// Apply `LASTFM_AUTH_TOKEN` and `LASTFM_SESSION_KEY` from the environment
pub fn restore_session(client: &mut LastFmClient) -> lastfm_api::Result<()> {
    if let Ok(token) = env::var("LASTFM_AUTH_TOKEN") {
        client.set_auth_token(&token)?;
    }
    if let Ok(key) = env::var("LASTFM_SESSION_KEY") {
        client.set_session_key(&key)?;
    }
    Ok(())
}

/// Parse `key=value` arguments into call parameters
pub fn parse_params(args: &[String]) -> Result<Params, String> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| format!("Expected key=value, got '{arg}'"))
        })
        .collect()
}

pub fn print_payload(payload: Option<&Value>) -> Result<(), serde_json::Error> {
    match payload {
        Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
        None => println!("(empty response)"),
    }
    Ok(())
}

pub fn print_last_call(last_call: Option<&LastCall>) {
    let Some(call) = last_call else {
        return;
    };
    println!("🔍 {}", call.short_description());
    println!("   uri: {}", call.uri);
    for (key, value) in &call.data {
        println!("   {key} = {value}");
    }
}
