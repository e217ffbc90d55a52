use std::env;

use tracing_subscriber::EnvFilter;

// Gateway and request traces at info, dependencies at warn
pub const DEFAULT_FILTER: &str = "warn,party_game_gateway=info,tower_http=info";

// RUST_LOG wins when set and non-blank
pub fn env_filter(rust_log: Option<&str>) -> Result<EnvFilter, anyhow::Error> {
    let directives = rust_log
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_FILTER);
    Ok(EnvFilter::try_new(directives)?)
}

// Called once from main; LOG_FORMAT=json switches to one JSON object per line
pub fn configure_logging() -> Result<(), anyhow::Error> {
    let filter = env_filter(env::var("RUST_LOG").ok().as_deref())?;
    let json = env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(!json)
        .with_writer(std::io::stdout);

    let result = if json {
        subscriber.json().try_init()
    } else {
        subscriber.compact().try_init()
    };

    result.map_err(|e| anyhow::anyhow!("gateway logging already set up: {e}"))
}
