use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use party_game_gateway::app::{self, build_state, cors_layer, router};
use party_game_gateway::config::Args;
use party_game_gateway::telemetry::configure_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv::dotenv().ok();
    configure_logging()?;

    // parse cli arguments (env vars as fallback)
    let args = Args::parse();

    let state = Arc::new(build_state(&args)?);

    tokio::spawn(app::housekeeping(Arc::clone(&state), Duration::from_secs(60)));

    let app = router(state, cors_layer(args.origins()));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Model: {}", args.gemini_model);
    info!("Cache TTL: {} seconds, capacity {}", args.cache_ttl, args.cache_capacity);
    info!("Rate limit: {} per endpoint per client", args.rate_limit);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
