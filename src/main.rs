use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use route_planner::config::Config;
use route_planner::engine::Engine;
use route_planner::error::Error;
use route_planner::external::google_maps::GoogleMaps;
use route_planner::routing::RoutingClient;
use route_planner::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_planner=info")),
        )
        .init();

    let config = Config::from_env()?;
    let provider = GoogleMaps::new(&config)?;
    let router = RoutingClient::new(Arc::new(provider));

    // planning reports "service not ready" until this succeeds
    if let Err(err) = router.initialize().await {
        tracing::error!("starting without a ready routing provider: {}", err);
    }

    let engine = Engine::new(router);

    serve(engine, config.listen_addr).await
}
