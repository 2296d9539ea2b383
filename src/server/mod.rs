pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post, put},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{routes, waypoints};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/session", get(routes::find_session))
        .route("/session/clear", post(routes::clear_session))
        .route("/routes", post(routes::plan))
        .route("/distance", get(routes::distance))
        .route("/travel_mode", put(waypoints::select_travel_mode))
        .route("/waypoints", post(waypoints::create))
        .route(
            "/waypoints/:id",
            patch(waypoints::update).delete(waypoints::remove),
        )
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(unexpected_error)
}
