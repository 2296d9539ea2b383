use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::{
    api::DynAPI,
    entities::{Coordinates, PlannedRoute, SessionView, Unit},
    error::{invalid_coordinates_error, Error},
    routing::RoutingClient,
};

#[derive(Serialize, Deserialize)]
pub struct DistanceParams {
    pub from_lat: f64,
    pub from_lng: f64,
    pub to_lat: f64,
    pub to_lng: f64,
    #[serde(default)]
    pub unit: Unit,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Distance {
    pub distance: f64,
    pub unit: Unit,
}

pub async fn plan(Extension(api): Extension<DynAPI>) -> Result<Json<PlannedRoute>, Error> {
    let planned = api.plan_route().await?;

    Ok(planned.into())
}

pub async fn find_session(Extension(api): Extension<DynAPI>) -> Result<Json<SessionView>, Error> {
    let session = api.find_session().await?;

    Ok(session.into())
}

pub async fn clear_session(Extension(api): Extension<DynAPI>) -> Result<Json<SessionView>, Error> {
    let session = api.clear_session().await?;

    Ok(session.into())
}

pub async fn distance(Query(params): Query<DistanceParams>) -> Result<Json<Distance>, Error> {
    let from = Coordinates::new(params.from_lat, params.from_lng);
    let to = Coordinates::new(params.to_lat, params.to_lng);

    if !from.is_valid() || !to.is_valid() {
        return Err(invalid_coordinates_error());
    }

    Ok(Distance {
        distance: RoutingClient::distance(&from, &to, params.unit),
        unit: params.unit,
    }
    .into())
}
