use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::DynAPI,
    entities::{SessionView, TravelMode, Waypoint},
    error::Error,
};

#[derive(Serialize, Deserialize)]
pub struct UpdateParams {
    pub address: String,
}

#[derive(Serialize, Deserialize)]
pub struct TravelModeParams {
    pub travel_mode: TravelMode,
}

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<Waypoint>, Error> {
    let waypoint = api.add_waypoint().await?;

    Ok(waypoint.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateParams>,
) -> Result<Json<Waypoint>, Error> {
    let waypoint = api.update_waypoint(id, params.address).await?;

    Ok(waypoint.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, Error> {
    let session = api.remove_waypoint(id).await?;

    Ok(session.into())
}

pub async fn select_travel_mode(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<TravelModeParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api.select_travel_mode(params.travel_mode).await?;

    Ok(session.into())
}
