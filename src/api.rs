use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{PlannedRoute, SessionView, TravelMode, Waypoint};
use crate::error::Error;

#[async_trait]
pub trait WaypointAPI {
    async fn add_waypoint(&self) -> Result<Waypoint, Error>;
    async fn remove_waypoint(&self, id: Uuid) -> Result<SessionView, Error>;
    async fn update_waypoint(&self, id: Uuid, address: String) -> Result<Waypoint, Error>;
    async fn select_travel_mode(&self, travel_mode: TravelMode) -> Result<SessionView, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn plan_route(&self) -> Result<PlannedRoute, Error>;
    async fn find_session(&self) -> Result<SessionView, Error>;
    async fn clear_session(&self) -> Result<SessionView, Error>;
}

pub trait API: WaypointAPI + RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
