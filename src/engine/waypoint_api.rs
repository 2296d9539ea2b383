use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::WaypointAPI,
    entities::{SessionView, TravelMode, Waypoint},
    error::Error,
};

#[async_trait]
impl WaypointAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn add_waypoint(&self) -> Result<Waypoint, Error> {
        let mut session = self.session.lock().await;

        Ok(session.builder.add_waypoint())
    }

    #[tracing::instrument(skip(self))]
    async fn remove_waypoint(&self, id: Uuid) -> Result<SessionView, Error> {
        let mut session = self.session.lock().await;

        if !session.builder.remove_waypoint(id) {
            tracing::info!("waypoint {} kept", id);
        }

        Ok(session.view())
    }

    #[tracing::instrument(skip(self))]
    async fn update_waypoint(&self, id: Uuid, address: String) -> Result<Waypoint, Error> {
        let mut session = self.session.lock().await;

        session.builder.update_address(id, address)
    }

    #[tracing::instrument(skip(self))]
    async fn select_travel_mode(&self, travel_mode: TravelMode) -> Result<SessionView, Error> {
        let mut session = self.session.lock().await;
        session.builder.select_travel_mode(travel_mode);

        Ok(session.view())
    }
}
