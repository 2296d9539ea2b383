mod route_api;
mod waypoint_api;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::API,
    builder::RouteRequestBuilder,
    entities::{Marker, RouteResult, SessionView},
    routing::RoutingClient,
};

/// Planning session state. Only touched while holding the engine lock, and
/// the lock is never held across a provider call.
#[derive(Debug, Default)]
struct Session {
    builder: RouteRequestBuilder,
    // bumped by every plan and clear; a plan whose token is no longer the
    // latest is discarded when it settles
    generation: u64,
    planning: Option<u64>,
    // address each stop's position was resolved for
    resolved_for: HashMap<Uuid, String>,
    result: Option<RouteResult>,
    markers: Vec<Marker>,
    planned_at: Option<DateTime<Utc>>,
}

impl Session {
    fn view(&self) -> SessionView {
        SessionView {
            waypoints: self.builder.waypoints().to_vec(),
            travel_mode: self.builder.travel_mode(),
            planning: self.planning.is_some(),
            result: self.result.clone(),
            markers: self.markers.clone(),
            planned_at: self.planned_at,
        }
    }

    fn reset(&mut self) {
        self.builder.clear();
        self.generation += 1;
        self.planning = None;
        self.resolved_for.clear();
        self.result = None;
        self.markers.clear();
        self.planned_at = None;
    }
}

pub struct Engine {
    router: RoutingClient,
    session: Mutex<Session>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(router: RoutingClient) -> Self {
        Self {
            router,
            session: Mutex::new(Session::default()),
        }
    }
}

impl API for Engine {}
