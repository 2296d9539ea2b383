#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use route_planner::api::{RouteAPI, WaypointAPI};
use route_planner::engine::Engine;
use route_planner::entities::{Coordinates, Restriction, RouteRequest, RouteResult};
use route_planner::error::{address_not_found_error, authorization_error, Error};
use route_planner::external::RoutingProvider;
use route_planner::routing::RoutingClient;

/// In-memory provider that counts every call it receives.
#[derive(Default)]
pub struct FakeProvider {
    pub key_valid: bool,
    pub places: HashMap<String, Coordinates>,
    pub route_error: Option<Error>,
    pub validate_calls: AtomicUsize,
    pub geocode_calls: AtomicUsize,
    pub route_calls: AtomicUsize,
    pub requests: std::sync::Mutex<Vec<RouteRequest>>,
    // when set, compute_route signals `entered` then waits for a `release`
    // permit; waiters are let through in arrival order
    pub gate: Option<(Arc<Notify>, Arc<Semaphore>)>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let places = [
            ("Paris", Coordinates::new(48.8566, 2.3522)),
            ("Lyon", Coordinates::new(45.764, 4.8357)),
            ("Marseille", Coordinates::new(43.2965, 5.3698)),
            ("Dijon", Coordinates::new(47.322, 5.0415)),
        ]
        .into_iter()
        .map(|(name, coordinates)| (name.to_string(), coordinates))
        .collect();

        Self {
            key_valid: true,
            places,
            ..Default::default()
        }
    }

    pub fn network_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
            + self.geocode_calls.load(Ordering::SeqCst)
            + self.route_calls.load(Ordering::SeqCst)
    }

    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    pub fn gated(mut self) -> (Self, Arc<Notify>, Arc<Semaphore>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Semaphore::new(0));
        self.gate = Some((entered.clone(), release.clone()));

        (self, entered, release)
    }
}

#[async_trait]
impl RoutingProvider for FakeProvider {
    async fn validate_key(&self) -> Result<(), Error> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);

        match self.key_valid {
            true => Ok(()),
            false => Err(authorization_error()),
        }
    }

    async fn geocode(&self, address: &str) -> Result<Coordinates, Error> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);

        self.places
            .get(address)
            .copied()
            .ok_or_else(address_not_found_error)
    }

    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResult, Error> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.acquire().await.unwrap().forget();
        }

        if let Some(err) = &self.route_error {
            return Err(err.clone());
        }

        Ok(RouteResult {
            distance_meters: 1000 * request.waypoints.len() as u64,
            duration_seconds: 60 * request.waypoints.len() as u64,
            path: request.waypoints.iter().map(|w| w.coordinates).collect(),
            restrictions: BTreeSet::from([Restriction::Toll]),
        })
    }
}

pub async fn ready_client(provider: Arc<FakeProvider>) -> RoutingClient {
    let client = RoutingClient::new(provider);
    client.initialize().await.unwrap();
    client
}

pub async fn ready_engine(provider: Arc<FakeProvider>) -> Engine {
    Engine::new(ready_client(provider).await)
}

/// Fills the session so it holds exactly `addresses`, in order.
pub async fn fill(engine: &Engine, addresses: &[&str]) {
    let mut session = engine.find_session().await.unwrap();
    while session.waypoints.len() < addresses.len() {
        engine.add_waypoint().await.unwrap();
        session = engine.find_session().await.unwrap();
    }

    for (waypoint, address) in session.waypoints.iter().zip(addresses) {
        engine
            .update_waypoint(waypoint.id, address.to_string())
            .await
            .unwrap();
    }
}
