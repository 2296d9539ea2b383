use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    entities::{Coordinates, RouteRequest, RouteResult, TravelMode, Unit},
    error::{
        invalid_coordinates_error, not_enough_waypoints_error, service_not_ready_error,
        transit_via_points_error, Error,
    },
    external::DynProvider,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Uninitialized,
    Ready,
    InitializationFailed,
}

/// Front door to the routing provider. The only state it keeps is whether
/// the provider credentials have been validated.
pub struct RoutingClient {
    provider: DynProvider,
    readiness: RwLock<Readiness>,
}

impl RoutingClient {
    pub fn new(provider: DynProvider) -> Self {
        Self {
            provider,
            readiness: RwLock::new(Readiness::Uninitialized),
        }
    }

    pub async fn readiness(&self) -> Readiness {
        *self.readiness.read().await
    }

    /// Validates the provider credentials. Calling it again retries the
    /// validation and replaces the previous outcome.
    #[tracing::instrument(name = "RoutingClient::initialize", skip_all)]
    pub async fn initialize(&self) -> Result<(), Error> {
        let outcome = self.provider.validate_key().await;

        let mut readiness = self.readiness.write().await;
        *readiness = match outcome {
            Ok(()) => Readiness::Ready,
            Err(_) => Readiness::InitializationFailed,
        };

        match &outcome {
            Ok(()) => tracing::info!("routing provider ready"),
            Err(err) => tracing::error!("routing provider initialization failed: {}", err),
        }

        outcome
    }

    async fn ensure_ready(&self) -> Result<(), Error> {
        match self.readiness().await {
            Readiness::Ready => Ok(()),
            state => {
                tracing::warn!("routing provider used while {:?}", state);
                Err(service_not_ready_error())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, Error> {
        self.ensure_ready().await?;

        self.provider.geocode(address).await
    }

    #[tracing::instrument(skip_all, fields(stops = request.waypoints.len()))]
    pub async fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResult, Error> {
        self.ensure_ready().await?;

        if request.waypoints.len() < 2 {
            return Err(not_enough_waypoints_error());
        }

        if request
            .waypoints
            .iter()
            .any(|waypoint| waypoint.coordinates.is_unresolved() || !waypoint.coordinates.is_valid())
        {
            return Err(invalid_coordinates_error());
        }

        if request.travel_mode == TravelMode::Transit && !request.via_points().is_empty() {
            return Err(transit_via_points_error());
        }

        let result = self
            .provider
            .compute_route(request)
            .await
            .map_err(|err| {
                if err.is_upstream() {
                    tracing::warn!("routing provider call failed: {}", err);
                }
                err
            })?;

        tracing::info!(
            "route computed: {} m, {} s, {} path points",
            result.distance_meters,
            result.duration_seconds,
            result.path.len()
        );

        Ok(result)
    }

    /// Great-circle distance; needs neither initialization nor network.
    pub fn distance(from: &Coordinates, to: &Coordinates, unit: Unit) -> f64 {
        from.distance_to(to, unit)
    }
}
