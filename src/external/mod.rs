pub mod google_maps;

use async_trait::async_trait;

use crate::{
    entities::{Coordinates, RouteRequest, RouteResult},
    error::Error,
};

/// Wire-level access to a routing provider. Implementations translate the
/// provider's format into [`RouteResult`] and map its failures onto the
/// crate error codes; they hold no session state.
#[async_trait]
pub trait RoutingProvider {
    async fn validate_key(&self) -> Result<(), Error>;
    async fn geocode(&self, address: &str) -> Result<Coordinates, Error>;
    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResult, Error>;
}

pub type DynProvider = std::sync::Arc<dyn RoutingProvider + Send + Sync>;
