use super::Engine;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;

use crate::{
    api::RouteAPI,
    entities::{project_markers, Coordinates, PlannedRoute, RouteRequest, RouteResult, SessionView},
    error::{plan_superseded_error, Error},
};

impl Engine {
    /// Resolves the stops that have no position yet, then asks for the route.
    #[tracing::instrument(skip_all, fields(stops = request.waypoints.len()))]
    async fn execute(&self, mut request: RouteRequest) -> Result<(RouteRequest, RouteResult), Error> {
        let lookups = request
            .waypoints
            .iter()
            .filter(|waypoint| waypoint.coordinates.is_unresolved())
            .map(|waypoint| async move {
                let coordinates = self.router.geocode(waypoint.address.trim()).await?;
                Ok::<_, Error>((waypoint.id, coordinates))
            });

        let resolved = try_join_all(lookups).await?;

        for (id, coordinates) in resolved {
            if let Some(waypoint) = request.waypoints.iter_mut().find(|w| w.id == id) {
                waypoint.coordinates = coordinates;
            }
        }

        let result = self.router.calculate_route(&request).await?;

        Ok((request, result))
    }
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_route(&self) -> Result<PlannedRoute, Error> {
        let (request, mut snapshot, generation) = {
            let mut session = self.session.lock().await;
            let mut request = session.builder.build()?;

            // a position resolved for an address the stop no longer has is stale
            for waypoint in request.waypoints.iter_mut() {
                if session.resolved_for.get(&waypoint.id) != Some(&waypoint.address) {
                    waypoint.coordinates = Coordinates::unresolved();
                }
            }

            session.generation += 1;
            let generation = session.generation;
            session.planning = Some(generation);

            (request, session.builder.waypoints().to_vec(), generation)
        };

        let outcome = self.execute(request).await;

        let mut session = self.session.lock().await;

        if session.planning == Some(generation) {
            session.planning = None;
        }

        if session.generation != generation {
            tracing::warn!(
                "plan {} settled after plan {} started, discarding",
                generation,
                session.generation
            );
            return Err(plan_superseded_error());
        }

        let (request, result) = outcome?;

        for waypoint in &request.waypoints {
            if session
                .builder
                .resolve(waypoint.id, &waypoint.address, waypoint.coordinates)
            {
                session
                    .resolved_for
                    .insert(waypoint.id, waypoint.address.clone());
            }

            if let Some(planned) = snapshot.iter_mut().find(|w| w.id == waypoint.id) {
                planned.coordinates = waypoint.coordinates;
            }
        }

        let markers = project_markers(&snapshot, &result);

        session.result = Some(result.clone());
        session.markers = markers.clone();
        session.planned_at = Some(Utc::now());

        tracing::info!("plan {} committed with {} markers", generation, markers.len());

        Ok(PlannedRoute { result, markers })
    }

    #[tracing::instrument(skip(self))]
    async fn find_session(&self) -> Result<SessionView, Error> {
        let session = self.session.lock().await;

        Ok(session.view())
    }

    #[tracing::instrument(skip(self))]
    async fn clear_session(&self) -> Result<SessionView, Error> {
        let mut session = self.session.lock().await;
        session.reset();

        Ok(session.view())
    }
}
