use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, RouteResult, Waypoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    Waypoint,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: Uuid,
    pub position: Coordinates,
    pub label: String,
    pub kind: MarkerKind,
}

/// One marker per waypoint with an address. Kind follows the waypoint's index
/// in the full list, so a blank stop never shifts its neighbours' roles.
pub fn project_markers(waypoints: &[Waypoint], result: &RouteResult) -> Vec<Marker> {
    let last = waypoints.len().saturating_sub(1);

    waypoints
        .iter()
        .enumerate()
        .filter(|(_, waypoint)| waypoint.has_address())
        .map(|(index, waypoint)| {
            let kind = match index {
                0 => MarkerKind::Start,
                i if i == last => MarkerKind::End,
                _ => MarkerKind::Waypoint,
            };

            let fallback = match kind {
                MarkerKind::Start => result.path.first(),
                MarkerKind::End => result.path.last(),
                MarkerKind::Waypoint => None,
            };

            let position = match (waypoint.coordinates.is_unresolved(), fallback) {
                (true, Some(point)) => *point,
                _ => waypoint.coordinates,
            };

            Marker {
                id: waypoint.id,
                position,
                label: waypoint.address.clone(),
                kind,
            }
        })
        .collect()
}
