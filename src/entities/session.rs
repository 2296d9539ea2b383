use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Marker, RouteResult, TravelMode, Waypoint};

/// Everything the view layer needs to render the planning session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub waypoints: Vec<Waypoint>,
    pub travel_mode: TravelMode,
    pub planning: bool,
    pub result: Option<RouteResult>,
    pub markers: Vec<Marker>,
    pub planned_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub result: RouteResult,
    pub markers: Vec<Marker>,
}
