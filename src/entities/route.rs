use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Waypoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Drive,
    Walk,
    Bicycle,
    Transit,
}

impl Default for TravelMode {
    fn default() -> Self {
        TravelMode::Drive
    }
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drive => "DRIVE",
            Self::Walk => "WALK",
            Self::Bicycle => "BICYCLE",
            Self::Transit => "TRANSIT",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    Toll,
    Ferry,
}

/// A validated, ordered set of waypoints: the first is the origin, the last
/// the destination, anything in between a via-point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub waypoints: Vec<Waypoint>,
    pub travel_mode: TravelMode,
}

impl RouteRequest {
    pub fn origin(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    pub fn via_points(&self) -> &[Waypoint] {
        match self.waypoints.len() {
            0..=2 => &[],
            n => &self.waypoints[1..n - 1],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub path: Vec<Coordinates>,
    pub restrictions: BTreeSet<Restriction>,
}
