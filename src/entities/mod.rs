mod location;
mod marker;
mod route;
mod session;
mod waypoint;

pub use location::{Coordinates, Unit};
pub use marker::{project_markers, Marker, MarkerKind};
pub use route::{Restriction, RouteRequest, RouteResult, TravelMode};
pub use session::{PlannedRoute, SessionView};
pub use waypoint::Waypoint;
