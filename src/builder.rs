use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, RouteRequest, TravelMode, Waypoint};
use crate::error::{
    not_enough_waypoints_error, transit_via_points_error, waypoint_not_found_error, Error,
};

/// Origin and destination are never removed.
pub const MIN_WAYPOINTS: usize = 2;

/// Session-owned list of stops and the active travel mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequestBuilder {
    waypoints: Vec<Waypoint>,
    travel_mode: TravelMode,
}

impl Default for RouteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRequestBuilder {
    pub fn new() -> Self {
        Self {
            waypoints: vec![Waypoint::empty(), Waypoint::empty()],
            travel_mode: TravelMode::default(),
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    #[tracing::instrument(skip(self))]
    pub fn add_waypoint(&mut self) -> Waypoint {
        let waypoint = Waypoint::empty();
        self.waypoints.push(waypoint.clone());

        waypoint
    }

    /// Returns false when the stop is unknown or only two remain.
    #[tracing::instrument(skip(self))]
    pub fn remove_waypoint(&mut self, id: Uuid) -> bool {
        if self.waypoints.len() <= MIN_WAYPOINTS {
            tracing::debug!("refusing to drop below {} waypoints", MIN_WAYPOINTS);
            return false;
        }

        let before = self.waypoints.len();
        self.waypoints.retain(|waypoint| waypoint.id != id);

        self.waypoints.len() != before
    }

    /// Replaces the address of one stop and nothing else. Whether the old
    /// position still applies is decided by whoever resolves positions.
    #[tracing::instrument(skip(self))]
    pub fn update_address(&mut self, id: Uuid, address: String) -> Result<Waypoint, Error> {
        let waypoint = self
            .waypoints
            .iter_mut()
            .find(|waypoint| waypoint.id == id)
            .ok_or_else(waypoint_not_found_error)?;

        waypoint.address = address;

        Ok(waypoint.clone())
    }

    pub fn select_travel_mode(&mut self, travel_mode: TravelMode) {
        self.travel_mode = travel_mode;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Records a position resolved downstream, as long as the stop still
    /// carries the address that was resolved.
    pub fn resolve(&mut self, id: Uuid, address: &str, coordinates: Coordinates) -> bool {
        match self
            .waypoints
            .iter_mut()
            .find(|waypoint| waypoint.id == id && waypoint.address == address)
        {
            Some(waypoint) => {
                waypoint.coordinates = coordinates;
                true
            }
            None => false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn build(&self) -> Result<RouteRequest, Error> {
        let waypoints: Vec<Waypoint> = self
            .waypoints
            .iter()
            .filter(|waypoint| waypoint.has_address())
            .cloned()
            .collect();

        if waypoints.len() < MIN_WAYPOINTS {
            return Err(not_enough_waypoints_error());
        }

        if self.travel_mode == TravelMode::Transit && waypoints.len() > MIN_WAYPOINTS {
            return Err(transit_via_points_error());
        }

        Ok(RouteRequest {
            waypoints,
            travel_mode: self.travel_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{VALIDATION, WAYPOINT_NOT_FOUND};

    fn with_addresses(addresses: &[&str]) -> RouteRequestBuilder {
        let mut builder = RouteRequestBuilder::new();
        while builder.waypoints().len() < addresses.len() {
            builder.add_waypoint();
        }

        let ids: Vec<Uuid> = builder.waypoints().iter().map(|w| w.id).collect();
        for (id, address) in ids.into_iter().zip(addresses) {
            builder.update_address(id, address.to_string()).unwrap();
        }

        builder
    }

    #[test]
    fn starts_with_origin_and_destination() {
        let builder = RouteRequestBuilder::new();

        assert_eq!(builder.waypoints().len(), 2);
        assert_eq!(builder.travel_mode(), TravelMode::Drive);
        assert!(builder.waypoints().iter().all(|w| w.coordinates.is_unresolved()));
    }

    #[test]
    fn add_appends_unique_unresolved_waypoint() {
        let mut builder = RouteRequestBuilder::new();

        let added = builder.add_waypoint();

        assert_eq!(builder.waypoints().last(), Some(&added));
        assert!(added.coordinates.is_unresolved());
        assert!(builder.waypoints()[..2].iter().all(|w| w.id != added.id));
    }

    #[test]
    fn remove_at_two_is_a_no_op() {
        let mut builder = RouteRequestBuilder::new();
        let id = builder.waypoints()[0].id;

        assert!(!builder.remove_waypoint(id));
        assert_eq!(builder.waypoints().len(), 2);
    }

    #[test]
    fn remove_above_floor_drops_only_that_waypoint() {
        let mut builder = with_addresses(&["A", "B", "C"]);
        let middle = builder.waypoints()[1].id;

        assert!(builder.remove_waypoint(middle));

        let addresses: Vec<&str> = builder.waypoints().iter().map(|w| w.address.as_str()).collect();
        assert_eq!(addresses, vec!["A", "C"]);
        let first = builder.waypoints()[0].id;
        assert!(!builder.remove_waypoint(first));
    }

    #[test]
    fn update_changes_only_the_target() {
        let mut builder = with_addresses(&["A", "B", "C"]);
        let before = builder.waypoints().to_vec();

        builder.update_address(before[1].id, "B2".into()).unwrap();

        let after = builder.waypoints();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].id, before[1].id);
        assert_eq!(after[1].address, "B2");
    }

    #[test]
    fn update_leaves_position_alone() {
        let mut builder = with_addresses(&["A", "B"]);
        let id = builder.waypoints()[0].id;
        assert!(builder.resolve(id, "A", Coordinates::new(1.0, 2.0)));

        let updated = builder.update_address(id, "Z".into()).unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.address, "Z");
        assert_eq!(updated.coordinates, Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn transit_with_via_points_fails_to_build() {
        let mut builder = with_addresses(&["A", "B", "C"]);
        builder.select_travel_mode(TravelMode::Transit);

        let err = builder.build().unwrap_err();
        assert_eq!(err.code, VALIDATION);

        let middle = builder.waypoints()[1].id;
        builder.update_address(middle, "".into()).unwrap();
        assert_eq!(builder.build().unwrap().waypoints.len(), 2);
    }

    #[test]
    fn update_unknown_waypoint_fails() {
        let mut builder = RouteRequestBuilder::new();

        let err = builder.update_address(Uuid::new_v4(), "A".into()).unwrap_err();

        assert_eq!(err.code, WAYPOINT_NOT_FOUND);
    }

    #[test]
    fn resolve_ignores_edited_address() {
        let mut builder = with_addresses(&["A", "B"]);
        let id = builder.waypoints()[0].id;

        assert!(!builder.resolve(id, "old", Coordinates::new(1.0, 1.0)));
        assert!(builder.waypoints()[0].coordinates.is_unresolved());
    }

    #[test]
    fn build_requires_two_addresses() {
        for addresses in [vec!["", ""], vec!["A", ""], vec!["  ", "B"], vec!["", "", "C"]] {
            let err = with_addresses(&addresses).build().unwrap_err();
            assert_eq!(err.code, VALIDATION, "{:?}", addresses);
        }
    }

    #[test]
    fn build_skips_blank_stops_and_keeps_order() {
        let mut builder = with_addresses(&["A", "", "B", "C"]);
        builder.select_travel_mode(TravelMode::Bicycle);

        let request = builder.build().unwrap();

        let addresses: Vec<&str> = request.waypoints.iter().map(|w| w.address.as_str()).collect();
        assert_eq!(addresses, vec!["A", "B", "C"]);
        assert_eq!(request.travel_mode, TravelMode::Bicycle);
    }

    #[test]
    fn clear_resets_session() {
        let mut builder = with_addresses(&["A", "B", "C"]);
        builder.select_travel_mode(TravelMode::Walk);

        builder.clear();

        assert_eq!(builder.waypoints().len(), 2);
        assert!(builder.waypoints().iter().all(|w| !w.has_address()));
        assert_eq!(builder.travel_mode(), TravelMode::Drive);
    }
}
