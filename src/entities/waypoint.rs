use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: Uuid,
    pub address: String,
    pub coordinates: Coordinates,
}

impl Waypoint {
    pub fn new(address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            address,
            coordinates: Coordinates::unresolved(),
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }
}
