// Room catalog filtering.
//
// The same criteria drive both sides of the catalog: serialized as query
// parameters for the listing endpoint, and applied locally to an already
// fetched list without another round trip.

use serde::{Deserialize, Serialize};

use crate::model::{Room, RoomType};

/// Optional predicates over the room catalog. Each absent field imposes no
/// constraint; a room matches only if every present criterion holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    /// Inclusive lower price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Minimum capacity the room must offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl RoomFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no criterion is set, i.e. every room matches.
    pub fn is_empty(&self) -> bool {
        self.room_type.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.capacity.is_none()
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.room_type.map_or(true, |wanted| room.room_type == wanted)
            && self.min_price.map_or(true, |min| room.price >= min)
            && self.max_price.map_or(true, |max| room.price <= max)
            && self.capacity.map_or(true, |needed| room.capacity >= needed)
    }

    /// Lazily filters a room list, preserving the original relative order.
    /// The iterator borrows both the filter and the slice, retains no state
    /// between calls and can be recreated at will.
    pub fn apply<'a>(&'a self, rooms: &'a [Room]) -> impl Iterator<Item = &'a Room> + 'a {
        rooms.iter().filter(move |room| self.matches(room))
    }

    /// Query parameters for the listing endpoint, matching the names the
    /// backend expects. Unset criteria are omitted entirely.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(room_type) = self.room_type {
            params.push(("roomType", room_type.to_string()));
        }
        if let Some(min_price) = self.min_price {
            params.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }
        if let Some(capacity) = self.capacity {
            params.push(("capacity", capacity.to_string()));
        }
        params
    }
}
