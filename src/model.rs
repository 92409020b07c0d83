// Domain model shared by the catalog, booking and admin surfaces.
// All wire types mirror the backend JSON, which uses Mongo-style `_id`
// identifiers and camelCase field names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
            RoomType::Deluxe => "deluxe",
        };
        write!(f, "{}", label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown room type: {0}")]
pub struct UnknownRoomType(pub String);

impl FromStr for RoomType {
    type Err = UnknownRoomType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(RoomType::Single),
            "double" => Ok(RoomType::Double),
            "suite" => Ok(RoomType::Suite),
            "deluxe" => Ok(RoomType::Deluxe),
            other => Err(UnknownRoomType(other.to_string())),
        }
    }
}

/// A room as the backend publishes it. Owned and mutated only by the
/// backend; the client never changes one in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub room_type: RoomType,
    pub room_number: String,
    /// Nightly rate, always positive.
    pub price: f64,
    /// Maximum guest count this room permits.
    pub capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub is_available: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// A prospective booking, constructed client-side and submitted once.
/// The backend recomputes the authoritative price, so none is carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Room id the request is for.
    pub room: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// A persisted booking as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub room: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Authenticated session. Passed explicitly to every call that needs
/// authorization instead of living in shared mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Aggregates the admin dashboard renders. Produced server-side; the two
/// derived figures below are computed client-side from the totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: u32,
    pub available_rooms: u32,
    pub total_bookings: u32,
    pub pending_bookings: u32,
    pub confirmed_bookings: u32,
    pub total_revenue: f64,
    #[serde(default)]
    pub recent_bookings: Vec<Booking>,
}

impl DashboardStats {
    /// Share of rooms currently occupied, in percent. Zero when there are
    /// no rooms at all.
    pub fn occupancy_rate(&self) -> f64 {
        if self.total_rooms == 0 {
            return 0.0;
        }
        (self.total_rooms - self.available_rooms) as f64 / self.total_rooms as f64 * 100.0
    }

    /// Average revenue per booking. Zero when no bookings exist.
    pub fn average_booking_value(&self) -> f64 {
        if self.total_bookings == 0 {
            return 0.0;
        }
        self.total_revenue / self.total_bookings as f64
    }
}

/// Parses an ISO `YYYY-MM-DD` calendar date. A trailing time or timezone
/// component is not trusted for comparisons and is cut before parsing.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_part = match value.split_once('T') {
        Some((date, _)) => date,
        None => value,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_deserializes_backend_json() {
        let json = r#"{
            "_id": "665f1c2ab8d3e12f9c0a1b77",
            "roomType": "suite",
            "roomNumber": "301",
            "price": 189.5,
            "capacity": 4,
            "amenities": ["WiFi", "TV", "Air Conditioning"],
            "isAvailable": true,
            "description": "Corner suite with city view",
            "images": ["https://cdn.example.com/rooms/301.jpg"],
            "featured": true
        }"#;

        let room: Room = serde_json::from_str(json).expect("room should deserialize");
        assert_eq!(room.id, "665f1c2ab8d3e12f9c0a1b77");
        assert_eq!(room.room_type, RoomType::Suite);
        assert_eq!(room.price, 189.5);
        assert_eq!(room.capacity, 4);
        assert!(room.is_available);
        assert!(room.featured);
        assert_eq!(room.amenities[0], "WiFi");
    }

    #[test]
    fn test_room_tolerates_missing_optional_fields() {
        let json = r#"{
            "_id": "abc",
            "roomType": "single",
            "roomNumber": "101",
            "price": 75.0,
            "capacity": 1,
            "isAvailable": false
        }"#;

        let room: Room = serde_json::from_str(json).expect("room should deserialize");
        assert!(room.amenities.is_empty());
        assert!(room.images.is_empty());
        assert!(!room.featured);
        assert_eq!(room.description, "");
    }

    #[test]
    fn test_booking_request_serializes_camel_case() {
        let request = BookingRequest {
            room: "abc".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            number_of_guests: 2,
            special_requests: None,
        };

        let json = serde_json::to_string(&request).expect("request should serialize");
        assert!(json.contains("\"checkInDate\":\"2025-06-01\""));
        assert!(json.contains("\"checkOutDate\":\"2025-06-04\""));
        assert!(json.contains("\"numberOfGuests\":2"));
        // Absent special requests are omitted from the payload entirely.
        assert!(!json.contains("specialRequests"));
    }

    #[test]
    fn test_room_type_from_str() {
        assert_eq!("suite".parse::<RoomType>().unwrap(), RoomType::Suite);
        assert_eq!("Deluxe".parse::<RoomType>().unwrap(), RoomType::Deluxe);
        assert!("penthouse".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_room_type_display_round_trips() {
        for room_type in [
            RoomType::Single,
            RoomType::Double,
            RoomType::Suite,
            RoomType::Deluxe,
        ] {
            let parsed: RoomType = room_type.to_string().parse().unwrap();
            assert_eq!(parsed, room_type);
        }
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2025-06-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date_ignores_time_component() {
        // Timezone offsets must not shift the calendar date.
        let date = parse_iso_date("2025-06-01T23:30:00+11:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert!(parse_iso_date("01/06/2025").is_err());
        assert!(parse_iso_date("not a date").is_err());
    }

    #[test]
    fn test_dashboard_derivations() {
        let stats = DashboardStats {
            total_rooms: 20,
            available_rooms: 15,
            total_bookings: 8,
            pending_bookings: 2,
            confirmed_bookings: 6,
            total_revenue: 4200.0,
            recent_bookings: vec![],
        };

        assert_eq!(stats.occupancy_rate(), 25.0);
        assert_eq!(stats.average_booking_value(), 525.0);
    }

    #[test]
    fn test_dashboard_derivations_guard_zero_denominators() {
        let stats = DashboardStats::default();
        assert_eq!(stats.occupancy_rate(), 0.0);
        assert_eq!(stats.average_booking_value(), 0.0);
    }
}
