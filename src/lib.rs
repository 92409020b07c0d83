// Client-side core for the hotel booking front end.
//
// Business logic lives in the backend service; this crate carries the
// domain model, the optimistic booking validation and pricing, catalog
// filtering, the REST client and a small room lookup cache.

pub mod booking;
pub mod cache;
pub mod client;
pub mod filter;
pub mod model;

// Re-export key types for convenience
pub use booking::{nights_between, total_price, validate, BookingDecision, RejectionReason};
pub use cache::{CacheConfig, CacheStats, RoomCache};
pub use client::{
    ApiError, BackendConfig, BookingBackend, Credentials, HttpBackend, Registration,
};
pub use filter::RoomFilter;
pub use model::{
    parse_iso_date, Booking, BookingRequest, BookingStatus, ContactMessage, DashboardStats, Room,
    RoomType, Session, User,
};
