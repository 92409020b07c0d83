// REST client for the booking backend.
//
// Every piece of business logic (availability, persistence, authorization)
// lives server-side; this client is plumbing plus the optimistic pre-checks
// in `booking`. A request the client considered valid can still come back
// rejected, and that rejection is handed to the caller untranslated.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::filter::RoomFilter;
use crate::model::{
    Booking, BookingRequest, BookingStatus, ContactMessage, DashboardStats, Room, Session, User,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// The backend refused a request. Carries the server's own message so
    /// the caller can present it verbatim.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// The backend surface the customer-facing pages consume. Implemented over
/// HTTP in production and by an in-memory double in tests.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn fetch_room(&self, id: &str) -> Result<Room, ApiError>;

    async fn fetch_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, ApiError>;

    async fn fetch_featured_rooms(&self) -> Result<Vec<Room>, ApiError>;

    /// Submits a booking on behalf of the session holder. The backend
    /// recomputes the price and re-validates availability.
    async fn submit_booking(
        &self,
        session: &Session,
        request: &BookingRequest,
    ) -> Result<Booking, ApiError>;

    async fn fetch_user_bookings(&self, session: &Session) -> Result<Vec<Booking>, ApiError>;

    async fn cancel_booking(&self, session: &Session, booking_id: &str) -> Result<(), ApiError>;

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), ApiError>;

    async fn fetch_dashboard_stats(&self, session: &Session) -> Result<DashboardStats, ApiError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// `reqwest`-backed implementation of [`BookingBackend`].
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

// Error payloads come back as `{"message": ...}` from the booking routes
// and `{"error": ...}` from a few older ones.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::MalformedResponse(e.to_string()));
        }
        Err(Self::error_for(status, response, resource).await)
    }

    async fn expect_ok(response: reqwest::Response, resource: &str) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_for(status, response, resource).await)
    }

    async fn error_for(status: StatusCode, response: reqwest::Response, resource: &str) -> ApiError {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(resource.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
            _ => ApiError::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }

    // --- auth ---

    pub async fn register(&self, registration: &Registration) -> Result<Session, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(registration)
            .send()
            .await?;
        Self::decode(response, "registration").await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;
        Self::decode(response, "login").await
    }

    pub async fn admin_login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/admin/login"))
            .json(credentials)
            .send()
            .await?;
        Self::decode(response, "admin login").await
    }

    pub async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::expect_ok(response, "logout").await
    }

    pub async fn profile(&self, session: &Session) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::decode(response, "profile").await
    }

    // --- admin room management ---

    pub async fn create_room(&self, session: &Session, room: &Room) -> Result<Room, ApiError> {
        let response = self
            .http
            .post(self.url("/rooms"))
            .bearer_auth(&session.token)
            .json(room)
            .send()
            .await?;
        Self::decode(response, "room").await
    }

    pub async fn update_room(&self, session: &Session, room: &Room) -> Result<Room, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/rooms/{}", room.id)))
            .bearer_auth(&session.token)
            .json(room)
            .send()
            .await?;
        Self::decode(response, "room").await
    }

    pub async fn delete_room(&self, session: &Session, room_id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/rooms/{}", room_id)))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::expect_ok(response, "room").await
    }

    // --- admin booking management ---

    pub async fn fetch_all_bookings(&self, session: &Session) -> Result<Vec<Booking>, ApiError> {
        let response = self
            .http
            .get(self.url("/bookings/admin/all"))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::decode(response, "bookings").await
    }

    pub async fn update_booking_status(
        &self,
        session: &Session,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/bookings/admin/{}/status", booking_id)))
            .bearer_auth(&session.token)
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        Self::decode(response, "booking").await
    }
}

#[async_trait]
impl BookingBackend for HttpBackend {
    async fn fetch_room(&self, id: &str) -> Result<Room, ApiError> {
        debug!(room_id = %id, "fetching room");
        let response = self.http.get(self.url(&format!("/rooms/{}", id))).send().await?;
        Self::decode(response, "room").await
    }

    async fn fetch_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, ApiError> {
        debug!(?filter, "fetching room catalog");
        let response = self
            .http
            .get(self.url("/rooms"))
            .query(&filter.to_query_params())
            .send()
            .await?;
        Self::decode(response, "rooms").await
    }

    async fn fetch_featured_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let response = self.http.get(self.url("/rooms/featured")).send().await?;
        Self::decode(response, "featured rooms").await
    }

    async fn submit_booking(
        &self,
        session: &Session,
        request: &BookingRequest,
    ) -> Result<Booking, ApiError> {
        info!(room_id = %request.room, "submitting booking");
        let response = self
            .http
            .post(self.url("/bookings"))
            .bearer_auth(&session.token)
            .json(request)
            .send()
            .await?;
        Self::decode(response, "booking").await
    }

    async fn fetch_user_bookings(&self, session: &Session) -> Result<Vec<Booking>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/bookings/user/{}", session.user.id)))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::decode(response, "bookings").await
    }

    async fn cancel_booking(&self, session: &Session, booking_id: &str) -> Result<(), ApiError> {
        info!(%booking_id, "cancelling booking");
        let response = self
            .http
            .delete(self.url(&format!("/bookings/{}", booking_id)))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::expect_ok(response, "booking").await
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/contacts"))
            .json(message)
            .send()
            .await?;
        Self::expect_ok(response, "contact message").await
    }

    async fn fetch_dashboard_stats(&self, session: &Session) -> Result<DashboardStats, ApiError> {
        let response = self
            .http
            .get(self.url("/bookings/admin/dashboard/stats"))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::decode(response, "dashboard stats").await
    }
}
