// Booking request validation and price calculation.
//
// This is an optimistic pre-check: the backend remains authoritative and may
// still reject a request the client considered valid (for example a
// concurrent double-booking). The caller decides how to present a rejection.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{BookingRequest, Room};

/// Why a booking request was rejected client-side.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("Check-in date cannot be in the past")]
    PastCheckIn,

    #[error("Check-out date must be after check-in date")]
    InvalidRange,

    #[error("Number of guests exceeds the room capacity")]
    OverCapacity,
}

/// Outcome of validating a prospective booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookingDecision {
    Valid { nights: i64, total_price: f64 },
    Invalid(RejectionReason),
}

impl BookingDecision {
    pub fn is_valid(&self) -> bool {
        matches!(self, BookingDecision::Valid { .. })
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            BookingDecision::Valid { .. } => None,
            BookingDecision::Invalid(reason) => Some(*reason),
        }
    }
}

/// Validates a booking request against a room's constraints and the current
/// date, returning the stay length and total price when it passes.
///
/// Rules are checked in order and the first failure wins:
/// check-in must not lie before `today`, check-out must be strictly after
/// check-in, and the guest count must fit the room's capacity.
///
/// `today` is supplied by the caller rather than read from the system clock,
/// so the same inputs always produce the same decision.
pub fn validate(request: &BookingRequest, room: &Room, today: NaiveDate) -> BookingDecision {
    if request.check_in_date < today {
        return BookingDecision::Invalid(RejectionReason::PastCheckIn);
    }

    if request.check_out_date <= request.check_in_date {
        return BookingDecision::Invalid(RejectionReason::InvalidRange);
    }

    if request.number_of_guests > room.capacity {
        return BookingDecision::Invalid(RejectionReason::OverCapacity);
    }

    let nights = nights_between(request.check_in_date, request.check_out_date);
    BookingDecision::Valid {
        nights,
        total_price: total_price(nights, room.price),
    }
}

/// Number of calendar-day boundaries between check-in and check-out.
/// Calendar arithmetic, not wall-clock duration, so a daylight-saving
/// transition inside the stay cannot skew the count.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Total price for a stay, rounded to cents. Accepts zero nights and
/// returns zero; gating zero-night stays is the validator's job.
pub fn total_price(nights: i64, nightly_rate: f64) -> f64 {
    round_to_cents(nights as f64 * nightly_rate)
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
