//! Booking models (slot hours, bookings, recurring series)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::court::Court;
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// SlotHour
// ---------------------------------------------------------------------------

/// Hour bucket of the booking grid.
///
/// Runs from 14 to 25 on a clock that rolls past midnight: 24 is 00:00 and
/// 25 is 01:00 of the following night, still attached to the booking date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotHour(u8);

impl SlotHour {
    pub const FIRST: u8 = 14;
    pub const LAST: u8 = 25;

    pub fn new(hour: u8) -> AppResult<Self> {
        if (Self::FIRST..=Self::LAST).contains(&hour) {
            Ok(Self(hour))
        } else {
            Err(AppError::Validation(format!(
                "Hour {} is outside the bookable range {}-{}",
                hour,
                Self::FIRST,
                Self::LAST
            )))
        }
    }

    /// All slot hours in grid row order
    pub fn all() -> impl Iterator<Item = SlotHour> {
        (Self::FIRST..=Self::LAST).map(SlotHour)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// True for the post-midnight slots (24 and 25)
    pub fn is_wrapped(&self) -> bool {
        self.0 >= 24
    }

    /// Hour on a regular 0-23 clock
    pub fn clock_hour(&self) -> u32 {
        u32::from(self.0 % 24)
    }

    /// Grid row label, "14:00" .. "23:00", "00:00", "01:00"
    pub fn label(&self) -> String {
        format!("{:02}:00", self.clock_hour())
    }
}

impl TryFrom<u8> for SlotHour {
    type Error = AppError;

    fn try_from(hour: u8) -> Result<Self, Self::Error> {
        SlotHour::new(hour)
    }
}

impl From<SlotHour> for u8 {
    fn from(h: SlotHour) -> Self {
        h.0
    }
}

impl std::fmt::Display for SlotHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// A court booked by a client for one hour on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    /// Client name shown in the grid cell
    pub client_name: String,
    pub court: Court,
    pub hour: SlotHour,
    pub date: NaiveDate,
    /// Shared by every occurrence of a "Hora Fija" series
    pub recurring_group_id: Option<Uuid>,
}

impl Booking {
    pub fn is_recurring(&self) -> bool {
        self.recurring_group_id.is_some()
    }

    pub fn slot(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            hour: self.hour,
            court: self.court,
        }
    }
}

/// The (date, hour, court) triple a booking occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub hour: SlotHour,
    pub court: Court,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    pub court: Court,
    /// Slot hour (14-25, where 24 = 00:00 and 25 = 01:00)
    #[validate(range(min = 14, max = 25, message = "Hour must be between 14 and 25"))]
    pub hour: u8,
    /// Booking date (YYYY-MM-DD)
    pub date: String,
}

/// Rename booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RenameBooking {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
}

/// Query parameters for listing bookings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Bookings on this date (YYYY-MM-DD)
    pub date: String,
}

// ---------------------------------------------------------------------------
// Recurring series ("Hora Fija")
// ---------------------------------------------------------------------------

/// Outcome of turning a booking into a weekly series
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecurringPromotion {
    pub group_id: Uuid,
    /// The booking the series was started from
    pub base: Booking,
    /// Future occurrences actually inserted
    pub created: Vec<Booking>,
    /// Weeks left out because the slot was already taken
    pub skipped: Vec<NaiveDate>,
    /// Set when the series ran past the last representable date
    pub truncated: bool,
}

/// Outcome of cancelling a series from one occurrence onward
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecurringRemoval {
    pub group_id: Uuid,
    pub removed: Vec<Booking>,
}

// ---------------------------------------------------------------------------
// Slot lock
// ---------------------------------------------------------------------------

/// Query parameters for the slot lock check
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SlotLockQuery {
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Slot hour (14-25)
    pub hour: u8,
}

/// Whether an empty slot can still be booked
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotLock {
    pub date: NaiveDate,
    pub hour: SlotHour,
    pub locked: bool,
}

/// Parse a YYYY-MM-DD date, naming the offending field on failure
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}
