//! Business logic services

pub mod bookings;
pub mod clock;

use std::sync::Arc;

use crate::repository::Repository;

pub use clock::{Clock, FixedClock, SystemClock};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
}

impl Services {
    /// Create all services with the given repository and reference clock
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings: bookings::BookingsService::new(repository, clock),
        }
    }
}
