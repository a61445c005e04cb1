//! Repository layer holding the in-memory booking store

pub mod bookings;

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::config::BookingsConfig;

pub use bookings::BookingStore;

/// Main repository struct, cheap to clone and shared by all services
#[derive(Clone)]
pub struct Repository {
    pub bookings: Arc<RwLock<BookingStore>>,
}

impl Repository {
    /// Wrap an existing store
    pub fn new(store: BookingStore) -> Self {
        Self {
            bookings: Arc::new(RwLock::new(store)),
        }
    }

    /// Empty store configured from the `[bookings]` section, view date on `today`
    pub fn from_config(today: NaiveDate, config: &BookingsConfig) -> Self {
        Self::new(
            BookingStore::new(today)
                .with_recurrence_weeks(config.recurrence_weeks)
                .with_max_client_name_len(config.max_client_name_len),
        )
    }
}
