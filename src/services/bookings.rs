//! Booking service (CRUD, "Hora Fija" series, slot locks, day grid)

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use super::clock::Clock;
use crate::{
    error::AppResult,
    models::{
        booking::{
            parse_date, Booking, CreateBooking, RecurringPromotion, RecurringRemoval,
            RenameBooking, SlotHour, SlotLock,
        },
        court::{Court, CourtInfo},
        grid::DayGrid,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl BookingsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn courts(&self) -> Vec<CourtInfo> {
        Court::ALL.iter().copied().map(CourtInfo::from).collect()
    }

    // ---- Reads ----

    pub async fn list_by_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.repository.bookings.read().await.list_by_date(date)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Booking> {
        self.repository.bookings.read().await.get(id).cloned()
    }

    /// Whether an empty slot is locked right now
    pub async fn slot_lock(&self, date: NaiveDate, hour: u8) -> AppResult<SlotLock> {
        let hour = SlotHour::new(hour)?;
        let locked = self
            .repository
            .bookings
            .read()
            .await
            .is_slot_locked(hour, date, self.clock.now());
        Ok(SlotLock { date, hour, locked })
    }

    /// Grid for `date`, or for the current view date when none is given
    pub async fn day_grid(&self, date: Option<NaiveDate>) -> DayGrid {
        let store = self.repository.bookings.read().await;
        let date = date.unwrap_or_else(|| store.view_date());
        store.day_grid(date, self.clock.now())
    }

    // ---- Mutations ----

    pub async fn create(&self, data: &CreateBooking) -> AppResult<Booking> {
        data.validate()?;
        let date = parse_date(&data.date, "date")?;
        let hour = SlotHour::new(data.hour)?;

        // Conflict check and insert run under one write guard
        let mut store = self.repository.bookings.write().await;
        match store.create(&data.client_name, data.court, hour, date) {
            Ok(booking) => {
                tracing::info!(
                    booking_id = %booking.id,
                    court = %booking.court,
                    hour = %booking.hour,
                    date = %booking.date,
                    "Booking created"
                );
                Ok(booking)
            }
            Err(e) => {
                tracing::warn!(court = %data.court, hour = %hour, date = %date, "Booking rejected: {}", e);
                Err(e)
            }
        }
    }

    pub async fn rename(&self, id: Uuid, data: &RenameBooking) -> AppResult<Booking> {
        data.validate()?;
        let booking = self
            .repository
            .bookings
            .write()
            .await
            .rename(id, &data.client_name)?;
        tracing::info!(booking_id = %id, "Booking renamed");
        Ok(booking)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<Booking> {
        let booking = self.repository.bookings.write().await.delete(id)?;
        tracing::info!(booking_id = %id, date = %booking.date, "Booking deleted");
        Ok(booking)
    }

    pub async fn promote_to_recurring(&self, id: Uuid) -> AppResult<RecurringPromotion> {
        let promotion = self
            .repository
            .bookings
            .write()
            .await
            .promote_to_recurring(id)?;

        for week in &promotion.skipped {
            tracing::debug!(group_id = %promotion.group_id, date = %week, "Recurring week skipped, slot taken");
        }
        tracing::info!(
            booking_id = %id,
            group_id = %promotion.group_id,
            created = promotion.created.len(),
            skipped = promotion.skipped.len(),
            truncated = promotion.truncated,
            "Booking promoted to recurring"
        );
        Ok(promotion)
    }

    pub async fn unfix(&self, id: Uuid) -> AppResult<RecurringRemoval> {
        let removal = self.repository.bookings.write().await.unfix(id)?;
        tracing::info!(
            booking_id = %id,
            group_id = %removal.group_id,
            removed = removal.removed.len(),
            "Recurring series cancelled from this date on"
        );
        Ok(removal)
    }

    /// Number of bookings held by the store
    pub async fn count(&self) -> usize {
        self.repository.bookings.read().await.len()
    }

    // ---- View date ----

    pub async fn view_date(&self) -> NaiveDate {
        self.repository.bookings.read().await.view_date()
    }

    pub async fn shift_view_date(&self, days: i64) -> AppResult<NaiveDate> {
        let date = self.repository.bookings.write().await.shift_view_date(days)?;
        tracing::debug!(%date, "View date moved");
        Ok(date)
    }
}
