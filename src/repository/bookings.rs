//! In-memory booking store
//!
//! Owns every booking and enforces the scheduling rules: one booking per
//! (date, hour, court), weekly "Hora Fija" series, forward-only series
//! cancellation and the time-based lock of empty cells.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, RecurringPromotion, RecurringRemoval, SlotHour, SlotKey},
        court::Court,
        grid::{DayGrid, GridCell, GridRow},
    },
};

pub const DEFAULT_RECURRENCE_WEEKS: u32 = 4;
pub const DEFAULT_MAX_CLIENT_NAME_LEN: usize = 100;

/// Whether an empty slot should be offered for booking at the given reference moment.
///
/// Past dates are locked. On the reference date itself a slot is locked once the
/// reference hour is later than the slot hour. The post-midnight slots (24, 25)
/// start on the next calendar day, so they are never locked on their own booking date.
pub fn is_slot_locked(
    hour: SlotHour,
    date: NaiveDate,
    reference_date: NaiveDate,
    reference_time: NaiveTime,
) -> bool {
    if date < reference_date {
        return true;
    }
    date == reference_date && !hour.is_wrapped() && reference_time.hour() > hour.clock_hour()
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Booking {} not found", id))
}

pub struct BookingStore {
    /// Insertion order is kept so a series reads in creation order
    bookings: IndexMap<Uuid, Booking>,
    slots: HashMap<SlotKey, Uuid>,
    view_date: NaiveDate,
    recurrence_weeks: u32,
    max_client_name_len: usize,
}

impl BookingStore {
    pub fn new(view_date: NaiveDate) -> Self {
        Self {
            bookings: IndexMap::new(),
            slots: HashMap::new(),
            view_date,
            recurrence_weeks: DEFAULT_RECURRENCE_WEEKS,
            max_client_name_len: DEFAULT_MAX_CLIENT_NAME_LEN,
        }
    }

    /// Number of extra weekly occurrences created by `promote_to_recurring`
    pub fn with_recurrence_weeks(mut self, weeks: u32) -> Self {
        self.recurrence_weeks = weeks;
        self
    }

    pub fn with_max_client_name_len(mut self, len: usize) -> Self {
        self.max_client_name_len = len;
        self
    }

    pub fn recurrence_weeks(&self) -> u32 {
        self.recurrence_weeks
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    // ---- Queries ----

    pub fn get(&self, id: Uuid) -> AppResult<&Booking> {
        self.bookings
            .get(&id)
            .ok_or_else(|| not_found(id))
    }

    /// Booking occupying the given slot, if any
    pub fn find(&self, date: NaiveDate, hour: SlotHour, court: Court) -> Option<&Booking> {
        self.slots
            .get(&SlotKey { date, hour, court })
            .and_then(|id| self.bookings.get(id))
    }

    /// Bookings on one date, ordered by hour then court
    pub fn list_by_date(&self, date: NaiveDate) -> Vec<Booking> {
        let mut rows: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.date == date)
            .cloned()
            .collect();
        rows.sort_by_key(|b| (b.hour, b.court));
        rows
    }

    /// Every occurrence of a series, ordered by date
    pub fn list_group(&self, group_id: Uuid) -> Vec<Booking> {
        let mut rows: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.recurring_group_id == Some(group_id))
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.date);
        rows
    }

    pub fn is_slot_locked(&self, hour: SlotHour, date: NaiveDate, reference: NaiveDateTime) -> bool {
        is_slot_locked(hour, date, reference.date(), reference.time())
    }

    /// Hour x court grid for one date. Only empty cells are ever locked.
    pub fn day_grid(&self, date: NaiveDate, reference: NaiveDateTime) -> DayGrid {
        let rows = SlotHour::all()
            .map(|hour| {
                let locked = self.is_slot_locked(hour, date, reference);
                let cells = Court::ALL
                    .iter()
                    .map(|&court| {
                        let booking = self.find(date, hour, court).cloned();
                        GridCell {
                            court,
                            locked: locked && booking.is_none(),
                            booking,
                        }
                    })
                    .collect();
                GridRow {
                    hour,
                    label: hour.label(),
                    cells,
                }
            })
            .collect();

        DayGrid {
            date,
            courts: Court::ALL.to_vec(),
            rows,
        }
    }

    // ---- Mutations ----

    pub fn create(
        &mut self,
        client_name: &str,
        court: Court,
        hour: SlotHour,
        date: NaiveDate,
    ) -> AppResult<Booking> {
        let client_name = self.normalize_client_name(client_name)?;

        if let Some(existing) = self.find(date, hour, court) {
            return Err(AppError::SlotConflict(format!(
                "{} at {} on {} is already booked by {}",
                court,
                hour.label(),
                date,
                existing.client_name
            )));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            client_name,
            court,
            hour,
            date,
            recurring_group_id: None,
        };
        self.insert(booking.clone());
        Ok(booking)
    }

    /// Change the client name of a single booking. Other occurrences of the
    /// same series keep their name.
    pub fn rename(&mut self, id: Uuid, client_name: &str) -> AppResult<Booking> {
        let client_name = self.normalize_client_name(client_name)?;
        let booking = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| not_found(id))?;
        booking.client_name = client_name;
        Ok(booking.clone())
    }

    /// Remove one booking. Sibling occurrences of a series are kept.
    pub fn delete(&mut self, id: Uuid) -> AppResult<Booking> {
        let booking = self
            .bookings
            .shift_remove(&id)
            .ok_or_else(|| not_found(id))?;
        self.slots.remove(&booking.slot());
        Ok(booking)
    }

    /// Turn a booking into a weekly series.
    ///
    /// The base booking joins a new group and one occurrence is added per week
    /// for `recurrence_weeks` weeks. Weeks whose slot is already taken are
    /// skipped and reported, never retried. A series that would run past the
    /// last representable date stops there and is marked `truncated`.
    pub fn promote_to_recurring(&mut self, id: Uuid) -> AppResult<RecurringPromotion> {
        let booking = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| not_found(id))?;
        if booking.is_recurring() {
            return Err(AppError::AlreadyRecurring(id.to_string()));
        }
        let group_id = Uuid::new_v4();
        booking.recurring_group_id = Some(group_id);
        let base = booking.clone();

        let mut created = Vec::new();
        let mut skipped = Vec::new();
        let mut truncated = false;

        for week in 1..=u64::from(self.recurrence_weeks) {
            let Some(date) = base.date.checked_add_days(Days::new(7 * week)) else {
                truncated = true;
                break;
            };
            if self.find(date, base.hour, base.court).is_some() {
                skipped.push(date);
                continue;
            }
            let occurrence = Booking {
                id: Uuid::new_v4(),
                client_name: base.client_name.clone(),
                court: base.court,
                hour: base.hour,
                date,
                recurring_group_id: Some(group_id),
            };
            self.insert(occurrence.clone());
            created.push(occurrence);
        }

        Ok(RecurringPromotion {
            group_id,
            base,
            created,
            skipped,
            truncated,
        })
    }

    /// Cancel a series from the given occurrence onward. Earlier occurrences stay.
    pub fn unfix(&mut self, id: Uuid) -> AppResult<RecurringRemoval> {
        let anchor = self.get(id)?;
        let group_id = anchor
            .recurring_group_id
            .ok_or_else(|| AppError::NotRecurring(id.to_string()))?;
        let from = anchor.date;

        let doomed: Vec<Uuid> = self
            .bookings
            .values()
            .filter(|b| b.recurring_group_id == Some(group_id) && b.date >= from)
            .map(|b| b.id)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for booking_id in doomed {
            if let Some(booking) = self.bookings.shift_remove(&booking_id) {
                self.slots.remove(&booking.slot());
                removed.push(booking);
            }
        }
        removed.sort_by_key(|b| b.date);

        Ok(RecurringRemoval { group_id, removed })
    }

    // ---- View date ----

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    pub fn set_view_date(&mut self, date: NaiveDate) {
        self.view_date = date;
    }

    pub fn shift_view_date(&mut self, days: i64) -> AppResult<NaiveDate> {
        let shifted = if days >= 0 {
            self.view_date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.view_date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        self.view_date = shifted
            .ok_or_else(|| AppError::Validation(format!("Cannot move view date by {} days", days)))?;
        Ok(self.view_date)
    }

    fn insert(&mut self, booking: Booking) {
        self.slots.insert(booking.slot(), booking.id);
        self.bookings.insert(booking.id, booking);
    }

    fn normalize_client_name(&self, name: &str) -> AppResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Client name is required".to_string()));
        }
        if name.chars().count() > self.max_client_name_len {
            return Err(AppError::Validation(format!(
                "Client name must be at most {} characters",
                self.max_client_name_len
            )));
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hour(h: u8) -> SlotHour {
        SlotHour::new(h).unwrap()
    }

    fn store() -> BookingStore {
        BookingStore::new(date(2025, 6, 10))
    }

    fn at(d: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        d.and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_create_and_find() {
        let mut store = store();
        let booking = store
            .create("Ana", Court::Padel, hour(18), date(2025, 6, 10))
            .unwrap();

        assert_eq!(booking.client_name, "Ana");
        assert!(!booking.is_recurring());
        let found = store.find(date(2025, 6, 10), hour(18), Court::Padel).unwrap();
        assert_eq!(found.id, booking.id);
        assert!(store.find(date(2025, 6, 10), hour(18), Court::Cancha1).is_none());
    }

    #[test]
    fn test_create_rejects_occupied_slot() {
        let mut store = store();
        store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();

        let err = store
            .create("Luis", Court::Padel, hour(18), date(2025, 6, 10))
            .unwrap_err();
        assert!(matches!(err, AppError::SlotConflict(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find(date(2025, 6, 10), hour(18), Court::Padel).unwrap().client_name,
            "Ana"
        );
    }

    #[test]
    fn test_create_trims_and_validates_name() {
        let mut store = store().with_max_client_name_len(5);
        let booking = store.create("  Ana ", Court::Padel, hour(14), date(2025, 6, 10)).unwrap();
        assert_eq!(booking.client_name, "Ana");

        assert!(matches!(
            store.create("   ", Court::Padel, hour(15), date(2025, 6, 10)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            store.create("Maximiliano", Court::Padel, hour(15), date(2025, 6, 10)),
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_slot_reusable_after_delete() {
        let mut store = store();
        let booking = store.create("Ana", Court::Cancha2, hour(20), date(2025, 6, 10)).unwrap();
        store.delete(booking.id).unwrap();

        assert!(store.create("Luis", Court::Cancha2, hour(20), date(2025, 6, 10)).is_ok());
    }

    #[test]
    fn test_rename_preserves_identity() {
        let mut store = store();
        let target = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        let other = store.create("Luis", Court::Padel, hour(19), date(2025, 6, 10)).unwrap();

        let renamed = store.rename(target.id, "Ana María").unwrap();

        assert_eq!(renamed.client_name, "Ana María");
        assert_eq!(renamed.id, target.id);
        assert_eq!(renamed.court, target.court);
        assert_eq!(renamed.hour, target.hour);
        assert_eq!(renamed.date, target.date);
        assert_eq!(renamed.recurring_group_id, target.recurring_group_id);
        assert_eq!(store.get(other.id).unwrap(), &other);
    }

    #[test]
    fn test_rename_and_delete_unknown_id() {
        let mut store = store();
        let id = Uuid::new_v4();
        assert!(matches!(store.rename(id, "Ana"), Err(AppError::NotFound(_))));
        assert!(matches!(store.delete(id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_rename_one_occurrence_only() {
        let mut store = store();
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        let promotion = store.promote_to_recurring(base.id).unwrap();

        store.rename(promotion.created[1].id, "Luis").unwrap();

        let names: Vec<String> = store
            .list_group(promotion.group_id)
            .into_iter()
            .map(|b| b.client_name)
            .collect();
        assert_eq!(names, vec!["Ana", "Ana", "Luis", "Ana", "Ana"]);
    }

    #[test]
    fn test_promote_creates_weekly_occurrences() {
        let mut store = store();
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();

        let promotion = store.promote_to_recurring(base.id).unwrap();

        assert_eq!(promotion.base.recurring_group_id, Some(promotion.group_id));
        assert!(promotion.skipped.is_empty());
        assert!(!promotion.truncated);
        let dates: Vec<NaiveDate> = promotion.created.iter().map(|b| b.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 6, 17), date(2025, 6, 24), date(2025, 7, 1), date(2025, 7, 8)]
        );
        for occurrence in &promotion.created {
            assert_eq!(occurrence.client_name, "Ana");
            assert_eq!(occurrence.court, Court::Padel);
            assert_eq!(occurrence.hour, hour(18));
            assert_eq!(occurrence.recurring_group_id, Some(promotion.group_id));
            assert_ne!(occurrence.id, base.id);
        }
        assert_eq!(store.len(), 5);
        assert!(store.get(base.id).unwrap().is_recurring());
    }

    #[test]
    fn test_promote_skips_taken_weeks() {
        let mut store = store();
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        let blocker = store.create("Luis", Court::Padel, hour(18), date(2025, 6, 24)).unwrap();
        // Same date and hour on another court does not block
        store.create("Eva", Court::Cancha1, hour(18), date(2025, 7, 1)).unwrap();

        let promotion = store.promote_to_recurring(base.id).unwrap();

        assert_eq!(promotion.skipped, vec![date(2025, 6, 24)]);
        assert_eq!(promotion.created.len(), 3);
        assert_eq!(store.get(blocker.id).unwrap().client_name, "Luis");
        assert!(!store.get(blocker.id).unwrap().is_recurring());
        assert!(!promotion.truncated);
    }

    #[test]
    fn test_promote_stops_at_end_of_calendar() {
        let mut store = store();
        let last_days = NaiveDate::MAX.checked_sub_days(Days::new(10)).unwrap();
        let base = store.create("Ana", Court::Padel, hour(18), last_days).unwrap();

        let promotion = store.promote_to_recurring(base.id).unwrap();

        assert_eq!(promotion.created.len(), 1);
        assert_eq!(promotion.created[0].date, last_days + Days::new(7));
        assert!(promotion.skipped.is_empty());
        assert!(promotion.truncated);
        assert_eq!(store.list_group(promotion.group_id).len(), 2);
    }

    #[test]
    fn test_promote_already_recurring_creates_nothing() {
        let mut store = store();
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        let promotion = store.promote_to_recurring(base.id).unwrap();
        let before = store.len();

        assert!(matches!(
            store.promote_to_recurring(base.id),
            Err(AppError::AlreadyRecurring(_))
        ));
        assert!(matches!(
            store.promote_to_recurring(promotion.created[0].id),
            Err(AppError::AlreadyRecurring(_))
        ));
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_promote_unknown_id() {
        let mut store = store();
        assert!(matches!(
            store.promote_to_recurring(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_promote_with_custom_horizon() {
        let mut store = store().with_recurrence_weeks(2);
        assert_eq!(store.recurrence_weeks(), 2);
        let base = store.create("Ana", Court::Cancha1, hour(25), date(2025, 6, 10)).unwrap();

        let promotion = store.promote_to_recurring(base.id).unwrap();

        assert_eq!(promotion.created.len(), 2);
        assert_eq!(promotion.created[1].date, date(2025, 6, 24));
    }

    #[test]
    fn test_promote_without_horizon_only_tags_base() {
        let mut store = store().with_recurrence_weeks(0);
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();

        let promotion = store.promote_to_recurring(base.id).unwrap();

        assert!(promotion.created.is_empty());
        assert!(promotion.base.is_recurring());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_occurrence_keeps_siblings() {
        let mut store = store();
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        let promotion = store.promote_to_recurring(base.id).unwrap();

        store.delete(promotion.created[0].id).unwrap();

        assert_eq!(store.list_group(promotion.group_id).len(), 4);
        assert!(store.find(date(2025, 6, 17), hour(18), Court::Padel).is_none());
    }

    #[test]
    fn test_unfix_removes_forward_only() {
        let mut store = store();
        let base = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        let promotion = store.promote_to_recurring(base.id).unwrap();
        let unrelated = store.create("Luis", Court::Padel, hour(18), date(2025, 7, 15)).unwrap();

        // Cancel from the third occurrence (2025-06-24)
        let removal = store.unfix(promotion.created[1].id).unwrap();

        let removed: Vec<NaiveDate> = removal.removed.iter().map(|b| b.date).collect();
        assert_eq!(
            removed,
            vec![date(2025, 6, 24), date(2025, 7, 1), date(2025, 7, 8)]
        );
        let kept: Vec<NaiveDate> = store
            .list_group(promotion.group_id)
            .iter()
            .map(|b| b.date)
            .collect();
        assert_eq!(kept, vec![date(2025, 6, 10), date(2025, 6, 17)]);
        assert!(store.get(unrelated.id).is_ok());
        assert!(store.find(date(2025, 7, 1), hour(18), Court::Padel).is_none());
    }

    #[test]
    fn test_unfix_non_recurring_is_noop() {
        let mut store = store();
        let booking = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();

        assert!(matches!(store.unfix(booking.id), Err(AppError::NotRecurring(_))));
        assert_eq!(store.len(), 1);
        assert!(matches!(store.unfix(Uuid::new_v4()), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut store = store();
        let ana = store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();
        assert!(matches!(
            store.create("Luis", Court::Padel, hour(18), date(2025, 6, 10)),
            Err(AppError::SlotConflict(_))
        ));

        let promotion = store.promote_to_recurring(ana.id).unwrap();
        assert_eq!(promotion.created.len(), 4);

        let removal = store.unfix(ana.id).unwrap();
        assert_eq!(removal.removed.len(), 5);
        assert!(store.is_empty());
        assert!(store.list_group(promotion.group_id).is_empty());
    }

    #[test]
    fn test_list_by_date_is_ordered() {
        let mut store = store();
        let day = date(2025, 6, 10);
        store.create("C", Court::Cancha2, hour(20), day).unwrap();
        store.create("A", Court::Padel, hour(24), day).unwrap();
        store.create("B", Court::Padel, hour(20), day).unwrap();
        store.create("X", Court::Padel, hour(20), date(2025, 6, 11)).unwrap();

        let names: Vec<String> = store.list_by_date(day).into_iter().map(|b| b.client_name).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_lock_boundaries() {
        let today = date(2025, 6, 10);
        let now = NaiveTime::from_hms_opt(15, 30, 0).unwrap();

        assert!(is_slot_locked(hour(14), today, today, now));
        assert!(!is_slot_locked(hour(15), today, today, now));
        assert!(!is_slot_locked(hour(16), today, today, now));
        assert!(!is_slot_locked(hour(14), date(2025, 6, 11), today, now));
        assert!(is_slot_locked(hour(14), date(2025, 6, 9), today, now));
    }

    #[test]
    fn test_wrapped_hours_never_locked_same_day() {
        let today = date(2025, 6, 10);
        let late = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

        assert!(!is_slot_locked(hour(23), today, today, late));
        assert!(is_slot_locked(hour(22), today, today, late));
        assert!(!is_slot_locked(hour(24), today, today, late));
        assert!(!is_slot_locked(hour(25), today, today, late));
        // Yesterday's post-midnight slots are in the past
        assert!(is_slot_locked(hour(25), date(2025, 6, 9), today, late));
    }

    #[test]
    fn test_day_grid_locks_only_empty_cells() {
        let mut store = store();
        let day = date(2025, 6, 10);
        store.create("Ana", Court::Cancha1, hour(14), day).unwrap();

        let grid = store.day_grid(day, at(day, 16, 5));

        assert_eq!(grid.rows.len(), 12);
        assert_eq!(grid.rows[11].label, "01:00");
        assert!(grid.rows.iter().all(|row| row.cells.len() == 3));

        let booked = grid.cell(hour(14), Court::Cancha1).unwrap();
        assert!(!booked.locked);
        assert_eq!(booked.booking.as_ref().unwrap().client_name, "Ana");

        assert!(grid.cell(hour(14), Court::Padel).unwrap().locked);
        assert!(grid.cell(hour(15), Court::Padel).unwrap().locked);
        assert!(!grid.cell(hour(16), Court::Padel).unwrap().locked);
        assert!(!grid.cell(hour(24), Court::Padel).unwrap().locked);
    }

    #[test]
    fn test_view_date_navigation() {
        let mut store = store();
        store.create("Ana", Court::Padel, hour(18), date(2025, 6, 10)).unwrap();

        assert_eq!(store.shift_view_date(1).unwrap(), date(2025, 6, 11));
        assert_eq!(store.shift_view_date(-3).unwrap(), date(2025, 6, 8));
        store.set_view_date(date(2025, 1, 1));
        assert_eq!(store.view_date(), date(2025, 1, 1));
        assert!(store.shift_view_date(i64::MAX).is_err());
        assert_eq!(store.view_date(), date(2025, 1, 1));
        assert_eq!(store.len(), 1);
    }
}
