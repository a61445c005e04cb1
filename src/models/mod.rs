//! Data models for Canchita

pub mod booking;
pub mod court;
pub mod grid;

// Re-export commonly used types
pub use booking::{Booking, RecurringPromotion, RecurringRemoval, SlotHour, SlotKey};
pub use court::{Court, CourtInfo};
pub use grid::{DayGrid, GridCell, GridRow};
