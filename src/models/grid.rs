//! Day grid (hour rows x court columns) and the view-date cursor

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{booking::{Booking, SlotHour}, court::Court};

/// One cell of the grid
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridCell {
    pub court: Court,
    pub booking: Option<Booking>,
    /// Empty cell whose time has already passed
    pub locked: bool,
}

/// One hour row of the grid
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridRow {
    pub hour: SlotHour,
    /// Row label ("14:00" .. "01:00")
    pub label: String,
    pub cells: Vec<GridCell>,
}

/// Full grid for one date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub courts: Vec<Court>,
    pub rows: Vec<GridRow>,
}

impl DayGrid {
    pub fn cell(&self, hour: SlotHour, court: Court) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.hour == hour)
            .and_then(|row| row.cells.iter().find(|cell| cell.court == court))
    }
}

/// Query parameters for the day grid
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct GridQuery {
    /// Grid date (YYYY-MM-DD), defaults to the current view date
    pub date: Option<String>,
}

/// Move the view date by a number of days
#[derive(Debug, Deserialize, ToSchema)]
pub struct ShiftViewDate {
    pub days: i64,
}

/// Current view date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViewDate {
    pub date: NaiveDate,
}
