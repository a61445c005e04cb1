//! Day grid and view-date endpoints

use axum::{extract::State, Json};

use super::extract::{JsonBody, Query};
use crate::{
    error::AppResult,
    models::{
        booking::parse_date,
        grid::{DayGrid, GridQuery, ShiftViewDate, ViewDate},
    },
};

/// Hour x court grid for one date
#[utoipa::path(
    get,
    path = "/grid",
    tag = "grid",
    params(GridQuery),
    responses(
        (status = 200, description = "Day grid", body = DayGrid),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_grid(
    State(state): State<crate::AppState>,
    Query(query): Query<GridQuery>,
) -> AppResult<Json<DayGrid>> {
    let date = query
        .date
        .as_deref()
        .map(|d| parse_date(d, "date"))
        .transpose()?;
    let grid = state.services.bookings.day_grid(date).await;
    Ok(Json(grid))
}

/// Current view date
#[utoipa::path(
    get,
    path = "/view-date",
    tag = "grid",
    responses(
        (status = 200, description = "View date", body = ViewDate)
    )
)]
pub async fn get_view_date(State(state): State<crate::AppState>) -> Json<ViewDate> {
    Json(ViewDate {
        date: state.services.bookings.view_date().await,
    })
}

/// Move the view date forward or backward
#[utoipa::path(
    post,
    path = "/view-date/shift",
    tag = "grid",
    request_body = ShiftViewDate,
    responses(
        (status = 200, description = "New view date", body = ViewDate),
        (status = 400, description = "Date out of range", body = crate::error::ErrorResponse)
    )
)]
pub async fn shift_view_date(
    State(state): State<crate::AppState>,
    JsonBody(data): JsonBody<ShiftViewDate>,
) -> AppResult<Json<ViewDate>> {
    let date = state.services.bookings.shift_view_date(data.days).await?;
    Ok(Json(ViewDate { date }))
}
