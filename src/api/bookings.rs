//! Booking API endpoints (CRUD and "Hora Fija" series)

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::extract::{JsonBody, Path, Query};
use crate::{
    error::AppResult,
    models::{
        booking::{
            parse_date, Booking, BookingQuery, CreateBooking, RecurringPromotion,
            RecurringRemoval, RenameBooking, SlotLock, SlotLockQuery,
        },
        court::CourtInfo,
    },
};

/// List the bookable courts
#[utoipa::path(
    get,
    path = "/courts",
    tag = "bookings",
    responses(
        (status = 200, description = "Courts in grid column order", body = Vec<CourtInfo>)
    )
)]
pub async fn list_courts(State(state): State<crate::AppState>) -> Json<Vec<CourtInfo>> {
    Json(state.services.bookings.courts())
}

/// List bookings for a date
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings on that date", body = Vec<Booking>),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let date = parse_date(&query.date, "date")?;
    let bookings = state.services.bookings.list_by_date(date).await;
    Ok(Json(bookings))
}

/// Get a booking
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid name, hour or date", body = crate::error::ErrorResponse),
        (status = 409, description = "Slot already booked", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    JsonBody(data): JsonBody<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.create(&data).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Rename the client of a booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = RenameBooking,
    responses(
        (status = 200, description = "Booking renamed", body = Booking),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn rename_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    JsonBody(data): JsonBody<RenameBooking>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.rename(id, &data).await?;
    Ok(Json(booking))
}

/// Delete a single booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Turn a booking into a weekly "Hora Fija" series
#[utoipa::path(
    post,
    path = "/bookings/{id}/recurring",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 201, description = "Series created", body = RecurringPromotion),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Booking already recurring", body = crate::error::ErrorResponse)
    )
)]
pub async fn promote_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<RecurringPromotion>)> {
    let promotion = state.services.bookings.promote_to_recurring(id).await?;
    Ok((StatusCode::CREATED, Json(promotion)))
}

/// Cancel a series from this occurrence onward
#[utoipa::path(
    delete,
    path = "/bookings/{id}/recurring",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Occurrences removed", body = RecurringRemoval),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Booking not recurring", body = crate::error::ErrorResponse)
    )
)]
pub async fn unfix_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RecurringRemoval>> {
    let removal = state.services.bookings.unfix(id).await?;
    Ok(Json(removal))
}

/// Check whether an empty slot is locked for new bookings
#[utoipa::path(
    get,
    path = "/slots/lock",
    tag = "bookings",
    params(SlotLockQuery),
    responses(
        (status = 200, description = "Lock state", body = SlotLock),
        (status = 400, description = "Invalid date or hour", body = crate::error::ErrorResponse)
    )
)]
pub async fn slot_lock(
    State(state): State<crate::AppState>,
    Query(query): Query<SlotLockQuery>,
) -> AppResult<Json<SlotLock>> {
    let date = parse_date(&query.date, "date")?;
    let lock = state.services.bookings.slot_lock(date, query.hour).await?;
    Ok(Json(lock))
}
