//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, grid, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Canchita API",
        version = "0.1.0",
        description = "Court booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bookings
        bookings::list_courts,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::rename_booking,
        bookings::delete_booking,
        bookings::promote_booking,
        bookings::unfix_booking,
        bookings::slot_lock,
        // Grid
        grid::get_grid,
        grid::get_view_date,
        grid::shift_view_date,
    ),
    components(
        schemas(
            // Bookings
            crate::models::court::Court,
            crate::models::court::CourtInfo,
            crate::models::booking::SlotHour,
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::booking::RenameBooking,
            crate::models::booking::BookingQuery,
            crate::models::booking::RecurringPromotion,
            crate::models::booking::RecurringRemoval,
            crate::models::booking::SlotLockQuery,
            crate::models::booking::SlotLock,
            // Grid
            crate::models::grid::DayGrid,
            crate::models::grid::GridRow,
            crate::models::grid::GridCell,
            crate::models::grid::GridQuery,
            crate::models::grid::ShiftViewDate,
            crate::models::grid::ViewDate,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookings", description = "Court bookings and recurring series"),
        (name = "grid", description = "Day grid and date navigation")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
