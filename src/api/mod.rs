//! API handlers for Canchita REST endpoints

pub mod bookings;
pub mod extract;
pub mod grid;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // The mobile client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Courts
        .route("/courts", get(bookings::list_courts))
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/bookings/:id",
            get(bookings::get_booking)
                .patch(bookings::rename_booking)
                .delete(bookings::delete_booking),
        )
        .route(
            "/bookings/:id/recurring",
            post(bookings::promote_booking).delete(bookings::unfix_booking),
        )
        .route("/slots/lock", get(bookings::slot_lock))
        // Grid
        .route("/grid", get(grid::get_grid))
        .route("/view-date", get(grid::get_view_date))
        .route("/view-date/shift", post(grid::shift_view_date))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
