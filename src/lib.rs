//! Canchita court booking server
//!
//! Keeps the bookings of a small venue ("Padel", "Cancha 1", "Cancha 2") in
//! memory and exposes them over a REST JSON API: one booking per court, hour
//! and date, weekly "Hora Fija" series, and time-based locking of past slots.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
