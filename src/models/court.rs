//! Courts available for booking

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Physical court, in grid column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Court {
    #[serde(rename = "padel")]
    Padel,
    #[serde(rename = "cancha_1")]
    Cancha1,
    #[serde(rename = "cancha_2")]
    Cancha2,
}

impl Court {
    pub const ALL: [Court; 3] = [Court::Padel, Court::Cancha1, Court::Cancha2];

    /// Display label shown as the grid column header
    pub fn label(&self) -> &'static str {
        match self {
            Court::Padel => "Padel",
            Court::Cancha1 => "Cancha 1",
            Court::Cancha2 => "Cancha 2",
        }
    }
}

impl std::fmt::Display for Court {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Court with its display label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourtInfo {
    pub court: Court,
    pub label: String,
}

impl From<Court> for CourtInfo {
    fn from(court: Court) -> Self {
        Self {
            court,
            label: court.label().to_string(),
        }
    }
}
