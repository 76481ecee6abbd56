//! Failure taxonomy for forecast lookups.

use thiserror::Error;

/// What went wrong while fetching or decoding a forecast.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("City not found")]
    CityNotFound,

    #[error("Forecast request failed with status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed forecast JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid forecast data: {0}")]
    InvalidPayload(String),
}

/// The two user-facing failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 404: the user typed a city the API does not know.
    CityNotFound,
    /// Any other status, transport failure or unreadable payload.
    RequestFailed,
}

impl ForecastError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::CityNotFound => FailureKind::CityNotFound,
            Self::Status(_) | Self::Transport(_) | Self::Malformed(_) | Self::InvalidPayload(_) => {
                FailureKind::RequestFailed
            }
        }
    }
}

impl FailureKind {
    /// Text shown in the transient notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CityNotFound => "Cette ville est introuvable 🤨",
            Self::RequestFailed => {
                "Impossible d'effectuer la requête 😬\nVérifiez votre connexion internet"
            }
        }
    }
}
