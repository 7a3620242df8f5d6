use serde::{Deserialize, Serialize};

use crate::form::ReservationForm;

// Request models
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub reservation: ReservationForm,
    /// Overrides the configured debug toggle for this request.
    pub debug: Option<bool>,
}

/// Debug checkbox of the HTML form; present only when ticked.
#[derive(Debug, Default, Deserialize)]
pub struct DebugToggle {
    pub debug: Option<String>,
}

impl DebugToggle {
    pub fn enabled(&self) -> bool {
        self.debug.is_some()
    }
}

// Response models
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    /// Failed operation that still has a payload worth returning.
    pub fn failure(data: T, message: String) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_ready: bool,
}
