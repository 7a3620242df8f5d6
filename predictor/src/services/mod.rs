pub mod inference;

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::models::ApiResponse;

pub use inference::{InferenceAdapter, ModelStatus, PredictionReport};

pub struct AppError(pub common::Error);

impl AppError {
    pub fn bad_request(message: String) -> Self {
        AppError(common::Error::InvalidInput(message))
    }

    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            common::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            common::Error::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            common::Error::SchemaMismatch(_)
            | common::Error::InvalidFeature(_)
            | common::Error::EmptyPrediction
            | common::Error::UnexpectedLabel(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let body = Json(ApiResponse::<()>::error(self.0.to_string()));
        (status_code, body).into_response()
    }
}

impl From<common::Error> for AppError {
    fn from(err: common::Error) -> Self {
        AppError(err)
    }
}
