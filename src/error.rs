use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::templates::ErrorTemplate;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather response is missing `{field}`{}", provider_suffix(.provider_message))]
    MissingField {
        field: &'static str,
        provider_message: Option<String>,
    },

    #[error("weather response has out-of-range timestamp {0}")]
    InvalidTimestamp(i64),
}

fn provider_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({})", m),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Weather(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::BadRequest(msg) => warn!("Rejected request: {}", msg),
            AppError::Weather(e) => error!("Weather lookup failed: {}", e),
        }

        (status, Html(ErrorTemplate::render_page(status, &self.to_string()))).into_response()
    }
}
