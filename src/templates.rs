use askama::Template;
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Local};
use tracing::error;

use crate::report::{ComparisonReport, WeatherReport};

/// How far back the home page's date picker reaches.
pub const HISTORY_DAYS: i64 = 5;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub min_date: DateTime<Local>,
    pub max_date: DateTime<Local>,
}

impl HomeTemplate {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            min_date: now - Duration::days(HISTORY_DAYS),
            max_date: now,
        }
    }
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub date: DateTime<Local>,
    pub report: WeatherReport,
    pub units_letter: &'static str,
}

#[derive(Template)]
#[template(path = "comparison_results.html")]
pub struct ComparisonResultsTemplate {
    pub report: ComparisonReport,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: String,
    pub message: String,
}

impl ErrorTemplate {
    pub fn render_page(status: StatusCode, message: &str) -> String {
        render_or_fallback(&ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.to_string(),
        })
    }
}

pub fn render_or_fallback<T: Template>(template: &T) -> String {
    template.render().unwrap_or_else(|e| {
        error!("Template rendering error: {}", e);
        format!("Template error: {}", e)
    })
}
