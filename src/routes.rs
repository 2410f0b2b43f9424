use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::error::AppError;
use crate::report::{shape_for_comparison, shape_single, ComparisonReport};
use crate::templates::{
    render_or_fallback, ComparisonResultsTemplate, HomeTemplate, ResultsTemplate,
};
use crate::units::letter_for_units;
use crate::weather::WeatherProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    city: Option<String>,
    units: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    city1: Option<String>,
    city2: Option<String>,
    units: Option<String>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/results", get(results))
        .route("/comparison_results", get(comparison_results))
        .nest_service("/static", ServeDir::new("static"))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Html<String> {
    Html(render_or_fallback(&HomeTemplate::new(Local::now())))
}

async fn results(
    State(state): State<AppState>,
    Query(params): Query<ResultsQuery>,
) -> Result<Html<String>, AppError> {
    let city = required(params.city, "city")?;
    let units = params.units.as_deref();

    let payload = state.provider.fetch(&city, units).await?;
    let report = shape_single(&payload)?;
    info!("📍 Rendering results for {}", report.city);

    Ok(Html(render_or_fallback(&ResultsTemplate {
        date: Local::now(),
        report,
        units_letter: letter_for_units(units),
    })))
}

async fn comparison_results(
    State(state): State<AppState>,
    Query(params): Query<ComparisonQuery>,
) -> Result<Html<String>, AppError> {
    let city1 = required(params.city1, "city1")?;
    let city2 = required(params.city2, "city2")?;
    let units = params.units.as_deref();
    let units_letter = letter_for_units(units);

    let (payload1, payload2) = tokio::try_join!(
        state.provider.fetch(&city1, units),
        state.provider.fetch(&city2, units),
    )?;

    let report = ComparisonReport::new(
        Local::now(),
        shape_for_comparison(&payload1, units_letter)?,
        shape_for_comparison(&payload2, units_letter)?,
    );
    info!(
        "⚖️  Rendering comparison of {} and {}",
        report.city1_info.city, report.city2_info.city
    );

    Ok(Html(render_or_fallback(&ComparisonResultsTemplate { report })))
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("'{}' is required", name))),
    }
}
