//! HTTP handlers for the form and the JSON API.
//!
//! Each handler validates its input, runs the scheduler, and delegates file
//! encoding to the service layer on the blocking thread pool.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::{info, warn};

use super::dto::{CalculateForm, HealthResponse, ScheduleRequestDto, ScheduleResponse};
use super::error::AppError;
use super::page::{render_page, Download, PageOutcome};
use super::state::AppState;
use crate::models::{ReportMetadata, ScheduleResult};
use crate::services::{self, RenderedReport, ReportError, ReportFormat};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

// =============================================================================
// Form
// =============================================================================

/// GET /
///
/// Empty form; nothing is computed until the form is submitted.
pub async fn index() -> Html<String> {
    Html(render_page(&CalculateForm::default(), &PageOutcome::Empty))
}

/// POST /calculate
///
/// Validate the submission, compute the schedule and render the page with
/// the table and download links for every report format.
pub async fn calculate(State(state): State<AppState>, Form(form): Form<CalculateForm>) -> Response {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        warn!(fields = ?missing, "Rejected appointment form with missing fields");
        return rejected_page(&form, missing);
    }

    let request = match form.to_request() {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected appointment form");
            return rejected_page(&form, vec![e.to_string()]);
        }
    };

    let schedule = match request.compute(&state.schedule) {
        Ok(schedule) => schedule,
        Err(e) => {
            warn!(error = %e, "Schedule computation failed");
            return rejected_page(&form, vec![e.to_string()]);
        }
    };

    info!(
        appointment_type = %request.appointment_type,
        interval = %request.interval_unit,
        count = request.interval_count,
        entries = schedule.len(),
        "Computed appointment schedule"
    );

    let rows = services::report_table(&schedule);
    let reports = match render_all(request.metadata(), schedule).await {
        Ok(reports) => reports,
        Err(e) => {
            warn!(error = %e, "Report generation failed");
            let page = render_page(&form, &PageOutcome::Rejected(vec![e.to_string()]));
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response();
        }
    };

    let outcome = PageOutcome::Computed {
        rows,
        downloads: reports.iter().map(Download::from).collect(),
    };
    Html(render_page(&form, &outcome)).into_response()
}

fn rejected_page(form: &CalculateForm, messages: Vec<String>) -> Response {
    let page = render_page(form, &PageOutcome::Rejected(messages));
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
}

/// Encode the schedule in every report format.
async fn render_all(
    metadata: ReportMetadata,
    schedule: ScheduleResult,
) -> anyhow::Result<Vec<RenderedReport>> {
    let reports = tokio::task::spawn_blocking(move || {
        ReportFormat::ALL
            .into_iter()
            .map(|format| services::render_report(format, &metadata, &schedule))
            .collect::<Result<Vec<_>, ReportError>>()
    })
    .await??;
    Ok(reports)
}

// =============================================================================
// JSON API
// =============================================================================

fn validate(dto: &ScheduleRequestDto) -> Result<crate::models::ScheduleRequest, AppError> {
    if dto.patient_name_missing() {
        return Err(AppError::BadRequest("Patient name is required".to_string()));
    }
    Ok(dto.to_request()?)
}

/// POST /v1/schedule
///
/// Compute a schedule and return it as JSON.
pub async fn compute_schedule(
    State(state): State<AppState>,
    Json(dto): Json<ScheduleRequestDto>,
) -> HandlerResult<ScheduleResponse> {
    let request = validate(&dto)?;
    let schedule = request.compute(&state.schedule)?;

    info!(entries = schedule.len(), "Computed appointment schedule via API");

    Ok(Json(ScheduleResponse::new(&request, &schedule)))
}

/// POST /v1/reports/{format}
///
/// Compute a schedule and return it as a `pdf` or `xlsx` attachment.
pub async fn download_report(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Json(dto): Json<ScheduleRequestDto>,
) -> Result<Response, AppError> {
    let format: ReportFormat = format.parse()?;
    let request = validate(&dto)?;
    let schedule = request.compute(&state.schedule)?;
    let metadata = request.metadata();

    let report = tokio::task::spawn_blocking(move || {
        services::render_report(format, &metadata, &schedule)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    info!(format = %report.format, size = report.bytes.len(), "Served appointment report");

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, report.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
