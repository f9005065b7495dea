use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{StatusCode, header},
    response::Response,
    routing::get,
};

use super::dto::DashboardQuery;
use crate::config::EXPORT_CONTENT_TYPE;
use crate::error::to_http_error;
use crate::extractor::AuthClaims;
use crate::routes::{HttpError, db};
use crate::services::reporting::{Dashboard, SectionAbsenteeReport};
use crate::services::{Capability, Reporting, authorize};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/admin/attendance", get(get_dashboard))
        .route(
            "/api/v1/admin/exams/{exam_id}/section-absentees",
            get(get_section_absentees),
        )
        .route("/api/v1/admin/exams/{exam_id}/export", get(export_attendance))
}

/// Attendance dashboard, optionally filtered by exam
#[utoipa::path(
    get,
    path = "/api/v1/admin/attendance",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Attendance records", body = Dashboard),
        (status = 400, description = "Invalid pagination"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn get_dashboard(
    AuthClaims(principal): AuthClaims,
    Query(query): Query<DashboardQuery>,
) -> Result<(StatusCode, Json<Dashboard>), HttpError> {
    let db = db().await?;
    authorize(db, &principal, Capability::ReviewAttendance)
        .await
        .map_err(to_http_error)?;

    let dashboard = Reporting::new(db)
        .dashboard(query.exam, query.pagination())
        .await
        .map_err(to_http_error)?;
    Ok((StatusCode::OK, Json(dashboard)))
}

/// Absent students of an exam grouped by section
#[utoipa::path(
    get,
    path = "/api/v1/admin/exams/{exam_id}/section-absentees",
    params(("exam_id" = i32, Path, description = "Exam id")),
    responses(
        (status = 200, description = "Absentees by section", body = SectionAbsenteeReport),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Exam not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn get_section_absentees(
    AuthClaims(principal): AuthClaims,
    Path(exam_id): Path<i32>,
) -> Result<(StatusCode, Json<SectionAbsenteeReport>), HttpError> {
    let db = db().await?;
    authorize(db, &principal, Capability::ReviewAttendance)
        .await
        .map_err(to_http_error)?;

    let report = Reporting::new(db)
        .section_absentees(exam_id)
        .await
        .map_err(to_http_error)?;
    Ok((StatusCode::OK, Json(report)))
}

/// Download the exam's attendance as an xlsx workbook
#[utoipa::path(
    get,
    path = "/api/v1/admin/exams/{exam_id}/export",
    params(("exam_id" = i32, Path, description = "Exam id")),
    responses(
        (status = 200, description = "Attendance workbook", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Exam not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn export_attendance(
    AuthClaims(principal): AuthClaims,
    Path(exam_id): Path<i32>,
) -> Result<Response, HttpError> {
    let db = db().await?;
    authorize(db, &principal, Capability::ReviewAttendance)
        .await
        .map_err(to_http_error)?;

    let file = Reporting::new(db)
        .export_workbook(exam_id)
        .await
        .map_err(to_http_error)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, EXPORT_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", file.filename),
        )
        .body(Body::from(file.bytes))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build response: {}", e),
            )
        })
}
