use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};

use super::dto::SubmitAttendanceRequest;
use crate::error::to_http_error;
use crate::extractor::AuthClaims;
use crate::routes::{HttpError, db};
use crate::services::attendance_recorder::AssignedHall;
use crate::services::{AttendanceRecorder, HallRoster, SubmissionSummary};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/invigilator/halls", get(get_assigned_halls))
        .route(
            "/api/v1/halls/{hall_id}/attendance",
            get(get_hall_roster).post(submit_attendance),
        )
}

/// Halls assigned to the calling invigilator
#[utoipa::path(
    get,
    path = "/api/v1/invigilator/halls",
    responses(
        (status = 200, description = "Assigned halls", body = Vec<AssignedHall>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_assigned_halls(
    AuthClaims(principal): AuthClaims,
) -> Result<(StatusCode, Json<Vec<AssignedHall>>), HttpError> {
    let db = db().await?;
    let halls = AttendanceRecorder::new(db)
        .assigned_halls(&principal)
        .await
        .map_err(to_http_error)?;
    Ok((StatusCode::OK, Json(halls)))
}

/// Hall roster with current status, by registration number
#[utoipa::path(
    get,
    path = "/api/v1/halls/{hall_id}/attendance",
    params(("hall_id" = i32, Path, description = "Hall id")),
    responses(
        (status = 200, description = "Hall roster", body = HallRoster),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Hall not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_hall_roster(
    AuthClaims(principal): AuthClaims,
    Path(hall_id): Path<i32>,
) -> Result<(StatusCode, Json<HallRoster>), HttpError> {
    let db = db().await?;
    let roster = AttendanceRecorder::new(db)
        .roster(&principal, hall_id)
        .await
        .map_err(to_http_error)?;
    Ok((StatusCode::OK, Json(roster)))
}

/// Record attendance for every student in the hall
#[utoipa::path(
    post,
    path = "/api/v1/halls/{hall_id}/attendance",
    params(("hall_id" = i32, Path, description = "Hall id")),
    request_body = SubmitAttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = SubmissionSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Hall not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn submit_attendance(
    AuthClaims(principal): AuthClaims,
    Path(hall_id): Path<i32>,
    Json(payload): Json<SubmitAttendanceRequest>,
) -> Result<(StatusCode, Json<SubmissionSummary>), HttpError> {
    let db = db().await?;
    let summary = AttendanceRecorder::new(db)
        .submit(&principal, hall_id, &payload.statuses)
        .await
        .map_err(to_http_error)?;
    Ok((StatusCode::OK, Json(summary)))
}
