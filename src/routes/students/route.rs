use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::dto::{ImportRejection, StudentListResponse, StudentQueryParams, StudentResponse};
use crate::config::APP_CONFIG;
use crate::error::{ServiceError, to_http_error};
use crate::extractor::AuthClaims;
use crate::repositories::{StudentFilter, StudentRepository};
use crate::routes::{HttpError, db};
use crate::services::{Capability, ImportSummary, RosterImporter, authorize};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/admin/students", get(get_students))
        .route(
            "/api/v1/admin/students/upload",
            post(upload_roster).layer(DefaultBodyLimit::max(APP_CONFIG.max_upload_bytes)),
        )
}

/// Keeps the status axum assigns, so an over-limit body is a 413.
fn multipart_error_response(context: &str, err: MultipartError) -> Response {
    (err.status(), format!("{}: {}", context, err.body_text())).into_response()
}

fn import_error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::ImportRejected(errors) => {
            let body = ImportRejection {
                message: format!("{} row(s) failed, nothing was imported", errors.len()),
                errors,
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        other => to_http_error(other).into_response(),
    }
}

/// Upload the student roster workbook (multipart field `file`)
#[utoipa::path(
    post,
    path = "/api/v1/admin/students/upload",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Roster imported", body = ImportSummary),
        (status = 400, description = "Missing or unreadable file"),
        (status = 403, description = "Forbidden"),
        (status = 413, description = "File too large"),
        (status = 422, description = "Rows failed to resolve", body = ImportRejection)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn upload_roster(
    AuthClaims(principal): AuthClaims,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportSummary>), Response> {
    let db = db().await.map_err(IntoResponse::into_response)?;
    authorize(db, &principal, Capability::ImportRoster)
        .await
        .map_err(import_error_response)?;

    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error_response("Failed to read multipart", e))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error_response("Failed to read file", e))?;
            file_data = Some(data.to_vec());
            break;
        }
    }

    let file_data = file_data.ok_or_else(|| {
        (StatusCode::BAD_REQUEST, "No file provided".to_string()).into_response()
    })?;

    tracing::info!(
        operator_id = principal.operator_id,
        bytes = file_data.len(),
        "roster upload received"
    );

    let summary = RosterImporter::new(db)
        .import_workbook(&file_data)
        .await
        .map_err(import_error_response)?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// List students with optional filters
#[utoipa::path(
    get,
    path = "/api/v1/admin/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Students by registration number", body = StudentListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_students(
    AuthClaims(principal): AuthClaims,
    Query(params): Query<StudentQueryParams>,
) -> Result<(StatusCode, Json<StudentListResponse>), HttpError> {
    let db = db().await?;
    authorize(db, &principal, Capability::ManageReferenceData)
        .await
        .map_err(to_http_error)?;

    let filter = StudentFilter {
        exam_id: params.exam,
        hall_id: params.hall,
        section_id: params.section,
        search: params.search,
    };
    let students = StudentRepository::new(db)
        .find_filtered(filter)
        .await
        .map_err(|e| to_http_error(e.into()))?;

    let students: Vec<StudentResponse> = students.into_iter().map(Into::into).collect();
    Ok((
        StatusCode::OK,
        Json(StudentListResponse {
            total: students.len(),
            students,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    async fn file_length(mut multipart: Multipart) -> Result<String, Response> {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error_response("Failed to read multipart", e))?;
        let Some(field) = field else {
            return Ok("0".to_string());
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error_response("Failed to read file", e))?;
        Ok(data.len().to_string())
    }

    fn upload(size: usize) -> Request<Body> {
        let body = format!(
            "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"file\"; filename=\"roster.xlsx\"\r\n\r\n{}\r\n--XBOUNDARY--\r\n",
            "a".repeat(size)
        );
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_oversize_upload_is_payload_too_large() {
        let app = Router::new().route(
            "/upload",
            post(file_length).layer(DefaultBodyLimit::max(256)),
        );

        let small = app.clone().oneshot(upload(16)).await.unwrap();
        assert_eq!(small.status(), StatusCode::OK);

        let large = app.oneshot(upload(4096)).await.unwrap();
        assert_eq!(large.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
