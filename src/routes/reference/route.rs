use axum::{Json, Router, http::StatusCode, routing::get};
use sea_orm::DatabaseConnection;

use super::dto::{
    CreateExamRequest, CreateHallRequest, CreateNamedRequest, CreateSectionRequest, ExamResponse,
    HallResponse, NamedResponse, SectionResponse,
};
use crate::error::{ServiceError, to_http_error};
use crate::extractor::AuthClaims;
use crate::repositories::{
    BranchRepository, ExamRepository, HallRepository, NewExam, SectionRepository,
    YearRepository,
};
use crate::routes::{HttpError, db};
use crate::services::{Capability, Principal, authorize};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/admin/years", get(get_years).post(create_year))
        .route("/api/v1/admin/branches", get(get_branches).post(create_branch))
        .route("/api/v1/admin/sections", get(get_sections).post(create_section))
        .route("/api/v1/admin/exams", get(get_exams).post(create_exam))
        .route("/api/v1/admin/halls", get(get_halls).post(create_hall))
}

fn db_error(e: anyhow::Error) -> HttpError {
    to_http_error(ServiceError::Internal(e))
}

fn required(value: &str, field: &str) -> Result<String, HttpError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(to_http_error(ServiceError::MalformedInput(format!(
            "{} must not be empty",
            field
        ))));
    }
    Ok(value.to_string())
}

async fn admin_only(principal: &Principal) -> Result<&'static DatabaseConnection, HttpError> {
    let db = db().await?;
    authorize(db, principal, Capability::ManageReferenceData)
        .await
        .map_err(to_http_error)?;
    Ok(db)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/years",
    responses((status = 200, description = "All years", body = Vec<NamedResponse>)),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn get_years(
    AuthClaims(principal): AuthClaims,
) -> Result<(StatusCode, Json<Vec<NamedResponse>>), HttpError> {
    let db = admin_only(&principal).await?;
    let years = YearRepository::new(db).find_all().await.map_err(db_error)?;
    Ok((StatusCode::OK, Json(years.into_iter().map(Into::into).collect())))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/years",
    request_body = CreateNamedRequest,
    responses(
        (status = 201, description = "Year created", body = NamedResponse),
        (status = 400, description = "Bad request")
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn create_year(
    AuthClaims(principal): AuthClaims,
    Json(payload): Json<CreateNamedRequest>,
) -> Result<(StatusCode, Json<NamedResponse>), HttpError> {
    let db = admin_only(&principal).await?;
    let name = required(&payload.name, "name")?;
    let year = YearRepository::new(db).create(name).await.map_err(db_error)?;
    Ok((StatusCode::CREATED, Json(year.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/branches",
    responses((status = 200, description = "All branches", body = Vec<NamedResponse>)),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn get_branches(
    AuthClaims(principal): AuthClaims,
) -> Result<(StatusCode, Json<Vec<NamedResponse>>), HttpError> {
    let db = admin_only(&principal).await?;
    let branches = BranchRepository::new(db).find_all().await.map_err(db_error)?;
    Ok((StatusCode::OK, Json(branches.into_iter().map(Into::into).collect())))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/branches",
    request_body = CreateNamedRequest,
    responses(
        (status = 201, description = "Branch created", body = NamedResponse),
        (status = 400, description = "Bad request")
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn create_branch(
    AuthClaims(principal): AuthClaims,
    Json(payload): Json<CreateNamedRequest>,
) -> Result<(StatusCode, Json<NamedResponse>), HttpError> {
    let db = admin_only(&principal).await?;
    let name = required(&payload.name, "name")?;
    let branch = BranchRepository::new(db).create(name).await.map_err(db_error)?;
    Ok((StatusCode::CREATED, Json(branch.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/sections",
    responses((status = 200, description = "All sections", body = Vec<SectionResponse>)),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn get_sections(
    AuthClaims(principal): AuthClaims,
) -> Result<(StatusCode, Json<Vec<SectionResponse>>), HttpError> {
    let db = admin_only(&principal).await?;
    let sections = SectionRepository::new(db).find_all().await.map_err(db_error)?;
    Ok((StatusCode::OK, Json(sections.into_iter().map(Into::into).collect())))
}

/// Create a section under a year and branch
#[utoipa::path(
    post,
    path = "/api/v1/admin/sections",
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = SectionResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Year or branch not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn create_section(
    AuthClaims(principal): AuthClaims,
    Json(payload): Json<CreateSectionRequest>,
) -> Result<(StatusCode, Json<SectionResponse>), HttpError> {
    let db = admin_only(&principal).await?;
    let name = required(&payload.name, "name")?;

    YearRepository::new(db)
        .find_by_id(payload.year_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| to_http_error(ServiceError::not_found("Year", payload.year_id)))?;
    BranchRepository::new(db)
        .find_by_id(payload.branch_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| to_http_error(ServiceError::not_found("Branch", payload.branch_id)))?;

    let section = SectionRepository::new(db)
        .create(name, payload.year_id, payload.branch_id)
        .await
        .map_err(db_error)?;
    Ok((StatusCode::CREATED, Json(section.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/exams",
    responses((status = 200, description = "Exams by date and session", body = Vec<ExamResponse>)),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn get_exams(
    AuthClaims(principal): AuthClaims,
) -> Result<(StatusCode, Json<Vec<ExamResponse>>), HttpError> {
    let db = admin_only(&principal).await?;
    let exams = ExamRepository::new(db).find_all().await.map_err(db_error)?;
    Ok((StatusCode::OK, Json(exams.into_iter().map(Into::into).collect())))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/exams",
    request_body = CreateExamRequest,
    responses(
        (status = 201, description = "Exam created", body = ExamResponse),
        (status = 400, description = "Bad request")
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn create_exam(
    AuthClaims(principal): AuthClaims,
    Json(payload): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<ExamResponse>), HttpError> {
    let db = admin_only(&principal).await?;
    let subject = required(&payload.subject, "subject")?;

    let exam = ExamRepository::new(db)
        .create(NewExam {
            subject,
            date: payload.date,
            session: payload.session,
            start_time: payload.start_time,
        })
        .await
        .map_err(db_error)?;
    Ok((StatusCode::CREATED, Json(exam.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/halls",
    responses((status = 200, description = "All halls", body = Vec<HallResponse>)),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn get_halls(
    AuthClaims(principal): AuthClaims,
) -> Result<(StatusCode, Json<Vec<HallResponse>>), HttpError> {
    let db = admin_only(&principal).await?;
    let halls = HallRepository::new(db).find_all().await.map_err(db_error)?;
    Ok((StatusCode::OK, Json(halls.into_iter().map(Into::into).collect())))
}

/// Create a hall for an exam
#[utoipa::path(
    post,
    path = "/api/v1/admin/halls",
    request_body = CreateHallRequest,
    responses(
        (status = 201, description = "Hall created", body = HallResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Exam not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn create_hall(
    AuthClaims(principal): AuthClaims,
    Json(payload): Json<CreateHallRequest>,
) -> Result<(StatusCode, Json<HallResponse>), HttpError> {
    let db = admin_only(&principal).await?;
    let hall_no = required(&payload.hall_no, "hallNo")?;

    ExamRepository::new(db)
        .find_by_id(payload.exam_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| to_http_error(ServiceError::not_found("Exam", payload.exam_id)))?;

    let hall = HallRepository::new(db)
        .create(hall_no, payload.exam_id)
        .await
        .map_err(db_error)?;
    Ok((StatusCode::CREATED, Json(hall.into())))
}
