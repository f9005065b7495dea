use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{post, put},
};

use super::dto::{AssignHallsRequest, AssignHallsResponse, CreateInvigilatorRequest};
use crate::entities::sea_orm_active_enums::OperatorRole;
use crate::error::to_http_error;
use crate::extractor::AuthClaims;
use crate::routes::{HttpError, db};
use crate::services::operators::{NewOperator, OperatorService, ProvisionedOperator};
use crate::services::{Capability, authorize};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/admin/invigilators", post(create_invigilator))
        .route(
            "/api/v1/admin/invigilators/{invigilator_id}/halls",
            put(assign_halls),
        )
}

/// Create an invigilator login with its hall set
#[utoipa::path(
    post,
    path = "/api/v1/admin/invigilators",
    request_body = CreateInvigilatorRequest,
    responses(
        (status = 201, description = "Invigilator created", body = ProvisionedOperator),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Hall not found"),
        (status = 409, description = "Username taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Invigilators"
)]
pub async fn create_invigilator(
    AuthClaims(principal): AuthClaims,
    Json(payload): Json<CreateInvigilatorRequest>,
) -> Result<(StatusCode, Json<ProvisionedOperator>), HttpError> {
    let db = db().await?;
    authorize(db, &principal, Capability::ManageReferenceData)
        .await
        .map_err(to_http_error)?;

    let created = OperatorService::new(db)
        .create_operator(NewOperator {
            username: payload.username,
            password: payload.password,
            role: OperatorRole::Invigilator,
            hall_ids: payload.hall_ids,
        })
        .await
        .map_err(to_http_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace the halls an invigilator may take attendance in
#[utoipa::path(
    put,
    path = "/api/v1/admin/invigilators/{invigilator_id}/halls",
    params(("invigilator_id" = i32, Path, description = "Invigilator id")),
    request_body = AssignHallsRequest,
    responses(
        (status = 200, description = "Halls replaced", body = AssignHallsResponse),
        (status = 404, description = "Invigilator or hall not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Invigilators"
)]
pub async fn assign_halls(
    AuthClaims(principal): AuthClaims,
    Path(invigilator_id): Path<i32>,
    Json(payload): Json<AssignHallsRequest>,
) -> Result<(StatusCode, Json<AssignHallsResponse>), HttpError> {
    let db = db().await?;
    authorize(db, &principal, Capability::ManageReferenceData)
        .await
        .map_err(to_http_error)?;

    let hall_ids = OperatorService::new(db)
        .assign_halls(invigilator_id, &payload.hall_ids)
        .await
        .map_err(to_http_error)?;
    Ok((
        StatusCode::OK,
        Json(AssignHallsResponse {
            invigilator_id,
            hall_ids,
        }),
    ))
}
