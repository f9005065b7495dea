use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvigilatorRequest {
    #[schema(example = "invigilator01")]
    pub username: String,

    #[schema(example = "password123")]
    pub password: String,

    #[serde(default)]
    pub hall_ids: Vec<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignHallsRequest {
    pub hall_ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignHallsResponse {
    pub invigilator_id: i32,
    pub hall_ids: Vec<i32>,
}
