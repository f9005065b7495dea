use std::collections::HashMap;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::AttendanceStatus;

/// Status per registration number. Students of the hall left out are
/// recorded Present.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttendanceRequest {
    #[serde(default)]
    #[schema(example = json!({"21CS001": "Absent"}))]
    pub statuses: HashMap<String, AttendanceStatus>,
}
