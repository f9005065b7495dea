//! `SeaORM` active enums stored as strings

use std::fmt;

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AttendanceStatus {
    #[default]
    #[sea_orm(string_value = "Present")]
    Present,
    #[sea_orm(string_value = "Absent")]
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ExamSession {
    #[default]
    #[sea_orm(string_value = "Session 1")]
    #[serde(rename = "Session 1")]
    Session1,
    #[sea_orm(string_value = "Session 2")]
    #[serde(rename = "Session 2")]
    Session2,
    #[sea_orm(string_value = "Session 3")]
    #[serde(rename = "Session 3")]
    Session3,
    #[sea_orm(string_value = "Session 4")]
    #[serde(rename = "Session 4")]
    Session4,
}

impl ExamSession {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamSession::Session1 => "Session 1",
            ExamSession::Session2 => "Session 2",
            ExamSession::Session3 => "Session 3",
            ExamSession::Session4 => "Session 4",
        }
    }

    /// Case-insensitive match against the stored labels, e.g. `"session 2"`.
    pub fn parse_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::iter().find(|session| session.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OperatorRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "invigilator")]
    Invigilator,
}

impl OperatorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorRole::Admin => "admin",
            OperatorRole::Invigilator => "invigilator",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_labels_parse_case_insensitively() {
        assert_eq!(ExamSession::parse_label("session 3"), Some(ExamSession::Session3));
        assert_eq!(ExamSession::parse_label("  SESSION 1 "), Some(ExamSession::Session1));
        assert_eq!(ExamSession::parse_label("Session 5"), None);
        assert_eq!(ExamSession::parse_label("FN"), None);
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&AttendanceStatus::Absent).unwrap();
        assert_eq!(json, "\"Absent\"");
        let session: ExamSession = serde_json::from_str("\"Session 4\"").unwrap();
        assert_eq!(session, ExamSession::Session4);
    }
}
