use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::sea_orm_active_enums::{AttendanceStatus, ExamSession, OperatorRole};
use crate::error::RowError;
use crate::routes;
use crate::services::attendance_recorder::{AssignedHall, RosterEntry};
use crate::services::operators::ProvisionedOperator;
use crate::services::reporting::{
    AbsentStudent, Dashboard, DashboardRow, ExamOption, SectionAbsenteeReport, SectionAbsentees,
};
use crate::services::{HallRoster, ImportSummary, SubmissionSummary};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exam Attendance API",
        description = "Exam hall attendance: roster upload, invigilator attendance and reports"
    ),
    paths(
        routes::health::route::health,
        routes::auth::route::invigilator_login,
        routes::auth::route::admin_login,
        routes::attendance::route::get_assigned_halls,
        routes::attendance::route::get_hall_roster,
        routes::attendance::route::submit_attendance,
        routes::reports::route::get_dashboard,
        routes::reports::route::get_section_absentees,
        routes::reports::route::export_attendance,
        routes::students::route::upload_roster,
        routes::students::route::get_students,
        routes::reference::route::get_years,
        routes::reference::route::create_year,
        routes::reference::route::get_branches,
        routes::reference::route::create_branch,
        routes::reference::route::get_sections,
        routes::reference::route::create_section,
        routes::reference::route::get_exams,
        routes::reference::route::create_exam,
        routes::reference::route::get_halls,
        routes::reference::route::create_hall,
        routes::invigilators::route::create_invigilator,
        routes::invigilators::route::assign_halls,
    ),
    components(schemas(
        AttendanceStatus,
        ExamSession,
        OperatorRole,
        RowError,
        RosterEntry,
        HallRoster,
        SubmissionSummary,
        AssignedHall,
        ImportSummary,
        Dashboard,
        DashboardRow,
        ExamOption,
        AbsentStudent,
        SectionAbsentees,
        SectionAbsenteeReport,
        ProvisionedOperator,
        routes::auth::dto::LoginRequest,
        routes::auth::dto::LoginResponse,
        routes::attendance::dto::SubmitAttendanceRequest,
        routes::students::dto::StudentResponse,
        routes::students::dto::StudentListResponse,
        routes::students::dto::ImportRejection,
        routes::reference::dto::CreateNamedRequest,
        routes::reference::dto::NamedResponse,
        routes::reference::dto::CreateSectionRequest,
        routes::reference::dto::SectionResponse,
        routes::reference::dto::CreateExamRequest,
        routes::reference::dto::ExamResponse,
        routes::reference::dto::CreateHallRequest,
        routes::reference::dto::HallResponse,
        routes::invigilators::dto::CreateInvigilatorRequest,
        routes::invigilators::dto::AssignHallsRequest,
        routes::invigilators::dto::AssignHallsResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Operator login"),
        (name = "Attendance", description = "Hall rosters and attendance submission"),
        (name = "Reports", description = "Dashboard, absentees and export"),
        (name = "Students", description = "Roster upload and student list"),
        (name = "Reference data", description = "Years, branches, sections, exams and halls"),
        (name = "Invigilators", description = "Invigilator accounts and hall assignment"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_attendance_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/halls/{hall_id}/attendance"));
        assert!(doc.paths.paths.contains_key("/api/v1/admin/exams/{exam_id}/export"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
