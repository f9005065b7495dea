#![allow(dead_code)]

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use rust_xlsxwriter::Workbook;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use exam_attendance::entities::sea_orm_active_enums::{ExamSession, OperatorRole};
use exam_attendance::repositories::{
    BranchRepository, ExamRepository, HallRepository, NewExam, SectionRepository,
    StudentFields, StudentRepository, YearRepository,
};
use exam_attendance::services::Principal;
use exam_attendance::services::operators::{NewOperator, OperatorService};

pub const TEST_HASH_COST: u32 = 4;

pub const ROSTER_HEADER: [&str; 9] = [
    "Reg No", "Name", "Year", "Branch", "Section", "Hall", "Subject", "Exam Date", "Session",
];

/// Fresh in-memory database with migrations applied. A single connection
/// keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Ids of the reference rows created by [`seed`].
pub struct Seed {
    pub year_id: i32,
    pub branch_id: i32,
    pub section_a: i32,
    pub section_b: i32,
    pub exam_id: i32,
    pub other_exam_id: i32,
    pub hall_1: i32,
    pub hall_2: i32,
}

pub fn exam_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
}

/// Year II, branch CSE with sections A and B, "Compiler Design" on
/// 2026-05-04 Session 1 in halls VKJ 101 and VKJ 102, plus a second exam
/// ("Operating Systems", Session 2) with no halls.
pub async fn seed(db: &DatabaseConnection) -> Seed {
    let year = YearRepository::new(db).create("II".into()).await.unwrap();
    let branch = BranchRepository::new(db).create("CSE".into()).await.unwrap();
    let sections = SectionRepository::new(db);
    let section_a = sections
        .create("A".into(), year.year_id, branch.branch_id)
        .await
        .unwrap();
    let section_b = sections
        .create("B".into(), year.year_id, branch.branch_id)
        .await
        .unwrap();

    let exams = ExamRepository::new(db);
    let exam = exams
        .create(NewExam {
            subject: "Compiler Design".into(),
            date: exam_date(),
            session: ExamSession::Session1,
            start_time: None,
        })
        .await
        .unwrap();
    let other_exam = exams
        .create(NewExam {
            subject: "Operating Systems".into(),
            date: exam_date(),
            session: ExamSession::Session2,
            start_time: None,
        })
        .await
        .unwrap();

    let halls = HallRepository::new(db);
    let hall_1 = halls.create("VKJ 101".into(), exam.exam_id).await.unwrap();
    let hall_2 = halls.create("VKJ 102".into(), exam.exam_id).await.unwrap();

    Seed {
        year_id: year.year_id,
        branch_id: branch.branch_id,
        section_a: section_a.section_id,
        section_b: section_b.section_id,
        exam_id: exam.exam_id,
        other_exam_id: other_exam.exam_id,
        hall_1: hall_1.hall_id,
        hall_2: hall_2.hall_id,
    }
}

pub async fn add_student(
    db: &DatabaseConnection,
    seed: &Seed,
    reg_no: &str,
    section_id: i32,
    hall_id: i32,
) -> i32 {
    let (student, _) = StudentRepository::new(db)
        .upsert(
            reg_no,
            StudentFields {
                name: format!("Student {}", reg_no),
                year_id: seed.year_id,
                branch_id: seed.branch_id,
                section_id,
                hall_id,
                exam_id: seed.exam_id,
            },
        )
        .await
        .unwrap();
    student.student_id
}

pub async fn create_admin(db: &DatabaseConnection, username: &str) -> Principal {
    let created = OperatorService::with_hash_cost(db, TEST_HASH_COST)
        .create_operator(NewOperator {
            username: username.into(),
            password: "correct-horse".into(),
            role: OperatorRole::Admin,
            hall_ids: Vec::new(),
        })
        .await
        .unwrap();
    Principal {
        operator_id: created.operator_id,
        username: created.username,
        role: created.role,
    }
}

pub async fn create_invigilator(
    db: &DatabaseConnection,
    username: &str,
    hall_ids: &[i32],
) -> Principal {
    let created = OperatorService::with_hash_cost(db, TEST_HASH_COST)
        .create_operator(NewOperator {
            username: username.into(),
            password: "correct-horse".into(),
            role: OperatorRole::Invigilator,
            hall_ids: hall_ids.to_vec(),
        })
        .await
        .unwrap();
    Principal {
        operator_id: created.operator_id,
        username: created.username,
        role: created.role,
    }
}

/// An xlsx roster: header row, then `rows` as text cells. Empty strings
/// leave the cell blank.
pub fn roster_workbook(rows: &[[&str; 9]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in ROSTER_HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    for (idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string((idx + 1) as u32, col as u16, *value)
                    .unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}
