mod common;

use common::{roster_workbook, seed, setup_db};
use exam_attendance::entities::student;
use exam_attendance::error::ServiceError;
use exam_attendance::repositories::StudentRepository;
use exam_attendance::services::RosterImporter;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sea_orm::{EntityTrait, PaginatorTrait};

const ROW_1: [&str; 9] = [
    "21CS001", "Asha", "II", "CSE", "A", "VKJ 101", "Compiler Design", "2026-05-04", "Session 1",
];
const ROW_2: [&str; 9] = [
    "21CS002", "Bala", "ii", "cse", "b", "vkj 102", "compiler design", "2026-05-04 09:30:00",
    "session 1",
];

#[tokio::test]
async fn test_import_creates_students_with_resolved_references() {
    let db = setup_db().await;
    let seed = seed(&db).await;

    let bytes = roster_workbook(&[ROW_1, ROW_2]);
    let summary = RosterImporter::new(&db).import_workbook(&bytes).await.unwrap();
    assert_eq!(summary.created, 2);
    assert_eq!(summary.updated, 0);

    let students = StudentRepository::new(&db);
    let asha = students.find_by_reg_no("21CS001").await.unwrap().unwrap();
    assert_eq!(asha.section_id, seed.section_a);
    assert_eq!(asha.hall_id, seed.hall_1);
    assert_eq!(asha.exam_id, seed.exam_id);

    // Lower-case names and a timestamp date still resolve
    let bala = students.find_by_reg_no("21CS002").await.unwrap().unwrap();
    assert_eq!(bala.section_id, seed.section_b);
    assert_eq!(bala.hall_id, seed.hall_2);
    assert_eq!(bala.exam_id, seed.exam_id);
}

#[tokio::test]
async fn test_reimport_updates_instead_of_duplicating() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let importer = RosterImporter::new(&db);

    importer
        .import_workbook(&roster_workbook(&[ROW_1]))
        .await
        .unwrap();

    let mut moved = ROW_1;
    moved[1] = "Asha K";
    moved[4] = "B";
    moved[5] = "VKJ 102";
    let summary = importer
        .import_workbook(&roster_workbook(&[moved]))
        .await
        .unwrap();
    assert_eq!(summary.created, 0);
    assert_eq!(summary.updated, 1);

    assert_eq!(student::Entity::find().count(&db).await.unwrap(), 1);
    let asha = StudentRepository::new(&db)
        .find_by_reg_no("21CS001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asha.name, "Asha K");
    assert_eq!(asha.section_id, seed.section_b);
    assert_eq!(asha.hall_id, seed.hall_2);
}

#[tokio::test]
async fn test_unknown_branch_rejects_whole_upload() {
    let db = setup_db().await;
    seed(&db).await;

    let mut bad = ROW_2;
    bad[3] = "MECH";
    let err = RosterImporter::new(&db)
        .import_workbook(&roster_workbook(&[ROW_1, bad]))
        .await
        .unwrap_err();

    let errors = match err {
        ServiceError::ImportRejected(errors) => errors,
        other => panic!("expected import rejection, got {other:?}"),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 3);
    assert_eq!(errors[0].reg_no, "21CS002");
    assert!(errors[0].error.contains("Branch 'MECH' does not exist"));

    // The valid row was not written either
    assert_eq!(student::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_section_from_another_branch_does_not_resolve() {
    let db = setup_db().await;
    seed(&db).await;

    let mut bad = ROW_1;
    bad[4] = "C";
    let err = RosterImporter::new(&db)
        .import_workbook(&roster_workbook(&[bad]))
        .await
        .unwrap_err();
    let errors = match err {
        ServiceError::ImportRejected(errors) => errors,
        other => panic!("expected import rejection, got {other:?}"),
    };
    assert!(errors[0].error.starts_with("Section"));
}

#[tokio::test]
async fn test_blank_registration_rows_are_skipped() {
    let db = setup_db().await;
    seed(&db).await;

    let mut blank = ROW_2;
    blank[0] = "";
    let summary = RosterImporter::new(&db)
        .import_workbook(&roster_workbook(&[ROW_1, blank]))
        .await
        .unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped_blank, 1);
}

#[tokio::test]
async fn test_serial_exam_date_with_time_is_truncated() {
    let db = setup_db().await;
    let seed = seed(&db).await;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Reg No").unwrap();
    for (col, value) in ROW_1.iter().enumerate().filter(|(col, _)| *col != 7) {
        sheet.write_string(1, col as u16, *value).unwrap();
    }
    // 2026-05-04 14:00 as a day serial
    sheet.write_number(1, 7, 46146.583333).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let summary = RosterImporter::new(&db).import_workbook(&bytes).await.unwrap();
    assert_eq!(summary.created, 1);
    let asha = StudentRepository::new(&db)
        .find_by_reg_no("21CS001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asha.exam_id, seed.exam_id);
}

#[tokio::test]
async fn test_date_formatted_exam_date_is_accepted() {
    let db = setup_db().await;
    let seed = seed(&db).await;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Reg No").unwrap();
    for (col, value) in ROW_1.iter().enumerate().filter(|(col, _)| *col != 7) {
        sheet.write_string(1, col as u16, *value).unwrap();
    }
    let stamp = ExcelDateTime::from_ymd(2026, 5, 4)
        .unwrap()
        .and_hms(9, 30, 0)
        .unwrap();
    let format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    sheet.write_datetime_with_format(1, 7, &stamp, &format).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let summary = RosterImporter::new(&db).import_workbook(&bytes).await.unwrap();
    assert_eq!(summary.created, 1);
    let asha = StudentRepository::new(&db)
        .find_by_reg_no("21CS001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asha.exam_id, seed.exam_id);
    assert_eq!(asha.hall_id, seed.hall_1);
}

#[tokio::test]
async fn test_unreadable_upload_is_malformed() {
    let db = setup_db().await;
    let err = RosterImporter::new(&db)
        .import_workbook(b"reg_no,name\n21CS001,Asha\n")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MalformedInput(_)));
}
