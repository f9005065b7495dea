mod common;

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use common::{add_student, create_admin, create_invigilator, seed, setup_db};
use exam_attendance::entities::attendance;
use exam_attendance::entities::sea_orm_active_enums::AttendanceStatus;
use exam_attendance::error::ServiceError;
use exam_attendance::repositories::AttendanceRepository;
use exam_attendance::services::AttendanceRecorder;
use sea_orm::{EntityTrait, PaginatorTrait};

fn statuses(pairs: &[(&str, AttendanceStatus)]) -> HashMap<String, AttendanceStatus> {
    pairs
        .iter()
        .map(|(reg_no, status)| (reg_no.to_string(), *status))
        .collect()
}

#[tokio::test]
async fn test_roster_defaults_to_present_in_reg_no_order() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    add_student(&db, &seed, "R2", seed.section_a, seed.hall_1).await;
    add_student(&db, &seed, "R1", seed.section_a, seed.hall_1).await;
    add_student(&db, &seed, "R3", seed.section_a, seed.hall_2).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_1]).await;

    let roster = AttendanceRecorder::new(&db)
        .roster(&invigilator, seed.hall_1)
        .await
        .unwrap();

    let reg_nos: Vec<&str> = roster.students.iter().map(|s| s.reg_no.as_str()).collect();
    assert_eq!(reg_nos, vec!["R1", "R2"]);
    assert!(
        roster
            .students
            .iter()
            .all(|s| s.status == AttendanceStatus::Present && !s.recorded)
    );
    assert_eq!(roster.students[0].subject, "Compiler Design");
}

#[tokio::test]
async fn test_unsubmitted_students_are_recorded_present() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let r1 = add_student(&db, &seed, "R1", seed.section_a, seed.hall_1).await;
    let r2 = add_student(&db, &seed, "R2", seed.section_a, seed.hall_1).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_1]).await;

    let summary = AttendanceRecorder::new(&db)
        .submit(
            &invigilator,
            seed.hall_1,
            &statuses(&[("R1", AttendanceStatus::Absent)]),
        )
        .await
        .unwrap();
    assert_eq!(summary.recorded, 2);
    assert_eq!(summary.absent, 1);
    assert_eq!(summary.present, 1);
    assert!(summary.ignored.is_empty());

    let repo = AttendanceRepository::new(&db);
    let r1_status = repo.find_by_student(r1).await.unwrap().unwrap().status;
    let r2_status = repo.find_by_student(r2).await.unwrap().unwrap().status;
    assert_eq!(r1_status, AttendanceStatus::Absent);
    assert_eq!(r2_status, AttendanceStatus::Present);
}

#[tokio::test]
async fn test_resubmission_overwrites_status_and_keeps_timestamp() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let r1 = add_student(&db, &seed, "R1", seed.section_a, seed.hall_1).await;
    let admin = create_admin(&db, "root").await;
    let recorder = AttendanceRecorder::new(&db);

    let first = NaiveDate::from_ymd_opt(2026, 5, 4)
        .unwrap()
        .and_hms_opt(9, 40, 0)
        .unwrap();
    recorder
        .submit_at(
            &admin,
            seed.hall_1,
            &statuses(&[("R1", AttendanceStatus::Absent)]),
            first,
        )
        .await
        .unwrap();
    recorder
        .submit_at(
            &admin,
            seed.hall_1,
            &statuses(&[("R1", AttendanceStatus::Present)]),
            first + Duration::minutes(30),
        )
        .await
        .unwrap();

    assert_eq!(attendance::Entity::find().count(&db).await.unwrap(), 1);
    let record = AttendanceRepository::new(&db)
        .find_by_student(r1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.timestamp, first);

    let roster = recorder.roster(&admin, seed.hall_1).await.unwrap();
    assert!(roster.students[0].recorded);
}

#[tokio::test]
async fn test_unassigned_invigilator_is_refused_and_admin_is_not() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    add_student(&db, &seed, "R1", seed.section_a, seed.hall_2).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_1]).await;
    let admin = create_admin(&db, "root").await;
    let recorder = AttendanceRecorder::new(&db);

    let err = recorder.roster(&invigilator, seed.hall_2).await.unwrap_err();
    assert!(matches!(err, ServiceError::AuthorizationFailure));

    let err = recorder
        .submit(&invigilator, seed.hall_2, &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AuthorizationFailure));
    assert_eq!(attendance::Entity::find().count(&db).await.unwrap(), 0);

    let summary = recorder
        .submit(&admin, seed.hall_2, &HashMap::new())
        .await
        .unwrap();
    assert_eq!(summary.recorded, 1);
}

#[tokio::test]
async fn test_unknown_hall_is_not_found() {
    let db = setup_db().await;
    seed(&db).await;
    let invigilator = create_invigilator(&db, "inv01", &[]).await;

    let err = AttendanceRecorder::new(&db)
        .roster(&invigilator, 999)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn test_registration_numbers_outside_the_hall_are_ignored() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    add_student(&db, &seed, "R1", seed.section_a, seed.hall_1).await;
    add_student(&db, &seed, "R9", seed.section_a, seed.hall_2).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_1]).await;

    let summary = AttendanceRecorder::new(&db)
        .submit(
            &invigilator,
            seed.hall_1,
            &statuses(&[
                (" R1 ", AttendanceStatus::Absent),
                ("R9", AttendanceStatus::Absent),
                ("NOPE", AttendanceStatus::Absent),
            ]),
        )
        .await
        .unwrap();

    assert_eq!(summary.recorded, 1);
    assert_eq!(summary.absent, 1);
    assert_eq!(summary.ignored, vec!["NOPE".to_string(), "R9".to_string()]);
    // R9 sits in another hall and stays unrecorded
    assert_eq!(attendance::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_assigned_halls_lists_only_own_halls() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_2]).await;

    let halls = AttendanceRecorder::new(&db)
        .assigned_halls(&invigilator)
        .await
        .unwrap();
    assert_eq!(halls.len(), 1);
    assert_eq!(halls[0].hall_id, seed.hall_2);
    assert_eq!(halls[0].hall_no, "VKJ 102");
    assert_eq!(halls[0].exam, "Compiler Design - 2026-05-04 - Session 1");
}

#[tokio::test]
async fn test_keys_equal_after_trimming_are_rejected() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let r1 = add_student(&db, &seed, "R1", seed.section_a, seed.hall_1).await;
    let admin = create_admin(&db, "root").await;

    let submitted = statuses(&[
        ("R1", AttendanceStatus::Absent),
        (" R1", AttendanceStatus::Present),
    ]);
    let err = AttendanceRecorder::new(&db)
        .submit(&admin, seed.hall_1, &submitted)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MalformedInput(_)));

    let record = AttendanceRepository::new(&db).find_by_student(r1).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_repository_upsert_updates_status_in_place() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let r1 = add_student(&db, &seed, "R1", seed.section_a, seed.hall_1).await;
    let first = NaiveDate::from_ymd_opt(2026, 5, 4)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let repo = AttendanceRepository::new(&db);
    repo.upsert(r1, AttendanceStatus::Absent, first).await.unwrap();
    repo.upsert(r1, AttendanceStatus::Present, first + Duration::hours(2))
        .await
        .unwrap();

    assert_eq!(attendance::Entity::find().count(&db).await.unwrap(), 1);
    let record = repo.find_by_student(r1).await.unwrap().unwrap();
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.timestamp, first);
}
