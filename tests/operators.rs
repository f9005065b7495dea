mod common;

use common::{TEST_HASH_COST, create_admin, create_invigilator, seed, setup_db};
use exam_attendance::entities::sea_orm_active_enums::OperatorRole;
use exam_attendance::error::ServiceError;
use exam_attendance::repositories::InvigilatorRepository;
use exam_attendance::services::operators::{LoginPortal, NewOperator, OperatorService};

#[tokio::test]
async fn test_invigilator_logs_in_through_invigilator_portal_only() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_1]).await;
    let service = OperatorService::with_hash_cost(&db, TEST_HASH_COST);

    let principal = service
        .authenticate(LoginPortal::Invigilator, "inv01", "correct-horse")
        .await
        .unwrap();
    assert_eq!(principal, invigilator);

    let err = service
        .authenticate(LoginPortal::Admin, "inv01", "correct-horse")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AuthenticationFailure));
}

#[tokio::test]
async fn test_admin_without_invigilator_record_cannot_use_invigilator_portal() {
    let db = setup_db().await;
    create_admin(&db, "root").await;
    let service = OperatorService::with_hash_cost(&db, TEST_HASH_COST);

    let principal = service
        .authenticate(LoginPortal::Admin, "root", "correct-horse")
        .await
        .unwrap();
    assert_eq!(principal.role, OperatorRole::Admin);

    let err = service
        .authenticate(LoginPortal::Invigilator, "root", "correct-horse")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AuthenticationFailure));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_fail_alike() {
    let db = setup_db().await;
    create_admin(&db, "root").await;
    let service = OperatorService::with_hash_cost(&db, TEST_HASH_COST);

    let wrong = service
        .authenticate(LoginPortal::Admin, "root", "nope-nope")
        .await
        .unwrap_err();
    let unknown = service
        .authenticate(LoginPortal::Admin, "ghost", "correct-horse")
        .await
        .unwrap_err();
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let db = setup_db().await;
    create_admin(&db, "root").await;

    let err = OperatorService::with_hash_cost(&db, TEST_HASH_COST)
        .create_operator(NewOperator {
            username: "root".into(),
            password: "another-secret".into(),
            role: OperatorRole::Admin,
            hall_ids: Vec::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn test_ensure_admin_is_idempotent() {
    let db = setup_db().await;
    let service = OperatorService::with_hash_cost(&db, TEST_HASH_COST);

    assert!(service.ensure_admin("root", "correct-horse").await.unwrap());
    assert!(!service.ensure_admin("root", "something-else").await.unwrap());

    // The original password still works
    service
        .authenticate(LoginPortal::Admin, "root", "correct-horse")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_assign_halls_replaces_the_set() {
    let db = setup_db().await;
    let seed = seed(&db).await;
    let invigilator = create_invigilator(&db, "inv01", &[seed.hall_1]).await;
    let record = InvigilatorRepository::new(&db)
        .find_by_operator_id(invigilator.operator_id)
        .await
        .unwrap()
        .unwrap();
    let service = OperatorService::with_hash_cost(&db, TEST_HASH_COST);

    let stored = service
        .assign_halls(record.invigilator_id, &[seed.hall_2, seed.hall_2])
        .await
        .unwrap();
    assert_eq!(stored, vec![seed.hall_2]);

    let repo = InvigilatorRepository::new(&db);
    assert!(!repo.is_assigned(invigilator.operator_id, seed.hall_1).await.unwrap());
    assert!(repo.is_assigned(invigilator.operator_id, seed.hall_2).await.unwrap());

    let err = service
        .assign_halls(record.invigilator_id, &[999])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    // A failed replacement leaves the previous set
    assert!(repo.is_assigned(invigilator.operator_id, seed.hall_2).await.unwrap());
}
