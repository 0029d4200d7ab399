use super::*;

/// Tests forming a draft.
///
/// Expected: Ok with formed status and the given forming date
#[tokio::test]
async fn marks_request_formed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_draft(db, 1).await?;
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    let repo = SearchingRequestRepository::new(db);
    let formed = repo.mark_formed(draft.id, now).await?;

    assert_eq!(formed.status, RequestStatus::Formed);
    assert_eq!(formed.forming_date, Some(now));
    assert_eq!(formed.description, draft.description);

    Ok(())
}

/// Tests completing a request with an analysis outcome.
///
/// Expected: Ok with moderator, completion date and both figures stored
#[tokio::test]
async fn marks_request_completed_with_outcome() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let formed = factory::create_request(db, 1, RequestStatus::Formed).await?;
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap();

    let repo = SearchingRequestRepository::new(db);
    let completed = repo
        .mark_resolved(
            formed.id,
            RequestStatus::Completed,
            42,
            now,
            Some(AnalysisOutcome {
                coverage: 50.0,
                coefficient: 0.5,
            }),
        )
        .await?;

    assert_eq!(completed.status, RequestStatus::Completed);
    assert_eq!(completed.moderator_id, Some(42));
    assert_eq!(completed.completion_date, Some(now));
    assert_eq!(completed.coverage, Some(50.0));
    assert_eq!(completed.coefficient, Some(0.5));
    assert_eq!(completed.forming_date, formed.forming_date);

    Ok(())
}

/// Tests rejecting a request without an outcome.
///
/// Expected: Ok with figures left unset
#[tokio::test]
async fn marks_request_rejected_without_outcome() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let formed = factory::create_request(db, 1, RequestStatus::Formed).await?;

    let repo = SearchingRequestRepository::new(db);
    let rejected = repo
        .mark_resolved(formed.id, RequestStatus::Rejected, 42, Utc::now(), None)
        .await?;

    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert!(rejected.coverage.is_none());
    assert!(rejected.coefficient.is_none());

    Ok(())
}

/// Tests logical deletion.
///
/// Expected: Ok with deleted status and the row still present
#[tokio::test]
async fn marks_request_deleted_and_keeps_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_draft(db, 1).await?;

    let repo = SearchingRequestRepository::new(db);
    let deleted = repo.mark_deleted(draft.id, Utc::now()).await?;

    assert_eq!(deleted.status, RequestStatus::Deleted);
    assert!(deleted.completion_date.is_some());
    assert!(repo.find_by_id(draft.id).await?.is_some());

    Ok(())
}

/// Tests editing and clearing a description.
///
/// Expected: Ok with the new value, then None
#[tokio::test]
async fn updates_and_clears_description() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_draft(db, 1).await?;

    let repo = SearchingRequestRepository::new(db);
    let updated = repo
        .update_description(draft.id, Some("Spring campaign".to_string()))
        .await?;
    assert_eq!(updated.description.as_deref(), Some("Spring campaign"));

    let cleared = repo.update_description(draft.id, None).await?;
    assert!(cleared.description.is_none());

    Ok(())
}
