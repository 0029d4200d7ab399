use super::*;

/// Tests forming a complete draft.
///
/// Expected: Ok with formed status, forming date set and channels still active
#[tokio::test]
async fn forms_draft() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::create_channel(db).await?;
    let service = RequestService::new(db);
    let badge = service.add_channel_to_draft(1, channel.id).await?;
    let draft_id = badge.request_id.unwrap();
    service
        .update_description(UpdateDescriptionParams {
            id: draft_id,
            description: Some(Some("Reach check".to_string())),
        })
        .await?;

    let formed = service.form(draft_id, 1).await?;

    assert_eq!(formed.status, RequestStatus::Formed);
    assert!(formed.forming_date.is_some());
    assert!(channel_status(db, channel.id).await?);

    Ok(())
}

/// Tests that only the creator may form a draft.
///
/// Expected: Err(AppError::AuthErr(AccessDenied)) and the draft untouched
#[tokio::test]
async fn rejects_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (draft, _) = create_request_with_channels(db, 1, RequestStatus::Draft, 1).await?;

    let service = RequestService::new(db);
    let result = service.form(draft.id, 2).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(2, _)))
    ));
    assert_eq!(service.find_active(draft.id).await?.status, RequestStatus::Draft);

    Ok(())
}

/// Tests the description guard.
///
/// Expected: Err(AppError::Validation) for a missing and for a blank description
#[tokio::test]
async fn requires_description() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let missing = SearchingRequestFactory::new(db, 1)
        .description(None)
        .build()
        .await?;
    let blank = SearchingRequestFactory::new(db, 2)
        .description(Some("   ".to_string()))
        .build()
        .await?;
    for request in [&missing, &blank] {
        let channel = factory::create_channel(db).await?;
        factory::create_link(db, request.id, channel.id).await?;
    }

    let service = RequestService::new(db);

    assert!(matches!(
        service.form(missing.id, 1).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.form(blank.id, 2).await,
        Err(AppError::Validation(_))
    ));

    Ok(())
}

/// Tests forming a draft without channels.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn requires_at_least_one_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_draft(db, 1).await?;

    let result = RequestService::new(db).form(draft.id, 1).await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests forming a request twice.
///
/// Expected: Err(AppError::Validation) on the second attempt
#[tokio::test]
async fn rejects_already_formed_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (formed, _) = create_request_with_channels(db, 1, RequestStatus::Formed, 1).await?;

    let result = RequestService::new(db).form(formed.id, 1).await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}
