use super::*;

/// Tests that the first addition creates the draft and later ones reuse it.
///
/// Expected: Ok with one draft holding both channels
#[tokio::test]
async fn creates_draft_on_first_use_and_reuses_it() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_channel(db).await?;
    let second = factory::create_channel(db).await?;

    let service = RequestService::new(db);
    let badge_one = service.add_channel_to_draft(5, first.id).await?;
    let badge_two = service.add_channel_to_draft(5, second.id).await?;

    assert!(badge_one.request_id.is_some());
    assert_eq!(badge_one.request_id, badge_two.request_id);
    assert_eq!(badge_one.count, 1);
    assert_eq!(badge_two.count, 2);
    assert!(channel_status(db, first.id).await?);
    assert!(channel_status(db, second.id).await?);

    Ok(())
}

/// Tests that get-or-create returns the same draft on repeated calls.
///
/// Expected: Ok with identical ids and still a single draft
#[tokio::test]
async fn get_or_create_keeps_single_draft() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RequestService::new(db);
    let first = service.get_or_create_draft(5).await?;
    let second = service.get_or_create_draft(5).await?;
    let other = service.get_or_create_draft(6).await?;

    assert_eq!(first.id, second.id);
    assert_ne!(first.id, other.id);
    assert_eq!(first.status, RequestStatus::Draft);

    Ok(())
}

/// Tests that a formed request does not count as the creator's draft.
///
/// Expected: Ok with a new draft after the previous one was formed
#[tokio::test]
async fn starts_new_draft_after_forming() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let formed = factory::create_request(db, 5, RequestStatus::Formed).await?;
    let channel = factory::create_channel(db).await?;

    let badge = RequestService::new(db)
        .add_channel_to_draft(5, channel.id)
        .await?;

    assert_ne!(badge.request_id, Some(formed.id));
    assert_eq!(badge.count, 1);

    Ok(())
}

/// Tests adding a missing channel or the same channel twice.
///
/// Expected: NotFound without creating a draft, then Conflict on the duplicate
#[tokio::test]
async fn rejects_missing_and_duplicate_channels() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::create_channel(db).await?;
    let service = RequestService::new(db);

    assert!(matches!(
        service.add_channel_to_draft(5, 999).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(service.get_draft_badge(5).await?.request_id, None);

    service.add_channel_to_draft(5, channel.id).await?;
    assert!(matches!(
        service.add_channel_to_draft(5, channel.id).await,
        Err(AppError::Conflict(_))
    ));
    assert_eq!(service.get_draft_badge(5).await?.count, 1);

    Ok(())
}

/// Tests the badge of a user without a draft.
///
/// Expected: Ok with no request id and a zero count
#[tokio::test]
async fn badge_is_empty_without_draft() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_request(db, 5, RequestStatus::Formed).await?;

    let badge = RequestService::new(db).get_draft_badge(5).await?;

    assert_eq!(badge.request_id, None);
    assert_eq!(badge.count, 0);

    Ok(())
}
