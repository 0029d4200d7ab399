use super::*;

/// Tests creating and reading back a channel.
///
/// Expected: Ok with an inactive channel retrievable by id
#[tokio::test]
async fn creates_and_gets_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ChannelService::new(db);
    let created = service
        .create(CreateChannelParams {
            title: "Morning Brief".to_string(),
            text: String::new(),
            subscribers: None,
        })
        .await?;

    let fetched = service.get(created.id).await?;

    assert_eq!(fetched, created);
    assert!(!fetched.status);

    Ok(())
}

/// Tests reading a channel that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn get_fails_for_missing_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ChannelService::new(db).get(42).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests listing with a title filter.
///
/// Expected: Ok with the matching channel and total 1
#[tokio::test]
async fn lists_channels_with_filter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ChannelFactory::new(db).title("Sports Daily").build().await?;
    let target = ChannelFactory::new(db).title("Crypto Signals").build().await?;

    let list = ChannelService::new(db)
        .list(ChannelFilter {
            title: Some("CRYPTO".to_string()),
        })
        .await?;

    assert_eq!(list.total, 1);
    assert_eq!(list.items[0].id, target.id);

    Ok(())
}

/// Tests updating a missing channel.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn update_fails_for_missing_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ChannelService::new(db)
        .update(UpdateChannelParams {
            id: 42,
            title: Some("New".to_string()),
            text: None,
            subscribers: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that editing a channel does not touch its activation flag.
///
/// Expected: Ok with the flag still set for a channel in a draft
#[tokio::test]
async fn update_keeps_activation_flag() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = ChannelFactory::new(db).status(true).build().await?;
    let draft = factory::create_draft(db, 1).await?;
    factory::create_link(db, draft.id, channel.id).await?;

    let updated = ChannelService::new(db)
        .update(UpdateChannelParams {
            id: channel.id,
            title: None,
            text: Some("Updated".to_string()),
            subscribers: Some(Some(10)),
        })
        .await?;

    assert!(updated.status);
    assert_eq!(updated.text, "Updated");
    assert_eq!(updated.subscribers, Some(10));

    Ok(())
}
