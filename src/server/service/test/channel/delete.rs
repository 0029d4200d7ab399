use super::*;

/// Tests deleting an unreferenced channel with an image.
///
/// Expected: Ok, row removed and image deleted from storage
#[tokio::test]
async fn deletes_channel_and_its_image() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = ChannelFactory::new(db)
        .image(Some("memory://images/old.png".to_string()))
        .build()
        .await?;
    let images = MemoryImageStore::default();

    let service = ChannelService::new(db);
    service.delete(channel.id, &images).await?;

    assert!(matches!(
        service.get(channel.id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(images.deleted(), vec!["memory://images/old.png".to_string()]);

    Ok(())
}

/// Tests that a channel referenced by a resolved request cannot be deleted.
///
/// Expected: Err(AppError::Conflict) and the channel kept
#[tokio::test]
async fn refuses_to_delete_channel_in_history() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::create_channel(db).await?;
    let completed = factory::create_request(db, 1, RequestStatus::Completed).await?;
    factory::create_link(db, completed.id, channel.id).await?;

    let service = ChannelService::new(db);
    let result = service.delete(channel.id, &MemoryImageStore::default()).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(service.get(channel.id).await.is_ok());

    Ok(())
}

/// Tests deleting a channel that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn delete_fails_for_missing_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ChannelService::new(db)
        .delete(42, &MemoryImageStore::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that a storage failure after the row is gone does not fail the deletion.
///
/// Expected: Ok with the channel removed
#[tokio::test]
async fn ignores_image_deletion_failure() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = ChannelFactory::new(db)
        .image(Some("memory://images/old.png".to_string()))
        .build()
        .await?;

    let service = ChannelService::new(db);
    service
        .delete(channel.id, &MemoryImageStore::failing_deletes())
        .await?;

    assert!(matches!(
        service.get(channel.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
