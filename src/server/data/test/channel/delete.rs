use super::*;

/// Tests deleting an unreferenced channel.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::create_channel(db).await?;

    let repo = ChannelRepository::new(db);
    assert!(repo.delete(channel.id).await?);
    assert!(!repo.exists(channel.id).await?);

    Ok(())
}

/// Tests deleting a channel that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChannelRepository::new(db);
    assert!(!repo.delete(999).await?);

    Ok(())
}

/// Tests that storage refuses to delete a channel still referenced by a link.
///
/// Expected: Err from the restricting foreign key
#[tokio::test]
async fn refuses_to_delete_linked_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::create_channel(db).await?;
    let request = factory::create_draft(db, 1).await?;
    factory::create_link(db, request.id, channel.id).await?;

    let repo = ChannelRepository::new(db);
    assert!(repo.delete(channel.id).await.is_err());
    assert!(repo.exists(channel.id).await?);

    Ok(())
}
