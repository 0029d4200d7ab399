use super::*;

/// Tests joining links with channel details.
///
/// Expected: Ok with one entry per link ordered by channel id
#[tokio::test]
async fn joins_channel_details_ordered_by_channel_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = factory::create_draft(db, 1).await?;
    let first = ChannelFactory::new(db)
        .title("First")
        .subscribers(Some(100))
        .build()
        .await?;
    let second = ChannelFactory::new(db)
        .title("Second")
        .subscribers(None)
        .build()
        .await?;

    // Link in reverse order to check ordering.
    RequestChannelFactory::new(db, request.id, second.id)
        .views(Some(30))
        .repost_level(Some(1))
        .build()
        .await?;
    RequestChannelFactory::new(db, request.id, first.id)
        .views(Some(80))
        .repost_level(Some(0))
        .build()
        .await?;

    let repo = RequestChannelRepository::new(db);
    let linked = repo.get_with_channels(request.id).await?;

    assert_eq!(linked.len(), 2);
    assert_eq!(linked[0].channel_id, first.id);
    assert_eq!(linked[0].title, "First");
    assert_eq!(linked[0].subscribers, Some(100));
    assert_eq!(linked[0].views, Some(80));
    assert_eq!(linked[1].channel_id, second.id);
    assert_eq!(linked[1].subscribers, None);
    assert_eq!(linked[1].repost_level, Some(1));

    Ok(())
}

/// Tests a request without links.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn returns_empty_for_request_without_links() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = factory::create_draft(db, 1).await?;

    let repo = RequestChannelRepository::new(db);
    assert!(repo.get_with_channels(request.id).await?.is_empty());

    Ok(())
}
