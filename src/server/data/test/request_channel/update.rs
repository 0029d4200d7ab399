use super::*;

/// Tests setting metrics on a link.
///
/// Expected: Ok with both values stored
#[tokio::test]
async fn sets_views_and_repost_level() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = factory::create_draft(db, 1).await?;
    let channel = factory::create_channel(db).await?;
    factory::create_link(db, request.id, channel.id).await?;

    let repo = RequestChannelRepository::new(db);
    let link = repo
        .update(UpdateLinkParams {
            request_id: request.id,
            channel_id: channel.id,
            views: Some(Some(1200)),
            repost_level: Some(Some(2)),
        })
        .await?
        .unwrap();

    assert_eq!(link.views, Some(1200));
    assert_eq!(link.repost_level, Some(2));

    Ok(())
}

/// Tests the sparse patch semantics: absent keeps, null clears.
///
/// Expected: Ok with views cleared and repost level kept
#[tokio::test]
async fn clears_present_null_and_keeps_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = factory::create_draft(db, 1).await?;
    let channel = factory::create_channel(db).await?;
    RequestChannelFactory::new(db, request.id, channel.id)
        .views(Some(500))
        .repost_level(Some(1))
        .build()
        .await?;

    let repo = RequestChannelRepository::new(db);
    let link = repo
        .update(UpdateLinkParams {
            request_id: request.id,
            channel_id: channel.id,
            views: Some(None),
            repost_level: None,
        })
        .await?
        .unwrap();

    assert_eq!(link.views, None);
    assert_eq!(link.repost_level, Some(1));

    Ok(())
}

/// Tests updating a pair that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_link() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RequestChannelRepository::new(db);
    let result = repo
        .update(UpdateLinkParams {
            request_id: 1,
            channel_id: 1,
            views: Some(Some(1)),
            repost_level: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
