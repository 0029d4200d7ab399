use super::*;

fn params(request_id: i32, channel_id: i32) -> UpdateLinkParams {
    UpdateLinkParams {
        request_id,
        channel_id,
        views: Some(Some(750)),
        repost_level: Some(Some(0)),
    }
}

/// Tests recording metrics on a draft and on a formed request.
///
/// Expected: Ok with the values stored in both cases
#[tokio::test]
async fn updates_metrics_on_open_requests() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (draft, draft_channels) =
        create_request_with_channels(db, 1, RequestStatus::Draft, 1).await?;
    let (formed, formed_channels) =
        create_request_with_channels(db, 2, RequestStatus::Formed, 1).await?;

    let service = LinkService::new(db);
    let on_draft = service
        .update_link(params(draft.id, draft_channels[0].id))
        .await?;
    let on_formed = service
        .update_link(params(formed.id, formed_channels[0].id))
        .await?;

    assert_eq!(on_draft.views, Some(750));
    assert_eq!(on_formed.repost_level, Some(0));

    Ok(())
}

/// Tests the guards of link updates.
///
/// Expected: Validation for resolved requests, NotFound for deleted requests and missing pairs
#[tokio::test]
async fn enforces_update_guards() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (rejected, rejected_channels) =
        create_request_with_channels(db, 1, RequestStatus::Rejected, 1).await?;
    let draft = factory::create_draft(db, 2).await?;
    let deleted = factory::create_request(db, 3, RequestStatus::Deleted).await?;
    let channel = factory::create_channel(db).await?;

    let service = LinkService::new(db);

    assert!(matches!(
        service
            .update_link(params(rejected.id, rejected_channels[0].id))
            .await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.update_link(params(draft.id, channel.id)).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.update_link(params(deleted.id, channel.id)).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
