use super::*;

/// Tests reading a request with its channels.
///
/// Expected: Ok with channel details ordered by channel id
#[tokio::test]
async fn returns_request_with_channels() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (formed, channels) = create_request_with_channels(db, 1, RequestStatus::Formed, 2).await?;

    let detail = RequestService::new(db).get(formed.id).await?;

    assert_eq!(detail.request.id, formed.id);
    let ids: Vec<i32> = detail.channels.iter().map(|c| c.channel_id).collect();
    assert_eq!(ids, vec![channels[0].id, channels[1].id]);

    Ok(())
}

/// Tests that an empty draft is still visible.
///
/// Expected: Ok with no channels
#[tokio::test]
async fn returns_empty_draft() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_draft(db, 1).await?;

    let detail = RequestService::new(db).get(draft.id).await?;

    assert!(detail.channels.is_empty());

    Ok(())
}

/// Tests the visibility rules.
///
/// Expected: Err(AppError::NotFound) for missing, deleted and submitted-but-empty requests
#[tokio::test]
async fn hides_missing_deleted_and_empty_submitted_requests() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = factory::create_request(db, 1, RequestStatus::Deleted).await?;
    let empty_formed = factory::create_request(db, 2, RequestStatus::Formed).await?;

    let service = RequestService::new(db);

    for id in [999, deleted.id, empty_formed.id] {
        assert!(matches!(service.get(id).await, Err(AppError::NotFound(_))));
    }

    Ok(())
}
