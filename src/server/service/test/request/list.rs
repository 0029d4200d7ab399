use super::*;

/// Tests that regular users only see their own submitted requests.
///
/// Expected: Ok with the caller's formed request only
#[tokio::test]
async fn users_see_only_own_requests() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_draft(db, 1).await?;
    let own = factory::create_request(db, 1, RequestStatus::Formed).await?;
    factory::create_request(db, 2, RequestStatus::Formed).await?;

    let requests = RequestService::new(db)
        .list(1, false, RequestListFilter::default())
        .await?;

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, own.id);

    Ok(())
}

/// Tests that moderators see every creator's submitted requests.
///
/// Expected: Ok with all non-draft, non-deleted requests
#[tokio::test]
async fn moderators_see_all_requests() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_request(db, 1, RequestStatus::Formed).await?;
    factory::create_request(db, 2, RequestStatus::Completed).await?;
    factory::create_request(db, 3, RequestStatus::Deleted).await?;
    factory::create_draft(db, 4).await?;

    let requests = RequestService::new(db)
        .list(99, true, RequestListFilter::default())
        .await?;

    assert_eq!(requests.len(), 2);

    Ok(())
}

/// Tests combining status and date filters.
///
/// Expected: Ok with the completed request formed inside the range
#[tokio::test]
async fn combines_status_and_date_filters() -> Result<(), AppError> {
    use chrono::{TimeZone, Utc};

    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let in_range = SearchingRequestFactory::new(db, 1)
        .status(RequestStatus::Completed)
        .forming_date(Some(Utc.with_ymd_and_hms(2026, 5, 15, 23, 59, 0).unwrap()))
        .build()
        .await?;
    SearchingRequestFactory::new(db, 1)
        .status(RequestStatus::Completed)
        .forming_date(Some(Utc.with_ymd_and_hms(2026, 5, 16, 0, 1, 0).unwrap()))
        .build()
        .await?;
    SearchingRequestFactory::new(db, 1)
        .status(RequestStatus::Formed)
        .forming_date(Some(Utc.with_ymd_and_hms(2026, 5, 15, 10, 0, 0).unwrap()))
        .build()
        .await?;

    let filter = RequestListFilter::parse(Some(3), Some("2026-05-01"), Some("2026-05-15"))?;
    let requests = RequestService::new(db).list(1, false, filter).await?;

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, in_range.id);

    Ok(())
}

/// Tests that an unknown status code is refused before querying.
///
/// Expected: Err(AppError::Validation)
#[test]
fn rejects_unknown_status_code() {
    assert!(matches!(
        RequestListFilter::parse(Some(9), None, None),
        Err(AppError::Validation(_))
    ));
}
