use super::*;

/// Tests removing one link.
///
/// Expected: Ok(true) for an existing pair, Ok(false) afterwards
#[tokio::test]
async fn deletes_single_link() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = factory::create_draft(db, 1).await?;
    let channel = factory::create_channel(db).await?;
    factory::create_link(db, request.id, channel.id).await?;

    let repo = RequestChannelRepository::new(db);
    assert!(repo.delete(request.id, channel.id).await?);
    assert!(!repo.delete(request.id, channel.id).await?);
    assert_eq!(repo.count_by_request(request.id).await?, 0);

    Ok(())
}

/// Tests removing every link of a request.
///
/// Expected: Ok with the freed channel ids, other requests untouched
#[tokio::test]
async fn deletes_all_links_of_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (request, channels) =
        factory::helpers::create_request_with_channels(db, 1, RequestStatus::Formed, 3).await?;
    let (other, _) =
        factory::helpers::create_request_with_channels(db, 2, RequestStatus::Formed, 1).await?;

    let repo = RequestChannelRepository::new(db);
    let mut freed = repo.delete_by_request(request.id).await?;
    freed.sort();

    let mut expected: Vec<i32> = channels.iter().map(|c| c.id).collect();
    expected.sort();
    assert_eq!(freed, expected);
    assert_eq!(repo.count_by_request(request.id).await?, 0);
    assert_eq!(repo.count_by_request(other.id).await?, 1);

    Ok(())
}
