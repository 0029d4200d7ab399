use super::*;

/// Tests setting, keeping and clearing a draft's description.
///
/// Expected: Ok with each patch applied as given
#[tokio::test]
async fn applies_sparse_description_patch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_draft(db, 1).await?;
    let service = RequestService::new(db);

    let set = service
        .update_description(UpdateDescriptionParams {
            id: draft.id,
            description: Some(Some("Launch campaign".to_string())),
        })
        .await?;
    assert_eq!(set.description.as_deref(), Some("Launch campaign"));

    let kept = service
        .update_description(UpdateDescriptionParams {
            id: draft.id,
            description: None,
        })
        .await?;
    assert_eq!(kept.description.as_deref(), Some("Launch campaign"));

    let cleared = service
        .update_description(UpdateDescriptionParams {
            id: draft.id,
            description: Some(None),
        })
        .await?;
    assert!(cleared.description.is_none());

    Ok(())
}

/// Tests editing a request that is no longer a draft.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn rejects_edit_after_forming() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let formed = factory::create_request(db, 1, RequestStatus::Formed).await?;

    let result = RequestService::new(db)
        .update_description(UpdateDescriptionParams {
            id: formed.id,
            description: Some(Some("Too late".to_string())),
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}
