use super::*;

/// Tests storing figures reported by the analysis service.
///
/// Expected: Ok with both figures overwritten
#[tokio::test]
async fn stores_reported_figures_on_completed_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (completed, _) = create_request_with_channels(db, 1, RequestStatus::Completed, 1).await?;

    let updated = RequestService::new(db)
        .apply_analysis_result(
            completed.id,
            AnalysisOutcome {
                coverage: 73.5,
                coefficient: 1.25,
            },
        )
        .await?;

    assert_eq!(updated.coverage, Some(73.5));
    assert_eq!(updated.coefficient, Some(1.25));
    assert_eq!(updated.status, RequestStatus::Completed);

    Ok(())
}

/// Tests results for requests that are not completed.
///
/// Expected: Validation for formed and rejected requests, NotFound for deleted and missing
#[tokio::test]
async fn refuses_results_for_other_statuses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let formed = factory::create_request(db, 1, RequestStatus::Formed).await?;
    let rejected = factory::create_request(db, 2, RequestStatus::Rejected).await?;
    let deleted = factory::create_request(db, 3, RequestStatus::Deleted).await?;
    let outcome = AnalysisOutcome {
        coverage: 1.0,
        coefficient: 1.0,
    };

    let service = RequestService::new(db);

    for id in [formed.id, rejected.id] {
        assert!(matches!(
            service.apply_analysis_result(id, outcome).await,
            Err(AppError::Validation(_))
        ));
    }
    for id in [deleted.id, 999] {
        assert!(matches!(
            service.apply_analysis_result(id, outcome).await,
            Err(AppError::NotFound(_))
        ));
    }

    Ok(())
}
