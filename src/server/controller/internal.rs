use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{analysis::AnalysisResultDto, api::ErrorDto, request::RequestDto},
    server::{
        error::AppError,
        middleware::{auth::require_internal_token, extract::ApiJson},
        model::analysis::AnalysisOutcome,
        service::request::RequestService,
        state::AppState,
    },
};

/// Tag for grouping service-to-service endpoints in OpenAPI documentation
pub static INTERNAL_TAG: &str = "internal";

/// Receive analysis figures from the external analysis service.
///
/// Overwrites coverage and coefficient of a completed request.
///
/// # Access Control
/// - `Authorization` header carrying the shared internal token
///
/// # Returns
/// - `200 OK` - Request with the reported figures
/// - `400 Bad Request` - Negative or non-finite figures, or request not completed
/// - `403 Forbidden` - Token missing or wrong
/// - `404 Not Found` - Request absent or deleted
#[utoipa::path(
    put,
    path = "/api/internal/requests/result",
    tag = INTERNAL_TAG,
    request_body = AnalysisResultDto,
    responses(
        (status = 200, description = "Analysis result stored", body = RequestDto),
        (status = 400, description = "Invalid analysis result", body = ErrorDto),
        (status = 403, description = "Invalid internal token", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn apply_analysis_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<AnalysisResultDto>,
) -> Result<impl IntoResponse, AppError> {
    require_internal_token(&headers, &state.internal_auth_token)?;

    for (name, value) in [
        ("coverage", payload.coverage),
        ("coefficient", payload.coefficient),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::Validation(format!(
                "'{}' must be a non-negative number",
                name
            )));
        }
    }

    let service = RequestService::new(&state.db);

    let request = service
        .apply_analysis_result(
            payload.request_id,
            AnalysisOutcome {
                coverage: payload.coverage,
                coefficient: payload.coefficient,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}
