use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        request::{
            DraftBadgeDto, LinkDto, RequestDetailDto, RequestDto, ResolveRequestDto,
            UpdateLinkDto, UpdateRequestDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            extract::{ApiJson, ApiPath, ApiQuery},
        },
        model::{
            link::UpdateLinkParams,
            request::{RequestListFilter, ResolveAction, UpdateDescriptionParams},
        },
        service::{link::LinkService, request::RequestService},
        state::AppState,
    },
};

/// Tag for grouping searching request endpoints in OpenAPI documentation
pub static REQUEST_TAG: &str = "request";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestListQuery {
    /// Status code (2 formed, 3 completed, 4 rejected)
    pub status: Option<i32>,
    /// Earliest forming date, inclusive (YYYY-MM-DD)
    pub from: Option<String>,
    /// Latest forming date, inclusive (YYYY-MM-DD)
    pub to: Option<String>,
}

/// Add a channel to the caller's draft.
///
/// Creates the caller's draft on first use.
///
/// # Access Control
/// - Any identified user
///
/// # Returns
/// - `200 OK` - Draft badge after the addition
/// - `404 Not Found` - Channel does not exist
/// - `409 Conflict` - Channel already in the draft
#[utoipa::path(
    post,
    path = "/api/requests/draft/channels/{channel_id}",
    tag = REQUEST_TAG,
    params(("channel_id" = i32, Path, description = "Channel ID")),
    responses(
        (status = 200, description = "Channel added to draft", body = DraftBadgeDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 409, description = "Channel already in draft", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_channel_to_draft(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(channel_id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&headers).require(&[])?;

    let service = RequestService::new(&state.db);

    let badge = service
        .add_channel_to_draft(caller.user_id, channel_id)
        .await?;

    Ok((StatusCode::OK, Json(badge.into_dto())))
}

/// Get the caller's draft badge.
///
/// # Access Control
/// - Any identified user
///
/// # Returns
/// - `200 OK` - Draft id (null without a draft) and channel count
#[utoipa::path(
    get,
    path = "/api/requests/draft",
    tag = REQUEST_TAG,
    responses(
        (status = 200, description = "Successfully retrieved draft badge", body = DraftBadgeDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_draft_badge(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&headers).require(&[])?;

    let service = RequestService::new(&state.db);

    let badge = service.get_draft_badge(caller.user_id).await?;

    Ok((StatusCode::OK, Json(badge.into_dto())))
}

/// List submitted requests.
///
/// Drafts and deleted requests are never listed. Moderators see every user's requests,
/// everyone else only their own.
///
/// # Access Control
/// - Any identified user
///
/// # Returns
/// - `200 OK` - Requests ordered by id
/// - `400 Bad Request` - Unknown status code or malformed date
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = REQUEST_TAG,
    params(RequestListQuery),
    responses(
        (status = 200, description = "Successfully retrieved requests", body = Vec<RequestDto>),
        (status = 400, description = "Invalid filter", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<RequestListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&headers).require(&[])?;

    let filter =
        RequestListFilter::parse(query.status, query.from.as_deref(), query.to.as_deref())?;

    let service = RequestService::new(&state.db);

    let requests = service
        .list(caller.user_id, caller.is_moderator, filter)
        .await?;

    let dtos: Vec<RequestDto> = requests.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a request with its channels.
///
/// # Access Control
/// - `OwnerOrModerator` - Creator of the request or a moderator
///
/// # Returns
/// - `200 OK` - Request with linked channel details
/// - `404 Not Found` - Request absent, deleted, or submitted without channels
#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Successfully retrieved request", body = RequestDetailDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is neither creator nor moderator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&headers);
    guard.require(&[])?;

    let service = RequestService::new(&state.db);

    let detail = service.get(id).await?;
    guard.require(&[Permission::OwnerOrModerator(detail.request.creator_id)])?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Edit a draft's description.
///
/// `description: null` clears it, an omitted field leaves it unchanged.
///
/// # Access Control
/// - `Owner` - Creator of the request
///
/// # Returns
/// - `200 OK` - Updated request
/// - `400 Bad Request` - Request is no longer a draft
/// - `404 Not Found` - Request absent or deleted
#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestDto,
    responses(
        (status = 200, description = "Successfully updated request", body = RequestDto),
        (status = 400, description = "Request is not a draft", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not the creator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&headers);
    guard.require(&[])?;

    let service = RequestService::new(&state.db);

    let request = service.find_active(id).await?;
    guard.require(&[Permission::Owner(request.creator_id)])?;

    let request = service
        .update_description(UpdateDescriptionParams {
            id,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Submit a draft for moderation.
///
/// # Access Control
/// - Any identified user; only the creator passes the lifecycle check
///
/// # Returns
/// - `200 OK` - Formed request
/// - `400 Bad Request` - Not a draft, blank description or no channels
/// - `403 Forbidden` - Caller is not the creator
/// - `404 Not Found` - Request absent or deleted
#[utoipa::path(
    put,
    path = "/api/requests/{id}/form",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Successfully formed request", body = RequestDto),
        (status = 400, description = "Request cannot be formed", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not the creator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn form_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&headers).require(&[])?;

    let service = RequestService::new(&state.db);

    let request = service.form(id, caller.user_id).await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Complete or reject a formed request.
///
/// Completing computes coverage and coefficient and hands the request to the
/// external analysis service.
///
/// # Access Control
/// - `Moderator`
///
/// # Returns
/// - `200 OK` - Resolved request
/// - `400 Bad Request` - Unknown action or request not formed
/// - `404 Not Found` - Request absent or deleted
#[utoipa::path(
    put,
    path = "/api/requests/{id}/resolve",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    request_body = ResolveRequestDto,
    responses(
        (status = 200, description = "Successfully resolved request", body = RequestDto),
        (status = 400, description = "Request cannot be resolved", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resolve_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ResolveRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&headers).require(&[Permission::Moderator])?;

    let action: ResolveAction = payload.action.parse()?;

    let service = RequestService::new(&state.db);

    let request = service
        .resolve(id, caller.user_id, action, &state.analysis)
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Logically delete a request.
///
/// # Access Control
/// - `OwnerOrModerator` - Creator of the request or a moderator
///
/// # Returns
/// - `200 OK` - Request in deleted status
/// - `404 Not Found` - Request absent or already deleted
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Successfully deleted request", body = RequestDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is neither creator nor moderator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&headers);
    guard.require(&[])?;

    let service = RequestService::new(&state.db);

    let request = service.find_active(id).await?;
    guard.require(&[Permission::OwnerOrModerator(request.creator_id)])?;

    let request = service.delete(id).await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Remove a channel from a request.
///
/// Removing the last channel deletes the request.
///
/// # Access Control
/// - `Owner` - Creator of the request
///
/// # Returns
/// - `200 OK` - Request after the removal
/// - `400 Bad Request` - Request resolved or channel not linked
/// - `404 Not Found` - Request absent or deleted
#[utoipa::path(
    delete,
    path = "/api/requests/{id}/channels/{channel_id}",
    tag = REQUEST_TAG,
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("channel_id" = i32, Path, description = "Channel ID")
    ),
    responses(
        (status = 200, description = "Successfully removed channel", body = RequestDto),
        (status = 400, description = "Channel cannot be removed", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not the creator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_request_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath((id, channel_id)): ApiPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&headers);
    guard.require(&[])?;

    let request = RequestService::new(&state.db).find_active(id).await?;
    guard.require(&[Permission::Owner(request.creator_id)])?;

    let request = LinkService::new(&state.db)
        .remove_link(id, channel_id)
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Record views and repost level for a channel of a request.
///
/// Sparse update: omitted fields stay untouched, `null` clears a value.
///
/// # Access Control
/// - `OwnerOrModerator` - Creator of the request or a moderator
///
/// # Returns
/// - `200 OK` - Updated link
/// - `400 Bad Request` - Negative value or resolved request
/// - `404 Not Found` - Request absent or channel not linked
#[utoipa::path(
    put,
    path = "/api/requests/{id}/channels/{channel_id}",
    tag = REQUEST_TAG,
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("channel_id" = i32, Path, description = "Channel ID")
    ),
    request_body = UpdateLinkDto,
    responses(
        (status = 200, description = "Successfully updated link", body = LinkDto),
        (status = 400, description = "Invalid link data", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is neither creator nor moderator", body = ErrorDto),
        (status = 404, description = "Request or link not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_request_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath((id, channel_id)): ApiPath<(i32, i32)>,
    ApiJson(payload): ApiJson<UpdateLinkDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&headers);
    guard.require(&[])?;

    let request = RequestService::new(&state.db).find_active(id).await?;
    guard.require(&[Permission::OwnerOrModerator(request.creator_id)])?;

    let params = UpdateLinkParams::from_dto(id, channel_id, payload)?;
    let link = LinkService::new(&state.db).update_link(params).await?;

    Ok((StatusCode::OK, Json(link.into_dto())))
}
