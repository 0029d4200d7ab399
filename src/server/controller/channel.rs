use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        channel::{ChannelDto, ChannelListDto, CreateChannelDto, UpdateChannelDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            extract::{ApiJson, ApiPath, ApiQuery},
        },
        model::channel::{ChannelFilter, CreateChannelParams, UpdateChannelParams},
        service::channel::ChannelService,
        state::AppState,
    },
};

/// Tag for grouping channel endpoints in OpenAPI documentation
pub static CHANNEL_TAG: &str = "channel";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChannelListQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
}

/// List channels.
///
/// Returns all catalog channels ordered by id, optionally filtered by a title substring.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Matching channels and their count
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/channels",
    tag = CHANNEL_TAG,
    params(ChannelListQuery),
    responses(
        (status = 200, description = "Successfully retrieved channels", body = ChannelListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_channels(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ChannelListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = ChannelService::new(&state.db);

    let channels = service
        .list(ChannelFilter { title: query.title })
        .await?;

    Ok((StatusCode::OK, Json(channels.into_dto())))
}

/// Get a channel by ID.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Channel details
/// - `404 Not Found` - Channel does not exist
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/channels/{id}",
    tag = CHANNEL_TAG,
    params(("id" = i32, Path, description = "Channel ID")),
    responses(
        (status = 200, description = "Successfully retrieved channel", body = ChannelDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_channel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = ChannelService::new(&state.db);

    let channel = service.get(id).await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Create a channel.
///
/// New channels start inactive and without an image.
///
/// # Access Control
/// - `Moderator` - Only moderators manage the catalog
///
/// # Returns
/// - `201 Created` - Created channel
/// - `400 Bad Request` - Blank title or negative subscriber count
/// - `401 Unauthorized` - No caller identity
/// - `403 Forbidden` - Caller is not a moderator
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/channels",
    tag = CHANNEL_TAG,
    request_body = CreateChannelDto,
    responses(
        (status = 201, description = "Successfully created channel", body = ChannelDto),
        (status = 400, description = "Invalid channel data", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&headers).require(&[Permission::Moderator])?;

    let service = ChannelService::new(&state.db);

    let params = CreateChannelParams::from_dto(payload)?;
    let channel = service.create(params).await?;

    Ok((StatusCode::CREATED, Json(channel.into_dto())))
}

/// Update a channel.
///
/// Sparse update: omitted fields stay untouched, `subscribers: null` clears the count.
///
/// # Access Control
/// - `Moderator` - Only moderators manage the catalog
///
/// # Returns
/// - `200 OK` - Updated channel
/// - `400 Bad Request` - Blank title or negative subscriber count
/// - `404 Not Found` - Channel does not exist
#[utoipa::path(
    put,
    path = "/api/channels/{id}",
    tag = CHANNEL_TAG,
    params(("id" = i32, Path, description = "Channel ID")),
    request_body = UpdateChannelDto,
    responses(
        (status = 200, description = "Successfully updated channel", body = ChannelDto),
        (status = 400, description = "Invalid channel data", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&headers).require(&[Permission::Moderator])?;

    let service = ChannelService::new(&state.db);

    let params = UpdateChannelParams::from_dto(id, payload)?;
    let channel = service.update(params).await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Delete a channel.
///
/// Refused while any request, in any status, still references the channel.
///
/// # Access Control
/// - `Moderator` - Only moderators manage the catalog
///
/// # Returns
/// - `204 No Content` - Channel deleted
/// - `404 Not Found` - Channel does not exist
/// - `409 Conflict` - Channel still referenced by a request
#[utoipa::path(
    delete,
    path = "/api/channels/{id}",
    tag = CHANNEL_TAG,
    params(("id" = i32, Path, description = "Channel ID")),
    responses(
        (status = 204, description = "Successfully deleted channel"),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 409, description = "Channel still referenced by a request", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&headers).require(&[Permission::Moderator])?;

    let service = ChannelService::new(&state.db);

    service.delete(id, &state.images).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Upload a channel image.
///
/// The raw request body is stored in object storage; the `Content-Type` header must be
/// an image type. Replaces and removes any previous image.
///
/// # Access Control
/// - `Moderator` - Only moderators manage the catalog
///
/// # Returns
/// - `200 OK` - Channel with the new image reference
/// - `400 Bad Request` - Empty body or non-image content type
/// - `404 Not Found` - Channel does not exist
/// - `502 Bad Gateway` - Object storage failure
#[utoipa::path(
    put,
    path = "/api/channels/{id}/image",
    tag = CHANNEL_TAG,
    params(("id" = i32, Path, description = "Channel ID")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Raw image bytes"),
    responses(
        (status = 200, description = "Successfully stored channel image", body = ChannelDto),
        (status = 400, description = "Invalid image upload", body = ErrorDto),
        (status = 401, description = "No caller identity", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 502, description = "Object storage unavailable", body = ErrorDto)
    ),
)]
pub async fn upload_channel_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&headers).require(&[Permission::Moderator])?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let service = ChannelService::new(&state.db);

    let channel = service
        .set_image(id, body.to_vec(), &content_type, &state.images)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}
