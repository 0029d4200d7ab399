use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

// Glob imports bring in the `__path_*` types `#[utoipa::path]` generates next to each handler.
use crate::server::{
    controller::{channel::*, internal::*, request::*},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Reachboard API", description = "Channel catalog and reach analysis requests"),
    tags(
        (name = "channel", description = "Channel catalog"),
        (name = "request", description = "Searching request lifecycle"),
        (name = "internal", description = "Service-to-service callbacks")
    )
)]
struct ApiDoc;

/// Builds the application router with every API route and the Swagger UI at `/api/docs`.
pub fn router(state: AppState) -> Router {
    let (router, api) = api_router().split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        // Channels
        .routes(routes!(list_channels, create_channel))
        .routes(routes!(get_channel, update_channel, delete_channel))
        .routes(routes!(upload_channel_image))
        // Searching requests
        .routes(routes!(get_draft_badge))
        .routes(routes!(add_channel_to_draft))
        .routes(routes!(list_requests))
        .routes(routes!(get_request, update_request, delete_request))
        .routes(routes!(form_request))
        .routes(routes!(resolve_request))
        .routes(routes!(update_request_channel, remove_request_channel))
        // Internal
        .routes(routes!(apply_analysis_result))
}
