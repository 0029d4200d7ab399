use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No caller identity header was forwarded by the gateway.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Request carries no caller identity")]
    MissingIdentity,

    /// Identity header present but not a valid user id.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid caller identity header: {0}")]
    InvalidIdentity(String),

    /// Caller is identified but lacks the required permission.
    ///
    /// Results in a 403 Forbidden response. The message is logged only.
    ///
    /// # Fields
    /// - ID of the user who was denied
    /// - Description of the missing permission
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),

    /// Internal callback presented a missing or wrong shared token.
    ///
    /// Results in a 403 Forbidden response.
    #[error("Invalid internal service token")]
    InvalidInternalToken,
}

/// Converts authentication errors into HTTP responses.
///
/// Identity problems map to 401 Unauthorized, permission problems to 403 Forbidden.
/// Details are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingIdentity | Self::InvalidIdentity(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::AccessDenied(_, _) | Self::InvalidInternalToken => {
                (StatusCode::FORBIDDEN, "Insufficient permissions")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
