use axum::http::HeaderMap;

use crate::server::error::{auth::AuthError, AppError};

/// Header carrying the authenticated user's numeric id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role; only `moderator` grants extra rights.
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const MODERATOR_ROLE: &str = "moderator";

pub enum Permission {
    /// Caller must be a moderator.
    Moderator,
    /// Caller must be the given user.
    Owner(i32),
    /// Caller must be the given user or a moderator.
    OwnerOrModerator(i32),
}

/// Identity of the user behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub is_moderator: bool,
}

pub struct AuthGuard<'a> {
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    /// Resolves the caller and checks every permission in order.
    ///
    /// # Arguments
    /// - `permissions` - All must hold; an empty slice only requires an identity
    ///
    /// # Returns
    /// - `Ok(Caller)` - Identity present and all permissions satisfied
    /// - `Err(AuthError::MissingIdentity | InvalidIdentity)` - No usable identity header
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub fn require(&self, permissions: &[Permission]) -> Result<Caller, AppError> {
        let caller = self.caller()?;

        for permission in permissions {
            match permission {
                Permission::Moderator => {
                    if !caller.is_moderator {
                        return Err(AuthError::AccessDenied(
                            caller.user_id,
                            "Moderator role required".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Owner(owner_id) => {
                    if caller.user_id != *owner_id {
                        return Err(AuthError::AccessDenied(
                            caller.user_id,
                            format!("Resource belongs to user {}", owner_id),
                        )
                        .into());
                    }
                }
                Permission::OwnerOrModerator(owner_id) => {
                    if caller.user_id != *owner_id && !caller.is_moderator {
                        return Err(AuthError::AccessDenied(
                            caller.user_id,
                            format!("Resource belongs to user {} and caller is no moderator", owner_id),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(caller)
    }

    fn caller(&self) -> Result<Caller, AuthError> {
        let raw = self
            .headers
            .get(USER_ID_HEADER)
            .ok_or(AuthError::MissingIdentity)?
            .to_str()
            .map_err(|e| AuthError::InvalidIdentity(e.to_string()))?;

        let user_id = raw
            .trim()
            .parse::<i32>()
            .map_err(|e| AuthError::InvalidIdentity(format!("'{}': {}", raw, e)))?;

        let is_moderator = self
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|role| role.trim().eq_ignore_ascii_case(MODERATOR_ROLE));

        Ok(Caller {
            user_id,
            is_moderator,
        })
    }
}

/// Checks the shared token presented by the internal analysis callback.
///
/// Accepts the token either bare or as `Bearer <token>` in the `Authorization` header.
///
/// # Returns
/// - `Ok(())` - Token matches
/// - `Err(AuthError::InvalidInternalToken)` - Header missing or token differs
pub fn require_internal_token(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let presented = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim());

    match presented {
        Some(token) if !expected.is_empty() && token == expected => Ok(()),
        _ => Err(AuthError::InvalidInternalToken.into()),
    }
}
