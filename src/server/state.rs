//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It includes:
//! - Database connection pool for data persistence
//! - Analysis dispatcher for completed requests
//! - Object storage client for channel images
//! - Shared token guarding the internal callback

use sea_orm::DatabaseConnection;

use crate::server::service::{image::ObjectStorage, notifier::HttpAnalysisDispatcher};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection is a pool behind a reference count and
/// the collaborators share one HTTP client.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Hands completed requests to the external analysis service.
    pub analysis: HttpAnalysisDispatcher,

    /// Object storage holding channel images.
    pub images: ObjectStorage,

    /// Token the analysis service must present on its result callback.
    pub internal_auth_token: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `analysis` - Analysis dispatcher
    /// - `images` - Object storage client
    /// - `internal_auth_token` - Shared callback token
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        analysis: HttpAnalysisDispatcher,
        images: ObjectStorage,
        internal_auth_token: String,
    ) -> Self {
        Self {
            db,
            analysis,
            images,
            internal_auth_token,
        }
    }
}
