use std::time::Duration;

use crate::server::{
    config::Config,
    error::AppError,
    service::{image::ObjectStorage, notifier::HttpAnalysisDispatcher},
    state::AppState,
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before serving.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by outbound collaborators.
///
/// Redirects are disabled so stored image references and the analysis endpoint are
/// always called exactly as configured.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::InternalError)` - TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Assembles the application state from configuration and a connected database.
///
/// # Returns
/// - `Ok(AppState)` - State ready to hand to the router
/// - `Err(AppError)` - HTTP client or object storage configuration is invalid
pub fn build_state(config: &Config, db: sea_orm::DatabaseConnection) -> Result<AppState, AppError> {
    let http_client = setup_reqwest_client()?;

    let analysis =
        HttpAnalysisDispatcher::new(http_client.clone(), config.async_service_url.clone());
    let images = ObjectStorage::new(
        http_client,
        &config.object_storage_endpoint,
        &config.object_storage_bucket,
    )?;

    Ok(AppState::new(
        db,
        analysis,
        images,
        config.internal_auth_token.clone(),
    ))
}
