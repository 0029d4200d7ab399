use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OBJECT_STORAGE_ENDPOINT: &str = "http://localhost:9000";
const DEFAULT_OBJECT_STORAGE_BUCKET: &str = "images";

pub struct Config {
    pub database_url: String,

    pub host: String,
    pub port: u16,

    /// Shared token the analysis service presents on its result callback.
    pub internal_auth_token: String,
    /// Analysis service endpoint; dispatch is disabled when unset.
    pub async_service_url: Option<String>,

    pub object_storage_endpoint: String,
    pub object_storage_bucket: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable by name
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parsable
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let port = match get("SERVICE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "SERVICE_PORT".to_string(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            host: get("SERVICE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            internal_auth_token: require("INTERNAL_AUTH_TOKEN")?,
            async_service_url: get("ASYNC_SERVICE_URL"),
            object_storage_endpoint: get("OBJECT_STORAGE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OBJECT_STORAGE_ENDPOINT.to_string()),
            object_storage_bucket: get("OBJECT_STORAGE_BUCKET")
                .unwrap_or_else(|| DEFAULT_OBJECT_STORAGE_BUCKET.to_string()),
        })
    }

    /// Socket address string the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
