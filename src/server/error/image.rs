use thiserror::Error;

/// Failures talking to the object storage service.
#[derive(Error, Debug)]
pub enum ImageStoreError {
    /// Transport failure while calling the storage endpoint.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Storage endpoint answered with a non-success status.
    #[error("Object storage returned {status} for {object}")]
    UnexpectedStatus { status: u16, object: String },

    /// Configured endpoint or a stored reference is not a usable URL.
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// Stored reference does not point into the configured bucket.
    #[error("Image reference {0} does not belong to the configured bucket")]
    ForeignReference(String),
}
