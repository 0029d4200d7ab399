//! Object storage client for channel images.

use std::future::Future;

use url::Url;

use crate::server::error::image::ImageStoreError;

/// Storage for channel images, addressed by public reference strings.
pub trait ImageStore {
    /// Stores `bytes` under `object_name` and returns the public reference.
    fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<String, ImageStoreError>> + Send;

    /// Removes the object a reference points to.
    fn delete(&self, reference: &str) -> impl Future<Output = Result<(), ImageStoreError>> + Send;
}

/// S3-compatible object storage accessed with path-style `PUT`/`DELETE` requests.
///
/// References are the public object URLs `{endpoint}/{bucket}/{object}`.
#[derive(Clone)]
pub struct ObjectStorage {
    client: reqwest::Client,
    bucket_url: Url,
}

impl ObjectStorage {
    /// Creates a client for one bucket.
    ///
    /// # Arguments
    /// - `client` - Shared HTTP client
    /// - `endpoint` - Storage base URL, e.g. `http://localhost:9000`
    /// - `bucket` - Bucket holding channel images
    ///
    /// # Returns
    /// - `Ok(ObjectStorage)` - Client ready for use
    /// - `Err(ImageStoreError::InvalidUrl)` - Endpoint is not a valid URL
    pub fn new(client: reqwest::Client, endpoint: &str, bucket: &str) -> Result<Self, ImageStoreError> {
        let base = format!("{}/{}/", endpoint.trim_end_matches('/'), bucket.trim_matches('/'));
        let bucket_url = Url::parse(&base)?;

        Ok(Self { client, bucket_url })
    }

    fn object_url(&self, object_name: &str) -> Result<Url, ImageStoreError> {
        Ok(self.bucket_url.join(object_name)?)
    }

    /// Resolves a stored reference, refusing URLs outside the bucket.
    fn owned_url(&self, reference: &str) -> Result<Url, ImageStoreError> {
        let url = Url::parse(reference)?;
        if !url.as_str().starts_with(self.bucket_url.as_str()) {
            return Err(ImageStoreError::ForeignReference(reference.to_string()));
        }
        Ok(url)
    }
}

impl ImageStore for ObjectStorage {
    async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ImageStoreError> {
        let url = self.object_url(object_name)?;

        let response = self
            .client
            .put(url.clone())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageStoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                object: object_name.to_string(),
            });
        }

        Ok(url.to_string())
    }

    async fn delete(&self, reference: &str) -> Result<(), ImageStoreError> {
        let url = self.owned_url(reference)?;

        let response = self.client.delete(url).send().await?;

        // Already gone counts as deleted
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(ImageStoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                object: reference.to_string(),
            });
        }

        Ok(())
    }
}

/// File extension used for an uploaded image's object name.
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type.split(';').next().map(str::trim) {
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("image/svg+xml") => "svg",
        _ => "bin",
    }
}
