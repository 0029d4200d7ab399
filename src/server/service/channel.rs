use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

use crate::server::{
    data::{channel::ChannelRepository, request_channel::RequestChannelRepository},
    error::AppError,
    model::channel::{
        Channel, ChannelFilter, ChannelList, CreateChannelParams, UpdateChannelParams,
    },
    service::image::{extension_for, ImageStore},
};

pub struct ChannelService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChannelService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists channels ordered by id, optionally filtered by title substring.
    pub async fn list(&self, filter: ChannelFilter) -> Result<ChannelList, AppError> {
        let (items, total) = ChannelRepository::new(self.db).get_all(&filter).await?;

        Ok(ChannelList { items, total })
    }

    pub async fn get(&self, id: i32) -> Result<Channel, AppError> {
        ChannelRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| channel_not_found(id))
    }

    pub async fn create(&self, params: CreateChannelParams) -> Result<Channel, AppError> {
        let channel = ChannelRepository::new(self.db).create(params).await?;

        info!("Created channel {} '{}'", channel.id, channel.title);

        Ok(channel)
    }

    /// Applies a sparse update to a channel.
    ///
    /// # Returns
    /// - `Ok(Channel)` - Updated channel
    /// - `Err(AppError::NotFound)` - No channel with that id
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn update(&self, params: UpdateChannelParams) -> Result<Channel, AppError> {
        let id = params.id;

        ChannelRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| channel_not_found(id))
    }

    /// Deletes a channel that no request references anymore.
    ///
    /// The stored image is removed after the row is gone; a storage failure is only logged.
    ///
    /// # Arguments
    /// - `id` - Channel to delete
    /// - `images` - Object storage holding the channel image
    ///
    /// # Returns
    /// - `Ok(())` - Channel deleted
    /// - `Err(AppError::NotFound)` - No channel with that id
    /// - `Err(AppError::Conflict)` - At least one request, in any status, still links the channel
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn delete(&self, id: i32, images: &impl ImageStore) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let channel_repo = ChannelRepository::new(&txn);
        let link_repo = RequestChannelRepository::new(&txn);

        let channel = channel_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| channel_not_found(id))?;

        if link_repo.is_channel_linked(id).await? {
            return Err(AppError::Conflict(format!(
                "Channel {} is still part of at least one request",
                id
            )));
        }

        channel_repo.delete(id).await?;
        txn.commit().await?;

        info!("Deleted channel {}", id);

        if let Some(image) = channel.image {
            if let Err(e) = images.delete(&image).await {
                warn!("Failed to delete image of channel {}: {}", id, e);
            }
        }

        Ok(())
    }

    /// Uploads a new channel image and stores its reference.
    ///
    /// The previous image, if any, is removed afterwards on a best-effort basis.
    ///
    /// # Arguments
    /// - `id` - Channel receiving the image
    /// - `bytes` - Raw image content
    /// - `content_type` - MIME type, must be an `image/*` type
    /// - `images` - Object storage to upload into
    ///
    /// # Returns
    /// - `Ok(Channel)` - Channel with the new image reference
    /// - `Err(AppError::Validation)` - Empty body or non-image content type
    /// - `Err(AppError::NotFound)` - No channel with that id
    /// - `Err(AppError::ImageErr)` - Upload failed
    pub async fn set_image(
        &self,
        id: i32,
        bytes: Vec<u8>,
        content_type: &str,
        images: &impl ImageStore,
    ) -> Result<Channel, AppError> {
        if bytes.is_empty() {
            return Err(AppError::Validation("Image body is empty".to_string()));
        }
        if !content_type.trim().starts_with("image/") {
            return Err(AppError::Validation(format!(
                "Unsupported content type '{}', expected an image",
                content_type
            )));
        }

        let repo = ChannelRepository::new(self.db);
        let previous = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| channel_not_found(id))?
            .image;

        let object_name = format!(
            "channel-{}-{}.{}",
            id,
            Utc::now().timestamp_millis(),
            extension_for(content_type)
        );
        let reference = images.upload(&object_name, bytes, content_type).await?;

        let Some(channel) = repo.set_image(id, Some(reference.clone())).await? else {
            // Channel vanished during the upload
            if let Err(e) = images.delete(&reference).await {
                warn!("Failed to delete orphaned image {}: {}", reference, e);
            }
            return Err(channel_not_found(id));
        };

        if let Some(previous) = previous.filter(|p| *p != reference) {
            if let Err(e) = images.delete(&previous).await {
                warn!("Failed to delete previous image of channel {}: {}", id, e);
            }
        }

        Ok(channel)
    }
}

fn channel_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Channel {} not found", id))
}
