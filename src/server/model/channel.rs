//! Channel domain models and parameters.

use crate::{
    model::channel::{ChannelDto, ChannelListDto, CreateChannelDto, UpdateChannelDto},
    server::error::AppError,
};

/// Catalog channel with its derived activation flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: i32,
    pub title: String,
    pub text: String,
    /// Public reference of the stored image.
    pub image: Option<String>,
    pub subscribers: Option<i64>,
    /// True iff at least one draft or formed request links this channel.
    pub status: bool,
}

impl Channel {
    /// Converts an entity model to a channel domain model at the repository boundary.
    pub fn from_entity(entity: entity::channel::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            text: entity.text,
            image: entity.image,
            subscribers: entity.subscribers,
            status: entity.status,
        }
    }

    pub fn into_dto(self) -> ChannelDto {
        ChannelDto {
            id: self.id,
            title: self.title,
            text: self.text,
            image: self.image,
            subscribers: self.subscribers,
            status: self.status,
        }
    }
}

/// Page of channels matching a list filter.
#[derive(Debug, Clone)]
pub struct ChannelList {
    pub items: Vec<Channel>,
    pub total: u64,
}

impl ChannelList {
    pub fn into_dto(self) -> ChannelListDto {
        ChannelListDto {
            items: self.items.into_iter().map(Channel::into_dto).collect(),
            total: self.total,
        }
    }
}

/// Filter for listing channels.
#[derive(Debug, Clone, Default)]
pub struct ChannelFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

/// Parameters for creating a channel.
#[derive(Debug, Clone)]
pub struct CreateChannelParams {
    pub title: String,
    pub text: String,
    pub subscribers: Option<i64>,
}

impl CreateChannelParams {
    /// Converts and validates a create payload.
    ///
    /// # Returns
    /// - `Ok(CreateChannelParams)` - Title non-blank and subscribers non-negative
    /// - `Err(AppError::Validation)` - Either rule violated
    pub fn from_dto(dto: CreateChannelDto) -> Result<Self, AppError> {
        let title = validate_title(dto.title)?;
        validate_subscribers(dto.subscribers)?;

        Ok(Self {
            title,
            text: dto.text,
            subscribers: dto.subscribers,
        })
    }
}

/// Parameters for a sparse channel update.
#[derive(Debug, Clone)]
pub struct UpdateChannelParams {
    pub id: i32,
    pub title: Option<String>,
    pub text: Option<String>,
    /// Outer Option indicates field presence, inner for nullable value.
    pub subscribers: Option<Option<i64>>,
}

impl UpdateChannelParams {
    /// Converts and validates an update payload with the same rules as creation.
    pub fn from_dto(id: i32, dto: UpdateChannelDto) -> Result<Self, AppError> {
        let title = dto.title.map(validate_title).transpose()?;
        if let Some(subscribers) = dto.subscribers {
            validate_subscribers(subscribers)?;
        }

        Ok(Self {
            id,
            title,
            text: dto.text,
            subscribers: dto.subscribers,
        })
    }
}

fn validate_title(title: String) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Channel title is required".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_subscribers(subscribers: Option<i64>) -> Result<(), AppError> {
    match subscribers {
        Some(count) if count < 0 => Err(AppError::Validation(
            "Subscriber count cannot be negative".to_string(),
        )),
        _ => Ok(()),
    }
}
