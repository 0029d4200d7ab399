//! Link domain models: a request's reference to a channel plus observed metrics.

use crate::{
    model::request::{LinkDto, LinkedChannelDto, UpdateLinkDto},
    server::{error::AppError, model::channel::Channel},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub request_id: i32,
    pub channel_id: i32,
    pub views: Option<i64>,
    /// 0 is the original post, higher values are reposts.
    pub repost_level: Option<i32>,
}

impl Link {
    pub fn from_entity(entity: entity::request_channel::Model) -> Self {
        Self {
            request_id: entity.request_id,
            channel_id: entity.channel_id,
            views: entity.views,
            repost_level: entity.repost_level,
        }
    }

    pub fn into_dto(self) -> LinkDto {
        LinkDto {
            request_id: self.request_id,
            channel_id: self.channel_id,
            views: self.views,
            repost_level: self.repost_level,
        }
    }
}

/// Link joined with the details of the channel it points to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedChannel {
    pub channel_id: i32,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub subscribers: Option<i64>,
    pub views: Option<i64>,
    pub repost_level: Option<i32>,
}

impl LinkedChannel {
    /// Combines a link with its channel at the repository boundary.
    pub fn from_parts(link: Link, channel: Channel) -> Self {
        Self {
            channel_id: link.channel_id,
            title: channel.title,
            text: channel.text,
            image: channel.image,
            subscribers: channel.subscribers,
            views: link.views,
            repost_level: link.repost_level,
        }
    }

    pub fn into_dto(self) -> LinkedChannelDto {
        LinkedChannelDto {
            channel_id: self.channel_id,
            title: self.title,
            text: self.text,
            image: self.image,
            subscribers: self.subscribers,
            views: self.views,
            repost_level: self.repost_level,
        }
    }
}

/// Parameters for a sparse link metrics update.
#[derive(Debug, Clone)]
pub struct UpdateLinkParams {
    pub request_id: i32,
    pub channel_id: i32,
    /// Outer Option indicates field presence, inner for nullable value.
    pub views: Option<Option<i64>>,
    /// Outer Option indicates field presence, inner for nullable value.
    pub repost_level: Option<Option<i32>>,
}

impl UpdateLinkParams {
    /// Converts and validates a link patch.
    ///
    /// # Returns
    /// - `Ok(UpdateLinkParams)` - Present values are non-negative
    /// - `Err(AppError::Validation)` - Negative views or repost level
    pub fn from_dto(request_id: i32, channel_id: i32, dto: UpdateLinkDto) -> Result<Self, AppError> {
        if let Some(Some(views)) = dto.views {
            if views < 0 {
                return Err(AppError::Validation("Views cannot be negative".to_string()));
            }
        }
        if let Some(Some(level)) = dto.repost_level {
            if level < 0 {
                return Err(AppError::Validation(
                    "Repost level cannot be negative".to_string(),
                ));
            }
        }

        Ok(Self {
            request_id,
            channel_id,
            views: dto.views,
            repost_level: dto.repost_level,
        })
    }
}
