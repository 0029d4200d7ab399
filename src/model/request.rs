use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::patch::double_option;

/// Searching request without its channel list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RequestDto {
    pub id: i32,
    /// Status code: 1 draft, 2 formed, 3 completed, 4 rejected, 5 deleted.
    pub status: i32,
    pub status_name: String,
    pub creation_date: DateTime<Utc>,
    pub creator_id: i32,
    pub moderator_id: Option<i32>,
    pub forming_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub coverage: Option<f64>,
    pub coefficient: Option<f64>,
}

/// Channel as seen through one of a request's links.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LinkedChannelDto {
    pub channel_id: i32,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub subscribers: Option<i64>,
    pub views: Option<i64>,
    pub repost_level: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RequestDetailDto {
    #[serde(flatten)]
    pub request: RequestDto,
    pub channels: Vec<LinkedChannelDto>,
}

/// Cart badge for the caller's current draft.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct DraftBadgeDto {
    pub request_id: Option<i32>,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateRequestDto {
    /// `null` clears the description.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ResolveRequestDto {
    /// Either `complete` or `reject`.
    pub action: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LinkDto {
    pub request_id: i32,
    pub channel_id: i32,
    pub views: Option<i64>,
    pub repost_level: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateLinkDto {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub views: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub repost_level: Option<Option<i32>>,
}
