use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::patch::double_option;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ChannelDto {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub subscribers: Option<i64>,
    /// True while the channel is part of at least one draft or formed request.
    pub status: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ChannelListDto {
    pub items: Vec<ChannelDto>,
    pub total: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateChannelDto {
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subscribers: Option<i64>,
}

/// Sparse channel update; omitted fields stay untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateChannelDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// `null` clears the subscriber count.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub subscribers: Option<Option<i64>>,
}
