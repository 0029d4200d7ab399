use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, channel::ChannelFactory, request_channel::RequestChannelFactory},
};

use crate::server::{
    data::{is_unique_violation, request_channel::RequestChannelRepository},
    model::link::UpdateLinkParams,
};

mod delete;
mod get_with_channels;
mod update;
