use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, channel::ChannelFactory},
};

use super::MemoryImageStore;
use crate::server::{
    error::AppError,
    model::channel::{ChannelFilter, CreateChannelParams, UpdateChannelParams},
    service::channel::ChannelService,
};

mod crud;
mod delete;
