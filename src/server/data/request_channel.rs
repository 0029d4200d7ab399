use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    channel::Channel,
    link::{Link, LinkedChannel, UpdateLinkParams},
};

/// Repository for the request-to-channel link table.
///
/// The composite primary key `(request_id, channel_id)` is the storage-level guard
/// against duplicate links; `exists` is only a fast path in front of it.
pub struct RequestChannelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RequestChannelRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn exists(&self, request_id: i32, channel_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::RequestChannel::find_by_id((request_id, channel_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a link with no metrics.
    ///
    /// # Returns
    /// - `Ok(Link)` - Created link
    /// - `Err(DbErr)` - Database error; a unique violation means the pair already exists
    pub async fn create(&self, request_id: i32, channel_id: i32) -> Result<Link, DbErr> {
        let entity = entity::request_channel::ActiveModel {
            request_id: ActiveValue::Set(request_id),
            channel_id: ActiveValue::Set(channel_id),
            views: ActiveValue::Set(None),
            repost_level: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Link::from_entity(entity))
    }

    /// Deletes one link.
    ///
    /// # Returns
    /// - `Ok(true)` - Link removed
    /// - `Ok(false)` - Pair did not exist
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, request_id: i32, channel_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::RequestChannel::delete_by_id((request_id, channel_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every link of a request and returns the channels that were referenced.
    pub async fn delete_by_request(&self, request_id: i32) -> Result<Vec<i32>, DbErr> {
        let channel_ids = self.channel_ids_by_request(request_id).await?;

        entity::prelude::RequestChannel::delete_many()
            .filter(entity::request_channel::Column::RequestId.eq(request_id))
            .exec(self.db)
            .await?;

        Ok(channel_ids)
    }

    pub async fn count_by_request(&self, request_id: i32) -> Result<u64, DbErr> {
        entity::prelude::RequestChannel::find()
            .filter(entity::request_channel::Column::RequestId.eq(request_id))
            .count(self.db)
            .await
    }

    /// Channel ids linked to a request, ascending.
    pub async fn channel_ids_by_request(&self, request_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::RequestChannel::find()
            .select_only()
            .column(entity::request_channel::Column::ChannelId)
            .filter(entity::request_channel::Column::RequestId.eq(request_id))
            .order_by_asc(entity::request_channel::Column::ChannelId)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Whether any request, in any status, still references the channel.
    pub async fn is_channel_linked(&self, channel_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::RequestChannel::find()
            .filter(entity::request_channel::Column::ChannelId.eq(channel_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies a sparse metrics update to one link.
    ///
    /// # Returns
    /// - `Ok(Some(Link))` - Updated link
    /// - `Ok(None)` - Pair does not exist
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateLinkParams) -> Result<Option<Link>, DbErr> {
        let Some(entity) =
            entity::prelude::RequestChannel::find_by_id((params.request_id, params.channel_id))
                .one(self.db)
                .await?
        else {
            return Ok(None);
        };

        if params.views.is_none() && params.repost_level.is_none() {
            return Ok(Some(Link::from_entity(entity)));
        }

        let mut active = entity.into_active_model();
        if let Some(views) = params.views {
            active.views = ActiveValue::Set(views);
        }
        if let Some(repost_level) = params.repost_level {
            active.repost_level = ActiveValue::Set(repost_level);
        }

        let updated = active.update(self.db).await?;

        Ok(Some(Link::from_entity(updated)))
    }

    /// Lists a request's links joined with channel details, ordered by channel id.
    ///
    /// # Returns
    /// - `Ok(Vec<LinkedChannel>)` - One entry per link (empty when the request has none)
    /// - `Err(DbErr)` - Database error during query, or a link whose channel is missing
    pub async fn get_with_channels(&self, request_id: i32) -> Result<Vec<LinkedChannel>, DbErr> {
        let rows = entity::prelude::RequestChannel::find()
            .filter(entity::request_channel::Column::RequestId.eq(request_id))
            .find_also_related(entity::prelude::Channel)
            .order_by_asc(entity::request_channel::Column::ChannelId)
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(link, channel)| {
                let channel = channel.ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "Channel {} linked to request {} not found",
                        link.channel_id, link.request_id
                    ))
                })?;

                Ok(LinkedChannel::from_parts(
                    Link::from_entity(link),
                    Channel::from_entity(channel),
                ))
            })
            .collect()
    }
}
