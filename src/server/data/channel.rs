use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use entity::sea_orm_active_enums::RequestStatus;

use crate::server::model::channel::{
    Channel, ChannelFilter, CreateChannelParams, UpdateChannelParams,
};

/// Repository for the channel catalog.
///
/// Besides plain CRUD it owns the derived `status` flag: `refresh_status` recomputes it
/// from link membership and must run in the same transaction as every link mutation.
pub struct ChannelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChannelRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Lists channels ordered by id, optionally filtered by a title substring.
    ///
    /// Matching is case-insensitive on both Postgres and SQLite.
    ///
    /// # Arguments
    /// - `filter` - Optional title substring
    ///
    /// # Returns
    /// - `Ok((channels, total))` - Matching channels and their count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self, filter: &ChannelFilter) -> Result<(Vec<Channel>, u64), DbErr> {
        let mut query = entity::prelude::Channel::find();

        if let Some(title) = filter.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", title.to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(entity::channel::Column::Title))).like(pattern),
            );
        }

        let entities = query
            .order_by_asc(entity::channel::Column::Id)
            .all(self.db)
            .await?;

        let total = entities.len() as u64;
        let channels = entities.into_iter().map(Channel::from_entity).collect();

        Ok((channels, total))
    }

    /// Finds a channel by id.
    ///
    /// # Returns
    /// - `Ok(Some(Channel))` - Channel found
    /// - `Ok(None)` - No channel with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Channel>, DbErr> {
        let entity = entity::prelude::Channel::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Channel::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Channel::find_by_id(id)
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a new channel. Status starts inactive and no image is set.
    pub async fn create(&self, params: CreateChannelParams) -> Result<Channel, DbErr> {
        let entity = entity::channel::ActiveModel {
            title: ActiveValue::Set(params.title),
            text: ActiveValue::Set(params.text),
            image: ActiveValue::Set(None),
            subscribers: ActiveValue::Set(params.subscribers),
            status: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Channel::from_entity(entity))
    }

    /// Applies a sparse update.
    ///
    /// # Arguments
    /// - `params` - Fields to write; `None` leaves a column untouched
    ///
    /// # Returns
    /// - `Ok(Some(Channel))` - Updated channel
    /// - `Ok(None)` - No channel with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateChannelParams) -> Result<Option<Channel>, DbErr> {
        let Some(entity) = entity::prelude::Channel::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if params.title.is_none() && params.text.is_none() && params.subscribers.is_none() {
            return Ok(Some(Channel::from_entity(entity)));
        }

        let mut active = entity.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(text) = params.text {
            active.text = ActiveValue::Set(text);
        }
        if let Some(subscribers) = params.subscribers {
            active.subscribers = ActiveValue::Set(subscribers);
        }

        let updated = active.update(self.db).await?;

        Ok(Some(Channel::from_entity(updated)))
    }

    /// Replaces the stored image reference.
    ///
    /// # Returns
    /// - `Ok(Some(Channel))` - Channel with the new reference
    /// - `Ok(None)` - No channel with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_image(&self, id: i32, image: Option<String>) -> Result<Option<Channel>, DbErr> {
        let Some(entity) = entity::prelude::Channel::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.image = ActiveValue::Set(image);
        let updated = active.update(self.db).await?;

        Ok(Some(Channel::from_entity(updated)))
    }

    /// Deletes a channel row.
    ///
    /// # Returns
    /// - `Ok(true)` - Row removed
    /// - `Ok(false)` - No channel with that id
    /// - `Err(DbErr)` - Database error, including a foreign key violation while links remain
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Channel::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Recomputes the activation flag of the given channels from link membership.
    ///
    /// A channel is active iff at least one link references it from a draft or formed
    /// request. Channels outside `channel_ids` are not touched.
    ///
    /// # Arguments
    /// - `channel_ids` - Channels whose links changed in the current transaction
    ///
    /// # Returns
    /// - `Ok(())` - Flags written (no-op for an empty slice)
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn refresh_status(&self, channel_ids: &[i32]) -> Result<(), DbErr> {
        if channel_ids.is_empty() {
            return Ok(());
        }

        let active: Vec<i32> = entity::prelude::RequestChannel::find()
            .select_only()
            .column(entity::request_channel::Column::ChannelId)
            .distinct()
            .join(
                sea_orm::JoinType::InnerJoin,
                entity::request_channel::Relation::SearchingRequest.def(),
            )
            .filter(entity::request_channel::Column::ChannelId.is_in(channel_ids.to_vec()))
            .filter(
                entity::searching_request::Column::Status
                    .is_in([RequestStatus::Draft, RequestStatus::Formed]),
            )
            .into_tuple()
            .all(self.db)
            .await?;

        let inactive: Vec<i32> = channel_ids
            .iter()
            .copied()
            .filter(|id| !active.contains(id))
            .collect();

        for (ids, status) in [(active, true), (inactive, false)] {
            if ids.is_empty() {
                continue;
            }

            entity::prelude::Channel::update_many()
                .col_expr(entity::channel::Column::Status, Expr::value(status))
                .filter(entity::channel::Column::Id.is_in(ids))
                .exec(self.db)
                .await?;
        }

        Ok(())
    }
}
