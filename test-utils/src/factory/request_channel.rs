//! Link factory for creating request-to-channel associations.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test links with customizable metrics.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::request_channel::RequestChannelFactory;
///
/// let link = RequestChannelFactory::new(&db, request.id, channel.id)
///     .views(Some(50))
///     .repost_level(Some(0))
///     .build()
///     .await?;
/// ```
pub struct RequestChannelFactory<'a> {
    db: &'a DatabaseConnection,
    request_id: i32,
    channel_id: i32,
    views: Option<i64>,
    repost_level: Option<i32>,
}

impl<'a> RequestChannelFactory<'a> {
    /// Creates a new RequestChannelFactory with no views and no repost level.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `request_id` - Request side of the link
    /// - `channel_id` - Channel side of the link
    ///
    /// # Returns
    /// - `RequestChannelFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, request_id: i32, channel_id: i32) -> Self {
        Self {
            db,
            request_id,
            channel_id,
            views: None,
            repost_level: None,
        }
    }

    /// Sets the observed view count.
    pub fn views(mut self, views: Option<i64>) -> Self {
        self.views = views;
        self
    }

    /// Sets the repost level (0 = original post).
    pub fn repost_level(mut self, repost_level: Option<i32>) -> Self {
        self.repost_level = repost_level;
        self
    }

    /// Builds and inserts the link into the database.
    ///
    /// # Returns
    /// - `Ok(entity::request_channel::Model)` - Created link
    /// - `Err(DbErr)` - Database error during insert, including duplicate pairs
    pub async fn build(self) -> Result<entity::request_channel::Model, DbErr> {
        entity::request_channel::ActiveModel {
            request_id: ActiveValue::Set(self.request_id),
            channel_id: ActiveValue::Set(self.channel_id),
            views: ActiveValue::Set(self.views),
            repost_level: ActiveValue::Set(self.repost_level),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a link with no metrics.
///
/// # Arguments
/// - `db` - Database connection
/// - `request_id` - Request side of the link
/// - `channel_id` - Channel side of the link
///
/// # Returns
/// - `Ok(entity::request_channel::Model)` - Created link
/// - `Err(DbErr)` - Database error during insert
pub async fn create_link(
    db: &DatabaseConnection,
    request_id: i32,
    channel_id: i32,
) -> Result<entity::request_channel::Model, DbErr> {
    RequestChannelFactory::new(db, request_id, channel_id)
        .build()
        .await
}
