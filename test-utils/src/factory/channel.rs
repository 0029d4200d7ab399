//! Channel factory for creating test channel entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test channels with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::channel::ChannelFactory;
///
/// let channel = ChannelFactory::new(&db)
///     .title("Daily Rust")
///     .subscribers(Some(500))
///     .build()
///     .await?;
/// ```
pub struct ChannelFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    text: String,
    image: Option<String>,
    subscribers: Option<i64>,
    status: bool,
}

impl<'a> ChannelFactory<'a> {
    /// Creates a new ChannelFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Channel {id}"` where id is auto-incremented
    /// - text: `"Test channel description"`
    /// - image: `None`
    /// - subscribers: `Some(1000)`
    /// - status: `false`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `ChannelFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Channel {}", id),
            text: "Test channel description".to_string(),
            image: None,
            subscribers: Some(1000),
            status: false,
        }
    }

    /// Sets the channel title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the channel description text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the stored image reference.
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Sets the subscriber count.
    ///
    /// # Arguments
    /// - `subscribers` - Subscriber count, `None` when unknown
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn subscribers(mut self, subscribers: Option<i64>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the stored activation flag.
    pub fn status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Builds and inserts the channel entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::channel::Model)` - Created channel entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::channel::Model, DbErr> {
        entity::channel::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(self.title),
            text: ActiveValue::Set(self.text),
            image: ActiveValue::Set(self.image),
            subscribers: ActiveValue::Set(self.subscribers),
            status: ActiveValue::Set(self.status),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a channel with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::channel::Model)` - Created channel entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_channel(db: &DatabaseConnection) -> Result<entity::channel::Model, DbErr> {
    ChannelFactory::new(db).build().await
}
