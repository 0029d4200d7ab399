//! Searching request factory for creating test request entities.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test searching requests with customizable fields.
///
/// Non-draft statuses default their lifecycle dates the way the service would have set
/// them: formed and later get a forming date, completed/rejected/deleted a completion date.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::searching_request::SearchingRequestFactory;
///
/// let request = SearchingRequestFactory::new(&db, 7)
///     .status(RequestStatus::Formed)
///     .description(Some("Spring campaign".to_string()))
///     .build()
///     .await?;
/// ```
pub struct SearchingRequestFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: i32,
    status: RequestStatus,
    description: Option<String>,
    moderator_id: Option<i32>,
    creation_date: DateTime<Utc>,
    forming_date: Option<Option<DateTime<Utc>>>,
    completion_date: Option<Option<DateTime<Utc>>>,
}

impl<'a> SearchingRequestFactory<'a> {
    /// Creates a new SearchingRequestFactory with default values.
    ///
    /// Defaults:
    /// - status: `Draft`
    /// - description: `Some("Test request description")`
    /// - moderator_id: `None`
    /// - creation_date: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `creator_id` - Identifier of the user owning the request
    ///
    /// # Returns
    /// - `SearchingRequestFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, creator_id: i32) -> Self {
        Self {
            db,
            creator_id,
            status: RequestStatus::Draft,
            description: Some("Test request description".to_string()),
            moderator_id: None,
            creation_date: Utc::now(),
            forming_date: None,
            completion_date: None,
        }
    }

    /// Sets the request status.
    pub fn status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the request description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the resolving moderator.
    pub fn moderator_id(mut self, moderator_id: Option<i32>) -> Self {
        self.moderator_id = moderator_id;
        self
    }

    /// Overrides the forming date instead of deriving it from the status.
    ///
    /// # Arguments
    /// - `forming_date` - Forming timestamp or `None` to leave it unset
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn forming_date(mut self, forming_date: Option<DateTime<Utc>>) -> Self {
        self.forming_date = Some(forming_date);
        self
    }

    /// Overrides the completion date instead of deriving it from the status.
    pub fn completion_date(mut self, completion_date: Option<DateTime<Utc>>) -> Self {
        self.completion_date = Some(completion_date);
        self
    }

    /// Builds and inserts the searching request entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::searching_request::Model)` - Created request entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::searching_request::Model, DbErr> {
        let now = Utc::now();
        let forming_date = self
            .forming_date
            .unwrap_or_else(|| (self.status != RequestStatus::Draft).then_some(now));
        let completion_date = self.completion_date.unwrap_or_else(|| {
            matches!(
                self.status,
                RequestStatus::Completed | RequestStatus::Rejected | RequestStatus::Deleted
            )
            .then_some(now)
        });

        entity::searching_request::ActiveModel {
            id: ActiveValue::NotSet,
            status: ActiveValue::Set(self.status),
            creation_date: ActiveValue::Set(self.creation_date),
            creator_id: ActiveValue::Set(self.creator_id),
            moderator_id: ActiveValue::Set(self.moderator_id),
            forming_date: ActiveValue::Set(forming_date),
            completion_date: ActiveValue::Set(completion_date),
            description: ActiveValue::Set(self.description),
            coverage: ActiveValue::Set(None),
            coefficient: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a draft request for the given creator.
///
/// # Arguments
/// - `db` - Database connection
/// - `creator_id` - Identifier of the user owning the draft
///
/// # Returns
/// - `Ok(entity::searching_request::Model)` - Created draft
/// - `Err(DbErr)` - Database error during insert
pub async fn create_draft(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::searching_request::Model, DbErr> {
    SearchingRequestFactory::new(db, creator_id).build().await
}

/// Creates a request in the given status for the given creator.
pub async fn create_request(
    db: &DatabaseConnection,
    creator_id: i32,
    status: RequestStatus,
) -> Result<entity::searching_request::Model, DbErr> {
    SearchingRequestFactory::new(db, creator_id)
        .status(status)
        .build()
        .await
}
