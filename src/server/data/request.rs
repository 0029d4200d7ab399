use chrono::{DateTime, NaiveTime, Utc};
use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    analysis::AnalysisOutcome,
    request::{RequestListFilter, SearchingRequest},
};

/// Repository for searching request rows.
///
/// Status transitions are written here but guarded by the lifecycle service; every
/// mutating method assumes the caller has already checked the current status.
pub struct SearchingRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SearchingRequestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a request by id regardless of status.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<SearchingRequest>, DbErr> {
        let entity = entity::prelude::SearchingRequest::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(SearchingRequest::from_entity))
    }

    /// Finds a request by id and takes an exclusive row lock until the transaction ends.
    ///
    /// Backends without row locking (SQLite) fall back to a plain read; their writers are
    /// already serialized.
    ///
    /// # Returns
    /// - `Ok(Some(SearchingRequest))` - Request found and locked
    /// - `Ok(None)` - No request with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id_for_update(&self, id: i32) -> Result<Option<SearchingRequest>, DbErr> {
        let entity = entity::prelude::SearchingRequest::find_by_id(id)
            .lock_exclusive()
            .one(self.db)
            .await?;

        Ok(entity.map(SearchingRequest::from_entity))
    }

    /// Finds the creator's current draft, if any.
    pub async fn find_draft(&self, creator_id: i32) -> Result<Option<SearchingRequest>, DbErr> {
        let entity = entity::prelude::SearchingRequest::find()
            .filter(entity::searching_request::Column::CreatorId.eq(creator_id))
            .filter(entity::searching_request::Column::Status.eq(RequestStatus::Draft))
            .one(self.db)
            .await?;

        Ok(entity.map(SearchingRequest::from_entity))
    }

    /// Inserts an empty draft for the creator.
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Newly created draft
    /// - `Err(DbErr)` - Database error; a unique violation means another draft won the race
    pub async fn create_draft(&self, creator_id: i32) -> Result<SearchingRequest, DbErr> {
        let entity = entity::searching_request::ActiveModel {
            status: ActiveValue::Set(RequestStatus::Draft),
            creation_date: ActiveValue::Set(Utc::now()),
            creator_id: ActiveValue::Set(creator_id),
            moderator_id: ActiveValue::Set(None),
            forming_date: ActiveValue::Set(None),
            completion_date: ActiveValue::Set(None),
            description: ActiveValue::Set(None),
            coverage: ActiveValue::Set(None),
            coefficient: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(SearchingRequest::from_entity(entity))
    }

    /// Moves a draft to formed and stamps the forming date.
    pub async fn mark_formed(
        &self,
        id: i32,
        forming_date: DateTime<Utc>,
    ) -> Result<SearchingRequest, DbErr> {
        let entity = entity::searching_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(RequestStatus::Formed),
            forming_date: ActiveValue::Set(Some(forming_date)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(SearchingRequest::from_entity(entity))
    }

    /// Writes a moderator decision.
    ///
    /// # Arguments
    /// - `id` - Request being resolved
    /// - `status` - `Completed` or `Rejected`
    /// - `moderator_id` - Moderator who made the decision
    /// - `completion_date` - Decision timestamp
    /// - `outcome` - Calculator output, stored only when present
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Updated request
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_resolved(
        &self,
        id: i32,
        status: RequestStatus,
        moderator_id: i32,
        completion_date: DateTime<Utc>,
        outcome: Option<AnalysisOutcome>,
    ) -> Result<SearchingRequest, DbErr> {
        let mut active = entity::searching_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(status),
            moderator_id: ActiveValue::Set(Some(moderator_id)),
            completion_date: ActiveValue::Set(Some(completion_date)),
            ..Default::default()
        };
        if let Some(outcome) = outcome {
            active.coverage = ActiveValue::Set(Some(outcome.coverage));
            active.coefficient = ActiveValue::Set(Some(outcome.coefficient));
        }

        let entity = active.update(self.db).await?;

        Ok(SearchingRequest::from_entity(entity))
    }

    /// Logically deletes a request; the row itself is kept.
    pub async fn mark_deleted(
        &self,
        id: i32,
        completion_date: DateTime<Utc>,
    ) -> Result<SearchingRequest, DbErr> {
        let entity = entity::searching_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(RequestStatus::Deleted),
            completion_date: ActiveValue::Set(Some(completion_date)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(SearchingRequest::from_entity(entity))
    }

    pub async fn update_description(
        &self,
        id: i32,
        description: Option<String>,
    ) -> Result<SearchingRequest, DbErr> {
        let entity = entity::searching_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            description: ActiveValue::Set(description),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(SearchingRequest::from_entity(entity))
    }

    /// Stores analysis figures reported by the external service.
    pub async fn set_analysis(
        &self,
        id: i32,
        outcome: AnalysisOutcome,
    ) -> Result<SearchingRequest, DbErr> {
        let entity = entity::searching_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            coverage: ActiveValue::Set(Some(outcome.coverage)),
            coefficient: ActiveValue::Set(Some(outcome.coefficient)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(SearchingRequest::from_entity(entity))
    }

    /// Lists submitted requests ordered by id.
    ///
    /// Drafts and deleted requests are never included. Date bounds apply to the forming
    /// date and are inclusive on both ends at day granularity.
    ///
    /// # Arguments
    /// - `creator_id` - Restrict to one creator; `None` lists every creator's requests
    /// - `filter` - Status and forming date bounds
    ///
    /// # Returns
    /// - `Ok(Vec<SearchingRequest>)` - Matching requests
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_submitted(
        &self,
        creator_id: Option<i32>,
        filter: &RequestListFilter,
    ) -> Result<Vec<SearchingRequest>, DbErr> {
        use entity::searching_request::Column;

        let mut query = entity::prelude::SearchingRequest::find()
            .filter(Column::Status.is_not_in([RequestStatus::Draft, RequestStatus::Deleted]));

        if let Some(creator_id) = creator_id {
            query = query.filter(Column::CreatorId.eq(creator_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(from) = filter.from {
            query = query.filter(Column::FormingDate.gte(from.and_time(NaiveTime::MIN).and_utc()));
        }
        if let Some(to) = filter.to {
            if let Some(next_day) = to.succ_opt() {
                query =
                    query.filter(Column::FormingDate.lt(next_day.and_time(NaiveTime::MIN).and_utc()));
            }
        }

        let entities = query.order_by_asc(Column::Id).all(self.db).await?;

        Ok(entities.into_iter().map(SearchingRequest::from_entity).collect())
    }
}
