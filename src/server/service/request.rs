//! Request lifecycle engine.
//!
//! Drives searching requests through draft → formed → completed/rejected, with logical
//! deletion from any non-deleted state. Each transition runs in a single transaction that
//! also keeps the linked channels' activation flags current.

use chrono::Utc;
use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

use crate::server::{
    data::{
        channel::ChannelRepository, is_unique_violation, request::SearchingRequestRepository,
        request_channel::RequestChannelRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        analysis::{AnalysisItem, AnalysisJob, AnalysisOutcome},
        request::{
            DraftBadge, RequestDetail, RequestListFilter, ResolveAction, SearchingRequest,
            UpdateDescriptionParams,
        },
    },
    service::{
        analysis,
        link::{lock_active_request, request_not_found, LinkService},
        notifier::AnalysisDispatcher,
    },
};

pub struct RequestService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RequestService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the creator's draft, creating it when none exists.
    ///
    /// Concurrent callers may race on creation; the loser hits the single-draft unique
    /// index and re-reads the winner's draft.
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - The creator's only draft
    /// - `Err(AppError::Conflict)` - Draft creation collided and no draft could be re-read
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_or_create_draft(&self, creator_id: i32) -> Result<SearchingRequest, AppError> {
        let repo = SearchingRequestRepository::new(self.db);

        if let Some(draft) = repo.find_draft(creator_id).await? {
            return Ok(draft);
        }

        match repo.create_draft(creator_id).await {
            Ok(draft) => {
                info!("Created draft {} for user {}", draft.id, creator_id);
                Ok(draft)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(
                    "Concurrent draft creation for user {}, reusing existing draft",
                    creator_id
                );
                repo.find_draft(creator_id).await?.ok_or_else(|| {
                    AppError::Conflict("Draft was modified concurrently, please retry".to_string())
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Adds a channel to the caller's draft, creating the draft on first use.
    ///
    /// # Returns
    /// - `Ok(DraftBadge)` - Draft id and its channel count after the addition
    /// - `Err(AppError::NotFound)` - Channel absent
    /// - `Err(AppError::Conflict)` - Channel already in the draft, or the draft was formed concurrently
    pub async fn add_channel_to_draft(
        &self,
        creator_id: i32,
        channel_id: i32,
    ) -> Result<DraftBadge, AppError> {
        if !ChannelRepository::new(self.db).exists(channel_id).await? {
            return Err(AppError::NotFound(format!(
                "Channel {} not found",
                channel_id
            )));
        }

        let draft = self.get_or_create_draft(creator_id).await?;

        LinkService::new(self.db)
            .add_link(draft.id, channel_id)
            .await
            .map_err(|e| match e {
                // The draft stopped being one between lookup and lock.
                AppError::Validation(_) => AppError::Conflict(
                    "Draft was submitted concurrently, please retry".to_string(),
                ),
                e => e,
            })?;

        let count = RequestChannelRepository::new(self.db)
            .count_by_request(draft.id)
            .await?;

        Ok(DraftBadge {
            request_id: Some(draft.id),
            count,
        })
    }

    /// Cart badge for the caller: draft id (if any) and how many channels it holds.
    pub async fn get_draft_badge(&self, creator_id: i32) -> Result<DraftBadge, AppError> {
        let Some(draft) = SearchingRequestRepository::new(self.db)
            .find_draft(creator_id)
            .await?
        else {
            return Ok(DraftBadge {
                request_id: None,
                count: 0,
            });
        };

        let count = RequestChannelRepository::new(self.db)
            .count_by_request(draft.id)
            .await?;

        Ok(DraftBadge {
            request_id: Some(draft.id),
            count,
        })
    }

    /// Finds a request that is not logically deleted, without its links.
    ///
    /// Used by controllers to check ownership before acting on a request.
    pub async fn find_active(&self, id: i32) -> Result<SearchingRequest, AppError> {
        SearchingRequestRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|request| request.status != RequestStatus::Deleted)
            .ok_or_else(|| request_not_found(id))
    }

    /// Returns a request with its links and channel details.
    ///
    /// # Returns
    /// - `Ok(RequestDetail)` - Request and its linked channels
    /// - `Err(AppError::NotFound)` - Absent, deleted, or submitted without any channel
    pub async fn get(&self, id: i32) -> Result<RequestDetail, AppError> {
        let request = self.find_active(id).await?;

        let channels = LinkService::new(self.db).list_with_channels(id).await?;

        if request.status != RequestStatus::Draft && channels.is_empty() {
            return Err(request_not_found(id));
        }

        Ok(RequestDetail { request, channels })
    }

    /// Lists submitted requests visible to the caller.
    ///
    /// # Arguments
    /// - `caller_id` - Requesting user
    /// - `is_moderator` - Moderators see every creator's requests
    /// - `filter` - Status and forming date bounds
    pub async fn list(
        &self,
        caller_id: i32,
        is_moderator: bool,
        filter: RequestListFilter,
    ) -> Result<Vec<SearchingRequest>, AppError> {
        let creator = (!is_moderator).then_some(caller_id);

        Ok(SearchingRequestRepository::new(self.db)
            .get_submitted(creator, &filter)
            .await?)
    }

    /// Edits the description of a draft.
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Request after the edit
    /// - `Err(AppError::NotFound)` - Request absent or deleted
    /// - `Err(AppError::Validation)` - Request is no longer a draft
    pub async fn update_description(
        &self,
        params: UpdateDescriptionParams,
    ) -> Result<SearchingRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, params.id).await?;
        if request.status != RequestStatus::Draft {
            return Err(AppError::Validation(
                "Only a draft's description can be edited".to_string(),
            ));
        }

        let request = match params.description {
            Some(description) => {
                SearchingRequestRepository::new(&txn)
                    .update_description(params.id, description)
                    .await?
            }
            None => request,
        };

        txn.commit().await?;

        Ok(request)
    }

    /// Submits a draft for moderation.
    ///
    /// # Arguments
    /// - `id` - Draft to form
    /// - `actor_id` - Caller; must be the creator
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Formed request with its forming date set
    /// - `Err(AppError::NotFound)` - Request absent or deleted
    /// - `Err(AppError::AuthErr)` - Caller is not the creator
    /// - `Err(AppError::Validation)` - Not a draft, blank description or no channels
    pub async fn form(&self, id: i32, actor_id: i32) -> Result<SearchingRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, id).await?;
        if request.creator_id != actor_id {
            return Err(AuthError::AccessDenied(
                actor_id,
                format!("Only the creator can form request {}", id),
            )
            .into());
        }
        if request
            .description
            .as_deref()
            .map_or(true, |d| d.trim().is_empty())
        {
            return Err(AppError::Validation(
                "A description is required before forming the request".to_string(),
            ));
        }
        if request.status != RequestStatus::Draft {
            return Err(AppError::Validation(format!(
                "Request {} is not a draft",
                id
            )));
        }
        if RequestChannelRepository::new(&txn).count_by_request(id).await? == 0 {
            return Err(AppError::Validation(
                "A request needs at least one channel to be formed".to_string(),
            ));
        }

        let request = SearchingRequestRepository::new(&txn)
            .mark_formed(id, Utc::now())
            .await?;

        txn.commit().await?;

        info!("Request {} formed by user {}", id, actor_id);

        Ok(request)
    }

    /// Completes or rejects a formed request.
    ///
    /// Completion runs the analysis calculator and stores its figures. After the
    /// transaction commits, completed requests are handed to `dispatcher`.
    ///
    /// # Arguments
    /// - `id` - Formed request
    /// - `moderator_id` - Moderator making the decision
    /// - `action` - Complete or reject
    /// - `dispatcher` - Receives the analysis job of completed requests
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Resolved request
    /// - `Err(AppError::NotFound)` - Request absent or deleted
    /// - `Err(AppError::Validation)` - Request is not formed
    pub async fn resolve(
        &self,
        id: i32,
        moderator_id: i32,
        action: ResolveAction,
        dispatcher: &impl AnalysisDispatcher,
    ) -> Result<SearchingRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, id).await?;
        if request.status != RequestStatus::Formed {
            return Err(AppError::Validation(format!(
                "Only formed requests can be resolved, request {} is not",
                id
            )));
        }

        let linked = RequestChannelRepository::new(&txn)
            .get_with_channels(id)
            .await?;
        let items: Vec<AnalysisItem> = linked.iter().map(AnalysisItem::from_linked).collect();
        let outcome: Option<AnalysisOutcome> =
            (action == ResolveAction::Complete).then(|| analysis::compute(&items));

        let request = SearchingRequestRepository::new(&txn)
            .mark_resolved(id, action.target_status(), moderator_id, Utc::now(), outcome)
            .await?;

        let channel_ids: Vec<i32> = linked.iter().map(|l| l.channel_id).collect();
        ChannelRepository::new(&txn)
            .refresh_status(&channel_ids)
            .await?;

        txn.commit().await?;

        info!(
            "Request {} resolved as {:?} by moderator {}",
            id, request.status, moderator_id
        );

        if action == ResolveAction::Complete {
            dispatcher.dispatch(AnalysisJob {
                request_id: id,
                items,
            });
        }

        Ok(request)
    }

    /// Logically deletes a request and releases its channels.
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Request in `Deleted` status
    /// - `Err(AppError::NotFound)` - Request absent or already deleted
    pub async fn delete(&self, id: i32) -> Result<SearchingRequest, AppError> {
        let txn = self.db.begin().await?;

        lock_active_request(&txn, id).await?;

        let request = SearchingRequestRepository::new(&txn)
            .mark_deleted(id, Utc::now())
            .await?;
        let channel_ids = RequestChannelRepository::new(&txn)
            .delete_by_request(id)
            .await?;
        ChannelRepository::new(&txn)
            .refresh_status(&channel_ids)
            .await?;

        txn.commit().await?;

        info!("Request {} deleted", id);

        Ok(request)
    }

    /// Stores figures reported back by the external analysis service.
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Request with the reported figures
    /// - `Err(AppError::NotFound)` - Request absent or deleted
    /// - `Err(AppError::Validation)` - Request is not completed
    pub async fn apply_analysis_result(
        &self,
        id: i32,
        outcome: AnalysisOutcome,
    ) -> Result<SearchingRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, id).await?;
        if request.status != RequestStatus::Completed {
            return Err(AppError::Validation(format!(
                "Analysis results are only accepted for completed requests, request {} is not",
                id
            )));
        }

        let request = SearchingRequestRepository::new(&txn)
            .set_analysis(id, outcome)
            .await?;

        txn.commit().await?;

        Ok(request)
    }
}
