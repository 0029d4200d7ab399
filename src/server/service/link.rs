//! Link table manager.
//!
//! Every mutation runs in one transaction that locks the owning request row, touches the
//! link table and recomputes the activation flag of the affected channels. The
//! `pub(super)` functions take an open transaction so the lifecycle service can compose
//! them into larger units of work.

use chrono::Utc;
use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::info;

use crate::server::{
    data::{
        channel::ChannelRepository, is_unique_violation, request::SearchingRequestRepository,
        request_channel::RequestChannelRepository,
    },
    error::AppError,
    model::{
        link::{Link, LinkedChannel, UpdateLinkParams},
        request::{is_resolved, SearchingRequest},
    },
};

pub struct LinkService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LinkService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links a channel to a draft request.
    ///
    /// # Returns
    /// - `Ok(Link)` - Link created and channel activated
    /// - `Err(AppError::NotFound)` - Request absent or deleted, or channel absent
    /// - `Err(AppError::Validation)` - Request is not a draft
    /// - `Err(AppError::Conflict)` - Pair already linked
    pub async fn add_link(&self, request_id: i32, channel_id: i32) -> Result<Link, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, request_id).await?;
        let link = add_link_in(&txn, &request, channel_id).await?;

        txn.commit().await?;

        Ok(link)
    }

    /// Removes a channel from a request that has not been resolved yet.
    ///
    /// Removing the last link logically deletes the request.
    ///
    /// # Returns
    /// - `Ok(SearchingRequest)` - Request after the removal (status `Deleted` when drained)
    /// - `Err(AppError::NotFound)` - Request absent or deleted
    /// - `Err(AppError::Validation)` - Request resolved, or pair not linked
    pub async fn remove_link(
        &self,
        request_id: i32,
        channel_id: i32,
    ) -> Result<SearchingRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, request_id).await?;
        if is_resolved(request.status) {
            return Err(AppError::Validation(format!(
                "Request {} is already resolved, its channels cannot change",
                request_id
            )));
        }

        let link_repo = RequestChannelRepository::new(&txn);
        if !link_repo.delete(request_id, channel_id).await? {
            return Err(AppError::Validation(format!(
                "Channel {} is not part of request {}",
                channel_id, request_id
            )));
        }

        let request = if link_repo.count_by_request(request_id).await? == 0 {
            info!(
                "Request {} lost its last channel and was deleted",
                request_id
            );
            SearchingRequestRepository::new(&txn)
                .mark_deleted(request_id, Utc::now())
                .await?
        } else {
            request
        };

        ChannelRepository::new(&txn)
            .refresh_status(&[channel_id])
            .await?;

        txn.commit().await?;

        Ok(request)
    }

    /// Updates the observed metrics of one link.
    ///
    /// Allowed while the request is a draft or formed.
    ///
    /// # Returns
    /// - `Ok(Link)` - Updated link
    /// - `Err(AppError::NotFound)` - Request absent or deleted, or link absent
    /// - `Err(AppError::Validation)` - Request already resolved
    pub async fn update_link(&self, params: UpdateLinkParams) -> Result<Link, AppError> {
        let txn = self.db.begin().await?;

        let request = lock_active_request(&txn, params.request_id).await?;
        if is_resolved(request.status) {
            return Err(AppError::Validation(format!(
                "Request {} is already resolved, its metrics cannot change",
                params.request_id
            )));
        }

        let (request_id, channel_id) = (params.request_id, params.channel_id);
        let link = RequestChannelRepository::new(&txn)
            .update(params)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Channel {} is not part of request {}",
                    channel_id, request_id
                ))
            })?;

        txn.commit().await?;

        Ok(link)
    }

    /// Lists a request's links with channel details, ordered by channel id.
    pub async fn list_with_channels(&self, request_id: i32) -> Result<Vec<LinkedChannel>, AppError> {
        Ok(RequestChannelRepository::new(self.db)
            .get_with_channels(request_id)
            .await?)
    }
}

/// Reads and locks a request that is not logically deleted.
///
/// # Returns
/// - `Ok(SearchingRequest)` - Locked request
/// - `Err(AppError::NotFound)` - Request absent or deleted
pub(super) async fn lock_active_request(
    txn: &DatabaseTransaction,
    request_id: i32,
) -> Result<SearchingRequest, AppError> {
    SearchingRequestRepository::new(txn)
        .find_by_id_for_update(request_id)
        .await?
        .filter(|request| request.status != RequestStatus::Deleted)
        .ok_or_else(|| request_not_found(request_id))
}

/// Adds a link inside an open transaction whose request row is already locked.
///
/// # Arguments
/// - `txn` - Transaction holding the request lock
/// - `request` - The locked, non-deleted request
/// - `channel_id` - Channel to link
async fn add_link_in(
    txn: &DatabaseTransaction,
    request: &SearchingRequest,
    channel_id: i32,
) -> Result<Link, AppError> {
    let request_id = request.id;
    if request.status != RequestStatus::Draft {
        return Err(AppError::Validation(format!(
            "Channels can only be added to a draft, request {} is not one",
            request_id
        )));
    }

    let channel_repo = ChannelRepository::new(txn);
    if !channel_repo.exists(channel_id).await? {
        return Err(AppError::NotFound(format!(
            "Channel {} not found",
            channel_id
        )));
    }

    let link_repo = RequestChannelRepository::new(txn);
    if link_repo.exists(request_id, channel_id).await? {
        return Err(duplicate_link(request_id, channel_id));
    }

    let link = link_repo
        .create(request_id, channel_id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_link(request_id, channel_id)
            } else {
                e.into()
            }
        })?;

    channel_repo.refresh_status(&[channel_id]).await?;

    Ok(link)
}

pub(super) fn request_not_found(request_id: i32) -> AppError {
    AppError::NotFound(format!("Request {} not found", request_id))
}

fn duplicate_link(request_id: i32, channel_id: i32) -> AppError {
    AppError::Conflict(format!(
        "Channel {} is already part of request {}",
        channel_id, request_id
    ))
}
