//! Shared helper utilities for factory methods.

use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a request in the given status linked to freshly created channels.
///
/// Each channel is created with default values and linked without views or repost level.
/// Formed and later statuses get a forming date so they show up in date-filtered lists.
///
/// # Arguments
/// - `db` - Database connection
/// - `creator_id` - Owner of the request
/// - `status` - Status to create the request in
/// - `channel_count` - Number of channels to create and link
///
/// # Returns
/// - `Ok((request, channels))` - Created request and its linked channels
/// - `Err(DbErr)` - Database error during creation
pub async fn create_request_with_channels(
    db: &DatabaseConnection,
    creator_id: i32,
    status: RequestStatus,
    channel_count: usize,
) -> Result<(entity::searching_request::Model, Vec<entity::channel::Model>), DbErr> {
    let request = crate::factory::searching_request::SearchingRequestFactory::new(db, creator_id)
        .status(status)
        .build()
        .await?;

    let mut channels = Vec::with_capacity(channel_count);
    for _ in 0..channel_count {
        let channel = crate::factory::channel::create_channel(db).await?;
        crate::factory::request_channel::create_link(db, request.id, channel.id).await?;
        channels.push(channel);
    }

    Ok((request, channels))
}
