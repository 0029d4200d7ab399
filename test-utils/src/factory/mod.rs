//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let channel = factory::create_channel(&db).await?;
//!     let request = factory::create_draft(&db, 1).await?;
//!     let link = factory::create_link(&db, request.id, channel.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let channel = factory::channel::ChannelFactory::new(&db)
//!     .title("Rust news")
//!     .subscribers(Some(1000))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `channel` - Create channel entities
//! - `searching_request` - Create searching request entities in any status
//! - `request_channel` - Create links between requests and channels
//! - `helpers` - ID generation and multi-entity shortcuts

pub mod channel;
pub mod helpers;
pub mod request_channel;
pub mod searching_request;

pub use channel::create_channel;
pub use request_channel::create_link;
pub use searching_request::{create_draft, create_request};
