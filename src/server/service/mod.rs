//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. Every mutating operation
//! opens one database transaction, reads the affected request with an exclusive row lock
//! and commits link, request and channel writes together. External collaborators (object
//! storage, analysis service) are only contacted after the transaction has committed.

pub mod analysis;
pub mod channel;
pub mod image;
pub mod link;
pub mod notifier;
pub mod request;

#[cfg(test)]
mod test;
