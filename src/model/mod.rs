//! Wire-level data transfer objects shared by every HTTP endpoint.
//!
//! DTOs are plain serde structs with OpenAPI schemas. Conversion from domain models
//! happens in `server::model` through `into_dto` methods.

pub mod analysis;
pub mod api;
pub mod channel;
pub mod patch;
pub mod request;
