//! Domain models and operation-specific parameter types.
//!
//! Models are converted from entities at the repository boundary with `from_entity` and
//! into wire DTOs with `into_dto`. Parameter structs carry validated input from the
//! controllers into the services.

pub mod analysis;
pub mod channel;
pub mod link;
pub mod request;
