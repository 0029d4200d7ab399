//! Request guards.
//!
//! Caller identity is established by the upstream gateway and forwarded in headers;
//! guards here only read and check it. Input extractors map malformed requests onto the
//! same JSON error bodies as the handlers.

pub mod auth;
pub mod extract;
