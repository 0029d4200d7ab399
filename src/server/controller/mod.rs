//! HTTP request handlers.
//!
//! Controllers extract caller identity and input, enforce access control with
//! `AuthGuard`, convert DTOs into parameter models, call a service and convert the
//! domain result back into a DTO.

pub mod channel;
pub mod internal;
pub mod request;

#[cfg(test)]
mod test;
