//! Audit log
//!
//! Append-only record of cart mutations. Events are written inside the
//! mutation's own transaction.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::AuditServiceError;
pub use service::*;
