//! Admin
//!
//! Routes restricted to administrator users.

pub(crate) mod audit_events;
