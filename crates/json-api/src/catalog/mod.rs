//! Catalog
//!
//! Public, read-only browsing of categories and businesses.

pub(crate) mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;
