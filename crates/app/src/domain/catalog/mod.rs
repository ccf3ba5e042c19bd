//! Catalog
//!
//! Categories, businesses, their requirements and the vendor products that
//! satisfy them. Carts read prices from here when an item is added.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod slug;

pub use errors::CatalogServiceError;
pub use service::*;
