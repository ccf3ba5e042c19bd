//! Cart Handlers
//!
//! Routes scoped to the authenticated user's cart for one business.

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod finalize;
pub(crate) mod get;
pub(crate) mod remove_product;
pub(crate) mod save;
