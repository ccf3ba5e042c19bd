//! Cart Item Handlers
//!
//! Items are addressed directly; the service checks they belong to one of
//! the user's carts.

pub(crate) mod delete;
pub(crate) mod update;
