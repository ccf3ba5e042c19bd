//! Carts

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;
pub(crate) mod models;
pub(crate) mod shared;

pub(crate) use handlers::*;
