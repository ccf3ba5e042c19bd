//! Catalog Handlers

pub(crate) mod business;
pub(crate) mod businesses;
pub(crate) mod categories;
