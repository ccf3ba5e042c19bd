//! Foundry Domain Concerns

pub mod audit;
pub mod carts;
pub mod catalog;
pub mod users;
