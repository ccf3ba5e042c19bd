//! API token authentication
//!
//! Tokens are issued to users from the CLI and presented as bearer tokens.
//! Only a SHA-256 verifier of each token is stored.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
