//! # Blog Core
//!
//! The domain layer of the blog backend: entities, ports and the post service.
//! This crate has no infrastructure dependencies; storage, authorization and
//! image handling are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::RepoError;
pub use services::PostService;
