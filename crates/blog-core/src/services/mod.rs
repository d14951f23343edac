//! Application services built on the ports.

mod post_service;

pub use post_service::{MAX_TITLE_LENGTH, PostService, messages};
