//! # Blogly Shared
//!
//! Types exchanged between the HTML front end and the server: submitted
//! forms and the payloads rendered back.

pub mod dto;
pub mod response;

pub use dto::{FormError, PostForm, TagForm, UserForm};
pub use response::{ErrorPage, HealthResponse};
