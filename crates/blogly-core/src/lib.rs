//! # Blogly Core
//!
//! The domain layer of Blogly.
//! Users own posts, posts carry tags through a join relation, and every
//! mutation preserves referential integrity across the three.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::BlogService;
