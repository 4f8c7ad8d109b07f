//! # Quill Core
//!
//! The domain layer of the Quill publishing backend.
//! This crate contains the content visibility and lifecycle engine -
//! pure business logic with zero infrastructure dependencies.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod pagination;
pub mod policy;
pub mod ports;
pub mod slug;

pub use catalog::PostCatalog;
pub use error::DomainError;
