//! Clash of Clans Client
//!
//! A small async library for read-only lookups against the Clash of Clans API.
//! Tags are normalized before they reach the URL, every response is mapped to either a
//! [`LookupResult`] or a [`CocError`], and the transport session is owned or borrowed
//! explicitly by the [`CocClient`].

pub mod client;
pub mod error;
pub mod ops;
pub mod tag;
pub mod types;

// Re-export commonly used types
pub use client::{CocClient, SessionOwnership, BASE_URL};
pub use error::CocError;
pub use tag::{endpoint_path, normalize_tag, Endpoint};
pub use types::LookupResult;

/// Result type alias using CocError
pub type Result<T> = std::result::Result<T, CocError>;
