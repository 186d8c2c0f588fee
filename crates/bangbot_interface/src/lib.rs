//! Trait definitions for Bangbot.
//!
//! The dispatcher and the health endpoint are written against the traits in
//! this crate only. Any provider satisfying [`ContentService`] can stand in
//! for the PostgreSQL store, including the [`InMemoryContentService`] used
//! throughout the test suites.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod in_memory;
mod traits;

pub use in_memory::InMemoryContentService;
pub use traits::{ContentService, LivenessProbe};
