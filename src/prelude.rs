//! Prelude module for realm_calendar crate.
//!
//! Re-exports the derive macros shared across modules.

pub use derive_more::Display;
