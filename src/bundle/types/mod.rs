//! Foundational data structures, error types, and canonical key names.

pub mod bundle;
pub mod error;
pub mod keys;
pub mod models;
