//! Core record marshalling module

pub mod codec;
pub mod command;
pub mod config;
pub mod format;
pub mod marshaller;
pub mod scan;
pub mod transport;
pub mod types;
pub mod utils;

pub use marshaller::RecordMarshaller;
pub use types::error::{BundleError, Result};
