//! Bundle layout layer.
//!
//! This module provides the mid-level encoding layer that sits between the
//! typed records and the high-level [`RecordMarshaller`](crate::bundle::marshaller::RecordMarshaller).
//!
//! # Module Organization
//!
//! - [`record`]: Primary document fields, one layout per schema generation
//! - [`dependents`]: Dependent list encodings and recognizer-JSON extraction
//!
//! # Architecture
//!
//! ```text
//! Flat bundle:
//! ┌──────────────────────┐
//! │  Scalar fields       │ ← record::encode() / record::decode()
//! │  + `_dep` copies     │   (v1 / v2 layout)
//! ├──────────────────────┤
//! │  Dependent fragment  │ ← dependents::encode() / dependents::decode()
//! │  (positional or      │
//! │   joined)            │
//! └──────────────────────┘
//! ```

pub mod dependents;
pub mod record;
