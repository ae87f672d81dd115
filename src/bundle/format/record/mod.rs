//! # Record Layout Dispatcher
//!
//! Entry point for writing and reading the primary document fields. It
//! dispatches to the generation-specific layout named by the caller's
//! [`SchemaGeneration`]; the bundle contents are never used to guess it.

use log::trace;

use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::models::{DocumentRecord, SchemaGeneration};

pub mod common;
pub mod v1;
pub mod v2;

/// Writes the scalar and image fields of `record` into `bundle`.
///
/// Does not validate and does not touch the dependent list.
pub fn encode(record: &DocumentRecord, generation: SchemaGeneration, bundle: &mut FlatBundle) {
    trace!("Writing {} record layout", generation);
    match generation {
        SchemaGeneration::V1 => v1::encode(record, bundle),
        SchemaGeneration::V2 => v2::encode(record, bundle),
    }
}

/// Reads the scalar and image fields of a record from `bundle`.
///
/// The returned record has `dependents == None`.
pub fn decode(bundle: &FlatBundle, generation: SchemaGeneration) -> DocumentRecord {
    trace!("Reading {} record layout", generation);
    let mut record = DocumentRecord::default();
    match generation {
        SchemaGeneration::V1 => v1::decode(bundle, &mut record),
        SchemaGeneration::V2 => v2::decode(bundle, &mut record),
    }
    record
}
