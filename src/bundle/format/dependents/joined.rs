//! Joined encoding: one key per field, values concatenated across dependents.
//!
//! ```text
//! dependent_fullName = "A; B; C;"
//! ```
//!
//! Values containing `"; "` cannot be told apart from a separator on decode.

use super::DependentEncoding;
use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::keys::{self, DEPENDENT_FIELDS};
use crate::bundle::types::models::DependentRecord;

const SEPARATOR: &str = "; ";
const TERMINATOR: char = ';';

/// Zero-cost marker for the `dependent_<field>` layout.
#[derive(Debug)]
pub struct Joined;

impl DependentEncoding for Joined {
    const DEBUG_NAME: &'static str = "joined";

    fn encode_dependents(dependents: &[DependentRecord], bundle: &mut FlatBundle) {
        if dependents.is_empty() {
            return;
        }

        for (slot, field) in DEPENDENT_FIELDS.iter().enumerate() {
            let mut joined = dependents
                .iter()
                .map(|d| d.fields()[slot])
                .collect::<Vec<_>>()
                .join(SEPARATOR);
            joined.push(TERMINATOR);
            bundle.put(keys::joined_key(field), joined);
        }
    }

    fn decode_dependents(bundle: &FlatBundle) -> Vec<DependentRecord> {
        let columns: Vec<Vec<String>> = DEPENDENT_FIELDS
            .iter()
            .map(|field| {
                bundle
                    .text(&keys::joined_key(field))
                    .map(|text| split_column(&text))
                    .unwrap_or_default()
            })
            .collect();

        let count = columns.iter().map(Vec::len).max().unwrap_or(0);

        (0..count)
            .map(|index| {
                let fields = [0, 1, 2, 3].map(|slot| {
                    columns[slot].get(index).cloned().unwrap_or_default()
                });
                DependentRecord::from_fields(fields)
            })
            .collect()
    }
}

/// Splits one joined value back into per-dependent values.
fn split_column(text: &str) -> Vec<String> {
    let body = text.strip_suffix(TERMINATOR).unwrap_or(text);
    body.split(SEPARATOR).map(str::to_string).collect()
}
