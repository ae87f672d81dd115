//! Positional encoding: one key per dependent field, labelled by index.

use log::warn;

use super::DependentEncoding;
use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::keys::{self, DEPENDENT_COUNT, DEPENDENT_FIELDS};
use crate::bundle::types::models::DependentRecord;

/// Zero-cost marker for the `dependentNN_<field>` layout.
#[derive(Debug)]
pub struct Positional;

impl DependentEncoding for Positional {
    const DEBUG_NAME: &'static str = "positional";

    fn encode_dependents(dependents: &[DependentRecord], bundle: &mut FlatBundle) {
        // Counts beyond i32 cannot be represented on the wire.
        let count = i32::try_from(dependents.len()).unwrap_or(i32::MAX);
        bundle.put(DEPENDENT_COUNT, count);

        for (index, dependent) in dependents.iter().enumerate() {
            for (field, value) in DEPENDENT_FIELDS.iter().zip(dependent.fields()) {
                bundle.put(keys::positional_key(index, field), value);
            }
        }
    }

    fn decode_dependents(bundle: &FlatBundle) -> Vec<DependentRecord> {
        let declared = match bundle.int(DEPENDENT_COUNT) {
            Some(n) if n >= 0 => n as usize,
            Some(n) => {
                warn!("Ignoring negative {}: {}", DEPENDENT_COUNT, n);
                return Vec::new();
            }
            None => {
                if bundle.contains_key(DEPENDENT_COUNT) {
                    warn!("Ignoring non-numeric {}", DEPENDENT_COUNT);
                }
                return Vec::new();
            }
        };

        // The declared count is only trusted up to the highest label present,
        // and a sparse label can never outgrow the bundle itself.
        let present = bundle
            .keys()
            .filter_map(keys::parse_positional_key)
            .map(|(index, _)| index + 1)
            .max()
            .unwrap_or(0)
            .min(bundle.len());
        let count = if declared > present {
            warn!(
                "{} declares {} dependents but keys exist for {}",
                DEPENDENT_COUNT, declared, present
            );
            present
        } else {
            declared
        };

        let mut dependents = Vec::with_capacity(count);
        for index in 0..count {
            let fields = DEPENDENT_FIELDS.map(|field| {
                bundle
                    .text(&keys::positional_key(index, field))
                    .unwrap_or_default()
            });
            dependents.push(DependentRecord::from_fields(fields));
        }
        dependents
    }
}
