//! Field helpers shared by every schema generation.

use log::warn;
use url::Url;

use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::keys::{self, AGE};

/// Wire value of an absent age.
pub const AGE_ABSENT: i32 = -1;

/// Writes a string under `key` and its `_dep` copy, when present.
pub fn put_with_dep(bundle: &mut FlatBundle, key: &str, value: Option<&str>) {
    bundle.put_opt(key, value);
    bundle.put_opt(keys::dep_key(key), value);
}

/// Writes an image reference under `key` and its `_dep` copy.
///
/// Absent images are omitted entirely, never written as empty strings.
pub fn put_image(bundle: &mut FlatBundle, key: &str, image: Option<&Url>) {
    put_with_dep(bundle, key, image.map(Url::as_str));
}

/// Writes the age under its key and `_dep` copy, using the `-1` sentinel.
pub fn put_age(bundle: &mut FlatBundle, age: Option<u32>) {
    let wire = match age {
        Some(a) => i32::try_from(a).unwrap_or_else(|_| {
            warn!("Age {} does not fit the wire format, clamped to {}", a, i32::MAX);
            i32::MAX
        }),
        None => AGE_ABSENT,
    };
    bundle.put(AGE, wire);
    bundle.put(keys::dep_key(AGE), wire);
}

/// Reads the age. Absent, non-numeric and negative values read as `None`.
pub fn read_age(bundle: &FlatBundle) -> Option<u32> {
    bundle.int(AGE).and_then(|n| u32::try_from(n).ok())
}

/// Reads an image reference, leaving it `None` if absent or malformed.
///
/// Only the key is logged; the reference itself may identify a person.
pub fn read_image(bundle: &FlatBundle, key: &str) -> Option<Url> {
    let raw = bundle.text(key)?;
    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Ignoring malformed {} reference: {}", key, e);
            None
        }
    }
}
