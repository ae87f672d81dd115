//! # Dependent List Encodings
//!
//! Two protocol generations flatten the dependent list differently:
//!
//! - [`Positional`]: `dependent01_fullName`, `dependent02_fullName`, ... plus `dependentCount`
//! - [`Joined`]: one `dependent_fullName` key holding `"A; B; C;"`
//!
//! Both implement [`DependentEncoding`]. The caller picks one through
//! [`DependentScheme`]; the data is never inspected to guess which one applies.

use log::debug;

use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::models::{DependentRecord, DependentScheme};

pub mod joined;
pub mod positional;
pub mod source;

pub use joined::Joined;
pub use positional::Positional;

/// A flattening strategy for the dependent list.
pub trait DependentEncoding {
    /// A short name used for logging.
    const DEBUG_NAME: &'static str;

    /// Writes the dependent fragment into `bundle`.
    fn encode_dependents(dependents: &[DependentRecord], bundle: &mut FlatBundle);

    /// Reads the dependent fragment back. Missing keys degrade to empty fields.
    fn decode_dependents(bundle: &FlatBundle) -> Vec<DependentRecord>;
}

/// Encodes `dependents` into `bundle` with the chosen scheme.
pub fn encode(scheme: DependentScheme, dependents: &[DependentRecord], bundle: &mut FlatBundle) {
    match scheme {
        DependentScheme::Positional => encode_with::<Positional>(dependents, bundle),
        DependentScheme::Joined => encode_with::<Joined>(dependents, bundle),
    }
}

/// Decodes the dependent list from `bundle` with the chosen scheme.
pub fn decode(scheme: DependentScheme, bundle: &FlatBundle) -> Vec<DependentRecord> {
    match scheme {
        DependentScheme::Positional => decode_with::<Positional>(bundle),
        DependentScheme::Joined => decode_with::<Joined>(bundle),
    }
}

fn encode_with<E: DependentEncoding>(dependents: &[DependentRecord], bundle: &mut FlatBundle) {
    let before = bundle.len();
    E::encode_dependents(dependents, bundle);
    debug!(
        "{} encoding wrote {} keys for {} dependents",
        E::DEBUG_NAME,
        bundle.len() - before,
        dependents.len()
    );
}

fn decode_with<E: DependentEncoding>(bundle: &FlatBundle) -> Vec<DependentRecord> {
    let dependents = E::decode_dependents(bundle);
    debug!("{} decoding found {} dependents", E::DEBUG_NAME, dependents.len());
    dependents
}
