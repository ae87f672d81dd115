use log::{debug, info};

use super::format::{dependents, record};
use super::types::bundle::FlatBundle;
use super::types::error::Result;
use super::types::models::{DependentRecord, DocumentRecord, MarshalOptions};

/// Converts document records to flat bundles and back.
///
/// A marshaller is bound to one integration target: a schema generation for
/// the primary fields and an encoding for the dependent list. It holds no
/// other state, so one instance can serve any number of callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMarshaller {
    options: MarshalOptions,
}

impl RecordMarshaller {
    pub fn new(options: MarshalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MarshalOptions {
        self.options
    }

    /// Encodes a record into a fresh bundle.
    ///
    /// The dependent fragment is merged only when `record.dependents` is
    /// `Some`; an empty list is still encoded.
    ///
    /// # Errors
    /// Returns [`MissingRequiredParameters`](crate::BundleError::MissingRequiredParameters)
    /// before anything is written if a required field is null.
    pub fn encode(&self, record: &DocumentRecord) -> Result<FlatBundle> {
        record.validate()?;

        let mut bundle = FlatBundle::new();
        record::encode(record, self.options.generation, &mut bundle);

        match &record.dependents {
            Some(list) => dependents::encode(self.options.dependents, list, &mut bundle),
            None => debug!("No dependents contribution for this record"),
        }

        let dependents = match &record.dependents {
            Some(list) => format!("{} ({})", list.len(), self.options.dependents),
            None => "none".to_string(),
        };
        info!(
            "Encoded {} record: {} keys, {} images, dependents={}",
            self.options.generation,
            bundle.len(),
            record.images().len(),
            dependents
        );
        Ok(bundle)
    }

    /// Reconstructs the primary fields of a record.
    ///
    /// Never fails: missing or malformed optional data reads as `None`.
    /// The dependent list is left `None`; see [`decode_dependents`](Self::decode_dependents).
    pub fn decode(&self, bundle: &FlatBundle) -> DocumentRecord {
        let record = record::decode(bundle, self.options.generation);
        info!(
            "Decoded {} record from {} keys, {} images",
            self.options.generation,
            bundle.len(),
            record.images().len()
        );
        record
    }

    /// Reconstructs the dependent list with this marshaller's encoding.
    pub fn decode_dependents(&self, bundle: &FlatBundle) -> Vec<DependentRecord> {
        dependents::decode(self.options.dependents, bundle)
    }

    /// Convenience: [`decode`](Self::decode) followed by [`decode_dependents`](Self::decode_dependents).
    pub fn decode_with_dependents(&self, bundle: &FlatBundle) -> DocumentRecord {
        let mut record = self.decode(bundle);
        record.dependents = Some(self.decode_dependents(bundle));
        record
    }
}
