//! The send-data command invoked by the scanning UI.
//!
//! Validates the request, turns image payloads into stored references,
//! marshals the record and hands the result to the transport.

use log::info;
use serde::{Deserialize, Serialize};

use super::codec::blob::BlobStore;
use super::format::dependents::source::dependents_from_source;
use super::marshaller::RecordMarshaller;
use super::transport::{Envelope, Transport};
use super::types::error::Result;
use super::types::models::{missing_required, require_present, DocumentRecord};

/// Returned to the UI once the transport accepted the bundle.
pub const ACK_MESSAGE: &str = "Data has been sent successfully";

/// Shown to the user when anything after validation fails.
pub const USER_FAILURE_MESSAGE: &str =
    "Failed to send data. Please try again. If the issue persists, contact support.";

pub const FRONT_IMAGE_NAME: &str = "frontImage.jpg";
pub const BACK_IMAGE_NAME: &str = "backImage.jpg";
pub const FACE_IMAGE_NAME: &str = "faceImage.jpg";

/// Fields received from the UI, by name. Images are `data:` URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendDataRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "CoAAddress", skip_serializing_if = "Option::is_none")]
    pub coa_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fathers_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependents_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_additional_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_expiry: Option<String>,
}

impl SendDataRequest {
    /// Checks that every required field is non-null.
    ///
    /// A negative age counts as missing, matching how the record reads it.
    pub fn validate(&self) -> Result<()> {
        require_present(missing_required([
            self.document_number.is_some(),
            self.full_name.is_some(),
            self.age.is_some_and(|a| a >= 0),
            self.gender.is_some(),
            self.date_of_birth.is_some(),
        ]))
    }

    /// Builds the record to marshal, storing image payloads through `store`.
    ///
    /// Blank images are skipped. Back-side fields and the dependents source
    /// default to empty strings; a malformed dependents source drops the
    /// dependent list but keeps everything else.
    pub fn into_record(self, store: &impl BlobStore) -> Result<DocumentRecord> {
        let front_image = store_image(store, FRONT_IMAGE_NAME, self.front_image.as_deref())?;
        let back_image = store_image(store, BACK_IMAGE_NAME, self.back_image.as_deref())?;
        let face_image = store_image(store, FACE_IMAGE_NAME, self.face_image.as_deref())?;

        let dependents_info = self.dependents_info.unwrap_or_default();
        let dependents = dependents_from_source(Some(dependents_info.as_str()));

        Ok(DocumentRecord {
            date_of_birth: self.date_of_birth,
            coa_address: self.coa_address,
            province: self.province,
            district: self.district,
            village: self.village,
            document_number: self.document_number,
            full_name: self.full_name,
            fathers_name: self.fathers_name,
            age: self.age.and_then(|a| u32::try_from(a).ok()),
            gender: self.gender,
            front_image,
            back_image,
            face_image,
            dependents_info: Some(dependents_info),
            dependents,
            date_of_issue: Some(self.date_of_issue.unwrap_or_default()),
            document_additional_number: Some(self.document_additional_number.unwrap_or_default()),
            date_of_expiry: Some(self.date_of_expiry.unwrap_or_default()),
        })
    }
}

fn store_image(
    store: &impl BlobStore,
    name: &str,
    data_url: Option<&str>,
) -> Result<Option<url::Url>> {
    match data_url.filter(|d| !d.trim().is_empty()) {
        Some(d) => store.store_data_url(name, d).map(Some),
        None => Ok(None),
    }
}

/// Runs the full send pipeline and returns the acknowledgement text.
///
/// # Errors
/// - [`MissingRequiredParameters`](crate::BundleError::MissingRequiredParameters) before any work is done
/// - image decoding, storage, encoding or transport failures, propagated as-is
pub fn send_data<S, T>(
    request: SendDataRequest,
    store: &S,
    marshaller: &RecordMarshaller,
    transport: &mut T,
) -> Result<&'static str>
where
    S: BlobStore,
    T: Transport,
{
    request.validate()?;
    let record = request.into_record(store)?;
    let bundle = marshaller.encode(&record)?;
    transport.deliver(Envelope::ok(bundle, &record))?;
    info!("Send-data command completed");
    Ok(ACK_MESSAGE)
}
