//! Second generation key layout: the first generation plus back-side fields
//! and the face image.

use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::keys::*;
use crate::bundle::types::models::DocumentRecord;

use super::{common, v1};

pub fn encode(record: &DocumentRecord, bundle: &mut FlatBundle) {
    v1::encode(record, bundle);

    common::put_image(bundle, DOCUMENT_FACE_URI, record.face_image.as_ref());
    bundle.put_opt(DATE_OF_ISSUE, record.date_of_issue.as_deref());
    bundle.put_opt(
        DOCUMENT_ADDITIONAL_NUMBER,
        record.document_additional_number.as_deref(),
    );
    bundle.put_opt(DATE_OF_EXPIRY, record.date_of_expiry.as_deref());
}

pub fn decode(bundle: &FlatBundle, record: &mut DocumentRecord) {
    v1::decode(bundle, record);

    record.face_image = common::read_image(bundle, DOCUMENT_FACE_URI);
    record.date_of_issue = bundle.text(DATE_OF_ISSUE);
    record.document_additional_number = bundle.text(DOCUMENT_ADDITIONAL_NUMBER);
    record.date_of_expiry = bundle.text(DATE_OF_EXPIRY);
}
