//! First generation key layout.
//!
//! Identity, address and image fields, the raw dependents source, and
//! `_dep` copies of the fields a repeat group reads.

use crate::bundle::types::bundle::FlatBundle;
use crate::bundle::types::keys::*;
use crate::bundle::types::models::DocumentRecord;

use super::common;

pub fn encode(record: &DocumentRecord, bundle: &mut FlatBundle) {
    common::put_with_dep(bundle, DATE_OF_BIRTH, record.date_of_birth.as_deref());
    bundle.put_opt(COA_ADDRESS, record.coa_address.as_deref());
    bundle.put_opt(PROVINCE, record.province.as_deref());
    bundle.put_opt(DISTRICT, record.district.as_deref());
    bundle.put_opt(VILLAGE, record.village.as_deref());
    common::put_with_dep(bundle, DOCUMENT_NUMBER, record.document_number.as_deref());
    common::put_with_dep(bundle, FULL_NAME, record.full_name.as_deref());
    common::put_with_dep(bundle, FATHERS_NAME, record.fathers_name.as_deref());
    common::put_age(bundle, record.age);
    common::put_with_dep(bundle, GENDER, record.gender.as_deref());

    common::put_image(bundle, FRONT_IMAGE_URI, record.front_image.as_ref());
    common::put_image(bundle, BACK_IMAGE_URI, record.back_image.as_ref());

    bundle.put_opt(DEPENDENTS_INFO, record.dependents_info.as_deref());
}

pub fn decode(bundle: &FlatBundle, record: &mut DocumentRecord) {
    record.date_of_birth = bundle.text(DATE_OF_BIRTH);
    record.coa_address = bundle.text(COA_ADDRESS);
    record.province = bundle.text(PROVINCE);
    record.district = bundle.text(DISTRICT);
    record.village = bundle.text(VILLAGE);
    record.document_number = bundle.text(DOCUMENT_NUMBER);
    record.full_name = bundle.text(FULL_NAME);
    record.fathers_name = bundle.text(FATHERS_NAME);
    record.age = common::read_age(bundle);
    record.gender = bundle.text(GENDER);

    record.front_image = common::read_image(bundle, FRONT_IMAGE_URI);
    record.back_image = common::read_image(bundle, BACK_IMAGE_URI);

    record.dependents_info = bundle.text(DEPENDENTS_INFO);
}
