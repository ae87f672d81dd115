//! Canonical bundle key names.
//!
//! The host application reads these names verbatim, including the
//! inconsistent capitalisation of `CoAAddress` and `DocumentFaceUri`.

pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const COA_ADDRESS: &str = "CoAAddress";
pub const PROVINCE: &str = "province";
pub const DISTRICT: &str = "district";
pub const VILLAGE: &str = "village";
pub const DOCUMENT_NUMBER: &str = "documentNumber";
pub const FULL_NAME: &str = "fullName";
pub const FATHERS_NAME: &str = "fathersName";
pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const FRONT_IMAGE_URI: &str = "frontImageUri";
pub const BACK_IMAGE_URI: &str = "backImageUri";
pub const DOCUMENT_FACE_URI: &str = "DocumentFaceUri";
pub const DEPENDENTS_INFO: &str = "dependentsInfo";

// Second generation.
pub const DATE_OF_ISSUE: &str = "dateOfIssue";
pub const DOCUMENT_ADDITIONAL_NUMBER: &str = "documentAdditionalNumber";
pub const DATE_OF_EXPIRY: &str = "dateOfExpiry";

/// Suffix of the repeat-group compatibility copies.
pub const DEP_SUFFIX: &str = "_dep";

/// Dependent list size, written by the positional encoding.
pub const DEPENDENT_COUNT: &str = "dependentCount";

/// Fields a record must carry before it may be transmitted, in check order.
pub const REQUIRED_FIELDS: [&str; 5] = [DOCUMENT_NUMBER, FULL_NAME, AGE, GENDER, DATE_OF_BIRTH];

/// Per-dependent field names, in wire order.
pub const DEPENDENT_FIELDS: [&str; 4] = ["dateOfBirth", "sex", "documentNumber", "fullName"];

/// Returns the `_dep` copy name for a canonical key.
pub fn dep_key(key: &str) -> String {
    format!("{}{}", key, DEP_SUFFIX)
}

/// Returns the positional key for a 0-based dependent index.
///
/// Labels are 1-based and padded to two digits; they widen past 99.
pub fn positional_key(index: usize, field: &str) -> String {
    format!("dependent{:02}_{}", index + 1, field)
}

/// Parses a positional key back into its 0-based index and field name.
///
/// Returns `None` for anything that is not `dependent<label>_<field>` with a
/// known field and a label of at least 1.
pub fn parse_positional_key(key: &str) -> Option<(usize, &str)> {
    let (label, field) = key.strip_prefix("dependent")?.split_once('_')?;
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = label.parse::<usize>().ok()?.checked_sub(1)?;
    DEPENDENT_FIELDS.contains(&field).then_some((index, field))
}

/// Returns the joined-encoding key for a dependent field.
pub fn joined_key(field: &str) -> String {
    format!("dependent_{}", field)
}
