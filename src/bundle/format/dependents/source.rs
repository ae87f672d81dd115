//! Dependent extraction from recognizer JSON.
//!
//! The recognizer emits each dependent as a nested object whose shape changed
//! between releases. Every field is resolved through a list of candidate
//! paths; the first non-empty one wins and a complete miss yields `""`.

use log::{debug, warn};
use serde_json::Value;

use crate::bundle::types::error::{BundleError, Result};
use crate::bundle::types::models::DependentRecord;
use crate::bundle::utils::first_text;

const DATE_OF_BIRTH_PATHS: &[&[&str]] = &[
    &["dateOfBirth", "originalString", "latin", "value"],
    &["dateOfBirth", "originalDateStringResult", "description"],
];
const SEX_PATHS: &[&[&str]] = &[&["sex", "latin", "value"], &["sex", "description"]];
const DOCUMENT_NUMBER_PATHS: &[&[&str]] = &[
    &["documentNumber", "latin", "value"],
    &["documentNumber", "description"],
];
const FULL_NAME_PATHS: &[&[&str]] = &[&["fullName", "latin", "value"], &["fullName", "description"]];

/// Extracts one dependent. Non-object input yields an all-empty dependent.
pub fn dependent_from_value(value: &Value) -> DependentRecord {
    DependentRecord {
        date_of_birth: first_text(value, DATE_OF_BIRTH_PATHS),
        sex: first_text(value, SEX_PATHS),
        document_number: first_text(value, DOCUMENT_NUMBER_PATHS),
        full_name: first_text(value, FULL_NAME_PATHS),
    }
}

/// Parses a dependents source that must be a JSON array.
///
/// # Errors
/// Returns [`BundleError::MalformedDependents`] if the text is not valid JSON
/// or its top level is not an array.
pub fn parse_dependents(source: &str) -> Result<Vec<DependentRecord>> {
    let value: Value = serde_json::from_str(source)
        .map_err(|e| BundleError::MalformedDependents(e.to_string()))?;
    let items = value.as_array().ok_or_else(|| {
        BundleError::MalformedDependents(format!("expected an array, found {}", kind_of(&value)))
    })?;
    Ok(items.iter().map(dependent_from_value).collect())
}

/// Lenient variant of [`parse_dependents`] used on the send path.
///
/// - blank source: `None` (no dependents contribution)
/// - malformed source: logged and `None`
/// - otherwise the parsed list
pub fn dependents_from_source(source: Option<&str>) -> Option<Vec<DependentRecord>> {
    let source = source.map(str::trim).filter(|s| !s.is_empty())?;
    match parse_dependents(source) {
        Ok(dependents) => {
            debug!("Parsed {} dependents from source", dependents.len());
            Some(dependents)
        }
        Err(e) => {
            warn!("Dropping dependents contribution: {}", e);
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
