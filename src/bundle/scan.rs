//! Conversion of raw recognizer output into a send-data request.
//!
//! Multi-side results carry `frontVizResult` and `backVizResult`;
//! single-side results only the front, with the image under
//! `fullDocumentImage`. Either side may be missing or flagged `empty`.

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde_json::Value;

use super::command::SendDataRequest;
use super::utils::{first_text, first_text_of};

const DATA_URL_PREFIX: &str = "data:image/jpg;base64,";

/// Extracts a request from one recognizer result, computing age as of today.
pub fn extract(result: &Value) -> Option<SendDataRequest> {
    extract_on(result, Local::now().date_naive())
}

/// Extracts a request from one recognizer result.
///
/// Returns `None` when neither side of the document produced data.
pub fn extract_on(result: &Value, today: NaiveDate) -> Option<SendDataRequest> {
    let front = side(result, "frontVizResult");
    let back = side(result, "backVizResult");
    if front.is_none() && back.is_none() {
        debug!("Recognizer result has no usable side");
        return None;
    }
    let both = [front, back];

    let full_name = first_text_of(&both, &[&["fullName", "description"]]);
    let date_of_birth = first_text_of(
        &both,
        &[&["dateOfBirth", "originalDateStringResult", "description"]],
    );
    let document_number = first_text_of(&both, &[&["documentNumber", "description"]]);
    let sex = first_text_of(&both, &[&["sex", "description"]]);

    let address = first_text(result, &[&["address", "description"]]).replace('\n', " ");
    let additional = front
        .map(|f| first_text(f, &[&["additionalAddressInformation", "description"]]))
        .unwrap_or_default();
    let mut parts = additional.split(' ');
    let mut next_part = || parts.next().unwrap_or_default().to_string();
    let (province, district, village) = (next_part(), next_part(), next_part());

    let front_image = image(result, &["fullDocumentFrontImage", "fullDocumentImage"]);

    Some(SendDataRequest {
        age: age_on(&date_of_birth, today).and_then(|a| i32::try_from(a).ok()),
        date_of_birth: Some(date_of_birth),
        coa_address: Some(address),
        province: Some(province),
        district: Some(district),
        village: Some(village),
        document_number: Some(document_number),
        full_name: Some(full_name),
        fathers_name: Some(first_text(result, &[&["fathersName", "description"]])),
        gender: Some(sex),
        front_image: Some(front_image),
        back_image: Some(image(result, &["fullDocumentBackImage"])),
        face_image: Some(image(result, &["faceImage"])),
        dependents_info: Some(dependents_info(result)),
        date_of_issue: Some(back_text(back, &["dateOfIssue", "originalDateStringResult", "description"])),
        document_additional_number: Some(back_text(back, &["documentAdditionalNumber", "description"])),
        date_of_expiry: Some(back_text(back, &["dateOfExpiry", "originalDateStringResult", "description"])),
    })
}

/// Completed years between a `DD.MM.YYYY` birth date and `today`.
///
/// Returns `None` for unparsable dates and dates in the future.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    let trimmed = date_of_birth.trim().trim_end_matches('.');
    let birth = NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").ok()?;
    if birth > today {
        return None;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn side<'a>(result: &'a Value, key: &str) -> Option<&'a Value> {
    result
        .get(key)
        .filter(|v| v.is_object())
        .filter(|v| v.get("empty").and_then(Value::as_bool) != Some(true))
}

fn back_text(back: Option<&Value>, path: &[&str]) -> String {
    back.map(|b| first_text(b, &[path])).unwrap_or_default()
}

/// First non-empty base64 image among `keys`, as a `data:` URL.
fn image(result: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| result.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(|b64| format!("{}{}", DATA_URL_PREFIX, b64))
        .unwrap_or_default()
}

/// The dependents source as text: strings pass through, structures are serialized.
fn dependents_info(result: &Value) -> String {
    match result.get("dependentsInfo") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
