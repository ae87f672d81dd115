use chrono::NaiveDate;
use scan_bundle::bundle::scan::{age_on, extract_on};
use scan_bundle::bundle::utils::{first_text, lookup_text};
use serde_json::json;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn multi_side_result_is_extracted() {
    let result = json!({
        "frontVizResult": {
            "empty": false,
            "fullName": { "description": "Jane Example" },
            "dateOfBirth": { "originalDateStringResult": { "description": "12.03.1985" } },
            "documentNumber": { "description": "" },
            "sex": { "description": "F" },
            "additionalAddressInformation": { "description": "Kabul District4 Village" }
        },
        "backVizResult": {
            "documentNumber": { "description": "N-1" },
            "dateOfIssue": { "originalDateStringResult": { "description": "01.01.2020" } },
            "documentAdditionalNumber": { "description": "A-77" },
            "dateOfExpiry": { "originalDateStringResult": { "description": "01.01.2030" } }
        },
        "fathersName": { "description": "John Example" },
        "address": { "description": "Street 1\nBlock 2" },
        "fullDocumentFrontImage": "AAAA",
        "fullDocumentBackImage": "",
        "dependentsInfo": [ { "fullName": { "description": "Child" } } ]
    });

    let req = extract_on(&result, day(2024, 6, 1)).expect("request");
    assert_eq!(req.full_name.as_deref(), Some("Jane Example"));
    assert_eq!(req.date_of_birth.as_deref(), Some("12.03.1985"));
    assert_eq!(req.document_number.as_deref(), Some("N-1"), "back side fills empty front");
    assert_eq!(req.gender.as_deref(), Some("F"));
    assert_eq!(req.fathers_name.as_deref(), Some("John Example"));
    assert_eq!(req.coa_address.as_deref(), Some("Street 1 Block 2"));
    assert_eq!(req.province.as_deref(), Some("Kabul"));
    assert_eq!(req.district.as_deref(), Some("District4"));
    assert_eq!(req.village.as_deref(), Some("Village"));
    assert_eq!(req.date_of_issue.as_deref(), Some("01.01.2020"));
    assert_eq!(req.document_additional_number.as_deref(), Some("A-77"));
    assert_eq!(req.date_of_expiry.as_deref(), Some("01.01.2030"));
    assert_eq!(req.front_image.as_deref(), Some("data:image/jpg;base64,AAAA"));
    assert_eq!(req.back_image.as_deref(), Some(""));
    assert_eq!(req.age, Some(39));
    assert_eq!(
        req.dependents_info.as_deref(),
        Some(r#"[{"fullName":{"description":"Child"}}]"#)
    );
    assert!(req.validate().is_ok());
}

#[test]
fn single_side_result_uses_full_document_image() {
    let result = json!({
        "frontVizResult": {
            "fullName": { "description": "Solo" },
            "additionalAddressInformation": { "description": "OnlyProvince" }
        },
        "fullDocumentImage": "QkJC",
        "dependentsInfo": "[]"
    });

    let req = extract_on(&result, day(2024, 6, 1)).expect("request");
    assert_eq!(req.front_image.as_deref(), Some("data:image/jpg;base64,QkJC"));
    assert_eq!(req.province.as_deref(), Some("OnlyProvince"));
    assert_eq!(req.district.as_deref(), Some(""));
    assert_eq!(req.village.as_deref(), Some(""));
    assert_eq!(req.date_of_issue.as_deref(), Some(""));
    assert_eq!(req.dependents_info.as_deref(), Some("[]"));
    assert_eq!(req.age, None, "no birth date means no age");
}

#[test]
fn empty_results_are_skipped() {
    assert!(extract_on(&json!({}), day(2024, 1, 1)).is_none());
    assert!(extract_on(
        &json!({ "frontVizResult": { "empty": true }, "backVizResult": null }),
        day(2024, 1, 1)
    )
    .is_none());
}

#[test]
fn age_counts_completed_years() {
    assert_eq!(age_on("12.03.1985", day(2024, 3, 11)), Some(38));
    assert_eq!(age_on("12.03.1985", day(2024, 3, 12)), Some(39));
    assert_eq!(age_on("1.2.2000", day(2024, 1, 31)), Some(23));
    assert_eq!(age_on("29.02.2000", day(2001, 2, 28)), Some(0));
    assert_eq!(age_on("01.01.2030", day(2024, 1, 1)), None);
    assert_eq!(age_on("not a date", day(2024, 1, 1)), None);
    assert_eq!(age_on("", day(2024, 1, 1)), None);
}

#[test]
fn path_lookup_never_fails() {
    let value = json!({ "a": { "b": { "c": "deep", "n": 7, "o": {} } }, "s": "flat" });
    assert_eq!(lookup_text(&value, &["a", "b", "c"]).as_deref(), Some("deep"));
    assert_eq!(lookup_text(&value, &["a", "b", "n"]).as_deref(), Some("7"));
    assert_eq!(lookup_text(&value, &["a", "b", "o"]), None);
    assert_eq!(lookup_text(&value, &["s", "x"]), None);
    assert_eq!(lookup_text(&value, &["missing", "b"]), None);
    assert_eq!(first_text(&value, &[&["nope"], &["a", "b", "c"]]), "deep");
    assert_eq!(first_text(&value, &[&["nope"]]), "");
}
