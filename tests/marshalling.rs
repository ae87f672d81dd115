use scan_bundle::{
    BundleError, BundleValue, DependentRecord, DependentScheme, DocumentRecord, FlatBundle,
    MarshalOptions, RecordMarshaller, SchemaGeneration,
};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).expect("test url")
}

fn full_record() -> DocumentRecord {
    DocumentRecord {
        date_of_birth: Some("12.03.1985".to_string()),
        coa_address: Some("Street 1 Block 2".to_string()),
        province: Some("Kabul".to_string()),
        district: Some("District 4".to_string()),
        village: Some("Village".to_string()),
        document_number: Some("1400-0101-12345".to_string()),
        full_name: Some("Jane Example".to_string()),
        fathers_name: Some("John Example".to_string()),
        age: Some(39),
        gender: Some("F".to_string()),
        front_image: Some(url("content://io.nawa.kobo.mrz.fileprovider/frontImage.jpg")),
        back_image: Some(url("content://io.nawa.kobo.mrz.fileprovider/backImage.jpg")),
        face_image: Some(url("content://io.nawa.kobo.mrz.fileprovider/faceImage.jpg")),
        dependents_info: Some("[]".to_string()),
        dependents: None,
        date_of_issue: Some("01.01.2020".to_string()),
        document_additional_number: Some("A-77".to_string()),
        date_of_expiry: Some("01.01.2030".to_string()),
    }
}

fn minimal_record() -> DocumentRecord {
    DocumentRecord {
        date_of_birth: Some("12.03.1985".to_string()),
        document_number: Some("N-1".to_string()),
        full_name: Some("Jane Example".to_string()),
        age: Some(39),
        gender: Some("F".to_string()),
        ..Default::default()
    }
}

fn marshaller(generation: SchemaGeneration, scheme: DependentScheme) -> RecordMarshaller {
    RecordMarshaller::new(MarshalOptions::new(generation, scheme))
}

#[test]
fn full_record_round_trips_every_scalar() {
    let m = RecordMarshaller::default();
    let record = full_record();
    let bundle = m.encode(&record).expect("encode");
    let decoded = m.decode(&bundle);
    assert_eq!(decoded, record);
}

#[test]
fn canonical_keys_and_dep_copies_are_written() {
    let bundle = RecordMarshaller::default().encode(&full_record()).expect("encode");

    let expected_text = [
        ("dateOfBirth", "12.03.1985"),
        ("CoAAddress", "Street 1 Block 2"),
        ("province", "Kabul"),
        ("district", "District 4"),
        ("village", "Village"),
        ("documentNumber", "1400-0101-12345"),
        ("fullName", "Jane Example"),
        ("fathersName", "John Example"),
        ("gender", "F"),
        ("dependentsInfo", "[]"),
        ("dateOfIssue", "01.01.2020"),
        ("documentAdditionalNumber", "A-77"),
        ("dateOfExpiry", "01.01.2030"),
        ("frontImageUri", "content://io.nawa.kobo.mrz.fileprovider/frontImage.jpg"),
        ("backImageUri", "content://io.nawa.kobo.mrz.fileprovider/backImage.jpg"),
        ("DocumentFaceUri", "content://io.nawa.kobo.mrz.fileprovider/faceImage.jpg"),
        ("dateOfBirth_dep", "12.03.1985"),
        ("documentNumber_dep", "1400-0101-12345"),
        ("fullName_dep", "Jane Example"),
        ("fathersName_dep", "John Example"),
        ("gender_dep", "F"),
        ("frontImageUri_dep", "content://io.nawa.kobo.mrz.fileprovider/frontImage.jpg"),
        ("backImageUri_dep", "content://io.nawa.kobo.mrz.fileprovider/backImage.jpg"),
        ("DocumentFaceUri_dep", "content://io.nawa.kobo.mrz.fileprovider/faceImage.jpg"),
    ];
    for (key, value) in expected_text {
        assert_eq!(
            bundle.get(key),
            Some(&BundleValue::Str(value.to_string())),
            "wrong value for {}",
            key
        );
    }
    assert_eq!(bundle.get("age"), Some(&BundleValue::Int(39)));
    assert_eq!(bundle.get("age_dep"), Some(&BundleValue::Int(39)));
    assert_eq!(bundle.len(), expected_text.len() + 2);
}

#[test]
fn absent_images_are_omitted() {
    let record = DocumentRecord {
        back_image: Some(url("content://store/backImage.jpg")),
        ..minimal_record()
    };
    let bundle = RecordMarshaller::default().encode(&record).expect("encode");

    for key in [
        "frontImageUri",
        "frontImageUri_dep",
        "DocumentFaceUri",
        "DocumentFaceUri_dep",
    ] {
        assert!(!bundle.contains_key(key), "{} should be omitted", key);
    }
    assert!(bundle.contains_key("backImageUri"));
    assert!(bundle.contains_key("backImageUri_dep"));
}

#[test]
fn missing_optional_field_still_encodes() {
    let record = minimal_record();
    assert!(record.fathers_name.is_none());
    let bundle = RecordMarshaller::default().encode(&record).expect("encode");
    assert!(!bundle.contains_key("fathersName"));
    assert_eq!(bundle.text("fullName").as_deref(), Some("Jane Example"));
}

#[test]
fn missing_required_field_fails_before_writing() {
    let record = DocumentRecord {
        full_name: None,
        ..minimal_record()
    };
    match RecordMarshaller::default().encode(&record) {
        Err(BundleError::MissingRequiredParameters(missing)) => {
            assert_eq!(missing, vec!["fullName"]);
        }
        other => panic!("expected missing-parameter error, got {:?}", other),
    }

    let empty = DocumentRecord::default();
    assert_eq!(
        empty.missing_required(),
        vec!["documentNumber", "fullName", "age", "gender", "dateOfBirth"]
    );
}

#[test]
fn empty_strings_count_as_present() {
    let record = DocumentRecord {
        gender: Some(String::new()),
        ..minimal_record()
    };
    assert!(record.validate().is_ok());
}

#[test]
fn first_generation_ignores_later_fields() {
    let m = marshaller(SchemaGeneration::V1, DependentScheme::Positional);
    let bundle = m.encode(&full_record()).expect("encode");
    for key in [
        "dateOfIssue",
        "documentAdditionalNumber",
        "dateOfExpiry",
        "DocumentFaceUri",
        "DocumentFaceUri_dep",
    ] {
        assert!(!bundle.contains_key(key), "v1 bundle should not carry {}", key);
    }

    let v2_bundle = RecordMarshaller::default().encode(&full_record()).expect("encode");
    let decoded = m.decode(&v2_bundle);
    assert_eq!(decoded.date_of_issue, None);
    assert_eq!(decoded.face_image, None);
    assert_eq!(decoded.full_name.as_deref(), Some("Jane Example"));
}

#[test]
fn generation_tags_parse() {
    assert_eq!(SchemaGeneration::try_from(1).ok(), Some(SchemaGeneration::V1));
    assert_eq!(SchemaGeneration::try_from(2).ok(), Some(SchemaGeneration::V2));
    assert!(matches!(
        SchemaGeneration::try_from(3),
        Err(BundleError::UnsupportedGeneration(3))
    ));
    assert_eq!(SchemaGeneration::default(), SchemaGeneration::V2);
}

#[test]
fn malformed_image_reference_decodes_to_none() {
    let mut bundle = RecordMarshaller::default().encode(&full_record()).expect("encode");
    bundle.put("frontImageUri", "not a uri");

    let decoded = RecordMarshaller::default().decode(&bundle);
    assert_eq!(decoded.front_image, None);
    assert_eq!(decoded.back_image, full_record().back_image);
    assert_eq!(decoded.full_name.as_deref(), Some("Jane Example"));
    assert_eq!(decoded.age, Some(39));
}

#[test]
fn age_sentinel_and_non_numeric_values() {
    let m = RecordMarshaller::default();
    let mut bundle = FlatBundle::new();
    assert_eq!(m.decode(&bundle).age, None);

    bundle.put("age", -1);
    assert_eq!(m.decode(&bundle).age, None);

    bundle.put("age", "abc");
    assert_eq!(m.decode(&bundle).age, None);

    bundle.put("age", "27");
    assert_eq!(m.decode(&bundle).age, Some(27));
}

#[test]
fn dependents_follow_the_record_option() {
    let m = marshaller(SchemaGeneration::V2, DependentScheme::Positional);

    let none = m.encode(&minimal_record()).expect("encode");
    assert!(!none.contains_key("dependentCount"));

    let empty = m
        .encode(&DocumentRecord {
            dependents: Some(Vec::new()),
            ..minimal_record()
        })
        .expect("encode");
    assert_eq!(empty.int("dependentCount"), Some(0));
    assert!(!empty.keys().any(|k| k.starts_with("dependent0")));

    let joined = marshaller(SchemaGeneration::V2, DependentScheme::Joined)
        .encode(&DocumentRecord {
            dependents: Some(Vec::new()),
            ..minimal_record()
        })
        .expect("encode");
    assert!(!joined.keys().any(|k| k.starts_with("dependent")));
}

#[test]
fn decode_leaves_dependents_to_the_caller() {
    let list = vec![
        DependentRecord {
            full_name: "Child One".to_string(),
            sex: "M".to_string(),
            ..Default::default()
        },
        DependentRecord {
            full_name: "Child Two".to_string(),
            date_of_birth: "02.02.2020".to_string(),
            ..Default::default()
        },
    ];
    let record = DocumentRecord {
        dependents: Some(list.clone()),
        ..minimal_record()
    };

    for scheme in [DependentScheme::Positional, DependentScheme::Joined] {
        let m = marshaller(SchemaGeneration::V2, scheme);
        let bundle = m.encode(&record).expect("encode");

        let decoded = m.decode(&bundle);
        assert_eq!(decoded.dependents, None, "{} decode must not rebuild dependents", scheme);
        assert_eq!(m.decode_dependents(&bundle), list, "{} dependents mismatch", scheme);
        assert_eq!(m.decode_with_dependents(&bundle).dependents, Some(list.clone()));
    }
}

#[test]
fn oversized_age_is_clamped_on_the_wire() {
    let record = DocumentRecord {
        age: Some(u32::MAX),
        ..minimal_record()
    };
    let bundle = RecordMarshaller::default().encode(&record).expect("encode");
    assert_eq!(bundle.int("age"), Some(i32::MAX));
    assert_eq!(bundle.int("age_dep"), Some(i32::MAX));
}

#[test]
fn bundle_json_tolerates_nulls_and_odd_numbers() {
    let bundle: FlatBundle = serde_json::from_str(
        r#"{"fullName":"A","fathersName":null,"CoAAddress":null,"age":30,"dependentCount":2.0}"#,
    )
    .expect("nulls are accepted");
    assert_eq!(bundle.text("fullName").as_deref(), Some("A"));
    assert!(!bundle.contains_key("fathersName"), "null reads as absent");
    assert!(!bundle.contains_key("CoAAddress"));
    assert_eq!(bundle.int("age"), Some(30));
    assert_eq!(bundle.int("dependentCount"), None);

    let m = RecordMarshaller::default();
    for text in [r#"{"age":30.0}"#, r#"{"age":4294967296}"#, r#"{"age":true}"#] {
        let bundle: FlatBundle = serde_json::from_str(text).expect("scalar accepted");
        assert_eq!(m.decode(&bundle).age, None, "{} must degrade to absent", text);
    }

    let big: FlatBundle = serde_json::from_str(r#"{"n":4294967296}"#).expect("big int");
    assert_eq!(big.get("n"), Some(&BundleValue::Str("4294967296".to_string())));

    assert!(serde_json::from_str::<FlatBundle>(r#"{"nested":{"a":1}}"#).is_err());
}

#[test]
fn bundle_serializes_as_flat_json() {
    let bundle = RecordMarshaller::default().encode(&minimal_record()).expect("encode");
    let text = serde_json::to_string(&bundle).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["age"], serde_json::json!(39));
    assert_eq!(value["fullName"], serde_json::json!("Jane Example"));

    let back: FlatBundle = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, bundle);
}
