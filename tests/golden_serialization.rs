use serde_json::Value;
use uhrp_core::admission::UhrpTopicManager;
use uhrp_core::types::{AdmittanceInstructions, ContentHash, TopicMetadata};

#[test]
fn golden_admittance_instructions_shape() {
    let instructions = AdmittanceInstructions {
        outputs_to_admit: vec![0, 2],
        coins_to_retain: vec![5],
    };

    let json = serde_json::to_string(&instructions).unwrap();
    assert_eq!(json, r#"{"outputsToAdmit":[0,2],"coinsToRetain":[5]}"#);

    // Key order is part of the byte-for-byte determinism contract.
    let admit_pos = json.find("\"outputsToAdmit\":").unwrap();
    let retain_pos = json.find("\"coinsToRetain\":").unwrap();
    assert!(admit_pos < retain_pos);

    let back: AdmittanceInstructions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, instructions);
}

#[test]
fn golden_topic_metadata_shape() {
    let metadata = UhrpTopicManager::default().metadata();

    let json: Value = serde_json::to_value(&metadata).unwrap();
    assert_eq!(json["name"], "UHRP");
    assert_eq!(
        json["shortDescription"],
        "Tracks UHRP file-hosting commitment advertisements."
    );
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));

    // Unset optionals are omitted, not null.
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("iconUrl"));
    assert!(!object.contains_key("informationUrl"));
}

#[test]
fn topic_metadata_optionals_serialize_camel_case_when_set() {
    let metadata = TopicMetadata {
        name: "UHRP".to_string(),
        short_description: "short".to_string(),
        icon_url: Some("https://example.com/icon.png".to_string()),
        version: None,
        information_url: Some("https://example.com/about".to_string()),
    };

    let json: Value = serde_json::to_value(&metadata).unwrap();
    assert_eq!(json["iconUrl"], "https://example.com/icon.png");
    assert_eq!(json["informationUrl"], "https://example.com/about");
    assert!(!json.as_object().unwrap().contains_key("version"));

    let back: TopicMetadata = serde_json::from_value(json).unwrap();
    assert_eq!(back, metadata);
}

#[test]
fn content_hash_serializes_as_hex_text() {
    let hash = ContentHash::from_content(b"some hosted file");

    let json = serde_json::to_string(&hash).unwrap();
    assert_eq!(json, format!("\"{}\"", hash.to_hex()));

    let back: ContentHash = serde_json::from_str(&json).unwrap();
    assert_eq!(back, hash);

    // Wrong-length hex is rejected at deserialization, not later.
    let short: Result<ContentHash, _> = serde_json::from_str("\"aabbcc\"");
    assert!(short.is_err());
}
