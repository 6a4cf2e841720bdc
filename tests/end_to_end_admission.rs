use chrono::Utc;
use uhrp_core::admission::UhrpTopicManager;
use uhrp_core::advertisement::{UhrpAdvertisement, PROTOCOL_ADDRESS};
use uhrp_core::script::{compact_size, PushDropToken};
use uhrp_core::transaction::{Transaction, TransactionOutput};
use uhrp_core::types::ContentHash;

const LOCK_KEY: [u8; 33] = [0x02; 33];

fn hosted_advertisement(expiry_time: u64) -> UhrpAdvertisement {
    let fields = vec![
        PROTOCOL_ADDRESS.to_vec(),
        ContentHash::from_content(b"the hosted file bytes")
            .as_bytes()
            .to_vec(),
        b"https://storage.example.com/file".to_vec(),
        compact_size(expiry_time),
        compact_size(2048),
        b"owner-address".to_vec(),
        b"advertise".to_vec(),
    ];
    UhrpAdvertisement::from_fields(&fields).unwrap()
}

#[test]
fn published_advertisement_admits_at_its_index() {
    let expiry_time = (Utc::now().timestamp_millis() + 3_600_000) as u64;
    let advertisement = hosted_advertisement(expiry_time);

    let advert_script = PushDropToken {
        lock_public_key: LOCK_KEY,
        fields: advertisement.to_fields(),
    }
    .to_script();

    // Sandwiched between a payment-shaped output and raw data.
    let beef = Transaction {
        outputs: vec![
            TransactionOutput {
                satoshis: 546,
                locking_script: vec![0x76, 0xa9, 0x14, 0x00, 0x88, 0xac],
            },
            TransactionOutput {
                satoshis: 100,
                locking_script: advert_script,
            },
            TransactionOutput {
                satoshis: 0,
                locking_script: vec![0x6a, 0x02, 0xbe, 0xef],
            },
        ],
    }
    .to_wire();

    let manager = UhrpTopicManager::default();
    let instructions = manager.identify_admissible_outputs(&beef, vec![11]);

    assert_eq!(instructions.outputs_to_admit, vec![1]);
    assert_eq!(instructions.coins_to_retain, vec![11]);

    // Re-evaluate to inspect the typed projection the gate produced.
    let transaction = Transaction::from_wire(&beef).unwrap();
    let evaluations = manager.evaluate_outputs(&transaction);
    let admitted = evaluations[1].verdict.as_ref().unwrap();

    assert_eq!(admitted, &advertisement);
    assert_eq!(
        admitted.content_hash,
        ContentHash::from_content(b"the hosted file bytes")
    );
    assert_eq!(
        admitted.location_url.as_str(),
        "https://storage.example.com/file"
    );
    assert_eq!(admitted.expiry_time, expiry_time);
    assert_eq!(admitted.file_size, 2048);
    assert_eq!(admitted.owner_address.as_deref(), Some(&b"owner-address"[..]));
    assert_eq!(admitted.action.as_deref(), Some(&b"advertise"[..]));
}

#[test]
fn expiry_converts_to_a_future_timestamp() {
    let expiry_time = (Utc::now().timestamp_millis() + 3_600_000) as u64;
    let advertisement = hosted_advertisement(expiry_time);

    let expires_at = advertisement.expires_at().unwrap();
    assert!(expires_at > Utc::now());
    assert_eq!(expires_at.timestamp_millis() as u64, expiry_time);
}

#[test]
fn field_projection_roundtrips_through_validation() {
    let advertisement = hosted_advertisement(1_750_000_000_000);
    let reparsed = UhrpAdvertisement::from_fields(&advertisement.to_fields()).unwrap();
    assert_eq!(reparsed, advertisement);
}

#[test]
fn documentation_surface_describes_the_contract() {
    let manager = UhrpTopicManager::default();
    let documentation = manager.documentation();

    assert!(documentation.contains("https"));
    assert!(documentation.contains("32-byte"));
    assert!(!documentation.is_empty());
}
