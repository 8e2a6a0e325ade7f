//! Unit tests for inbox message decoding and field checks

use chrono::{TimeZone, Utc};

use crate::domain::entities::inbox_message::{InboxMessage, MessageContent, MessageSender};

#[test]
fn test_decode_mail_tm_listing_entry() {
    let json = r#"{
        "@id": "/messages/64f1",
        "id": "64f1",
        "accountId": "/accounts/abc",
        "msgid": "<x@acme.com>",
        "from": {"name": "Acme", "address": "a@x.com"},
        "to": [{"name": "", "address": "tester@mail.tm"}],
        "subject": "Your login code",
        "seen": false,
        "createdAt": "2024-05-01T10:15:30+00:00"
    }"#;

    let message: InboxMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.id, "64f1");
    assert_eq!(
        message.created_at,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap())
    );
    assert_eq!(message.from, Some(MessageSender::new("Acme", "a@x.com")));
    assert_eq!(message.subject.as_deref(), Some("Your login code"));
}

#[test]
fn test_decode_converts_offsets_to_utc() {
    let json = r#"{"id": "1", "createdAt": "2024-05-01T18:15:30+08:00", "from": {}, "subject": "x"}"#;
    let message: InboxMessage = serde_json::from_str(json).unwrap();
    assert_eq!(
        message.created_at,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap())
    );
    assert!(message.from.unwrap().is_empty());
}

#[test]
fn test_required_fields_report_missing_field() {
    let json = r#"{"id": "1", "from": {"name": "Acme", "address": "a@x.com"}, "subject": "x"}"#;
    let message: InboxMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.required_fields().unwrap_err(), "createdAt");

    let json = r#"{"id": "2", "createdAt": "2024-05-01T10:15:30Z", "from": null, "subject": "x"}"#;
    let message: InboxMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.required_fields().unwrap_err(), "from");

    let json = r#"{"id": "3", "createdAt": "2024-05-01T10:15:30Z", "from": {"name": "A", "address": "a@x.com"}}"#;
    let message: InboxMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.required_fields().unwrap_err(), "subject");
}

#[test]
fn test_sender_identity() {
    let sender = MessageSender::new("Acme", "a@x.com");
    assert_eq!(sender.identity(), Ok(("Acme", "a@x.com")));

    assert_eq!(MessageSender::default().identity(), Err("from"));

    let no_name = MessageSender {
        name: None,
        address: Some("a@x.com".to_string()),
    };
    assert_eq!(no_name.identity(), Err("from.name"));

    let no_address = MessageSender {
        name: Some(String::new()),
        address: None,
    };
    assert_eq!(no_address.identity(), Err("from.address"));
}

#[test]
fn test_message_content_defaults_missing_text() {
    let content: MessageContent = serde_json::from_str(r#"{"id": "1", "html": ["<p>hi</p>"]}"#).unwrap();
    assert_eq!(content.text, "");
}
