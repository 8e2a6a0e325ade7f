//! Integration tests for the mail.tm client against a mock server

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use lf_core::domain::value_objects::{SenderFilter, VerificationTarget};
use lf_core::errors::{AuthError, ResolveError, ResolveStage, StoreError};
use lf_core::services::{
    FixedClock, MailboxAuthenticator, MailboxSession, MessageStore, ResolverConfig,
    VerificationCodeResolver,
};
use lf_infra::{AccountOutcome, InfrastructureError, MailTmClient};
use lf_shared::MailboxConfig;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiJ9.test";

fn client(server: &MockServer) -> MailTmClient {
    MailTmClient::new(MailboxConfig::new(server.uri())).unwrap()
}

fn listing() -> serde_json::Value {
    json!({
        "hydra:member": [
            {
                "id": "msg-old",
                "createdAt": "2024-05-01T09:57:00+00:00",
                "from": { "name": "Acme", "address": "no-reply@acme.test" },
                "subject": "Your code"
            },
            {
                "id": "msg-new",
                "createdAt": "2024-05-01T09:59:00+00:00",
                "from": { "name": "Acme", "address": "no-reply@acme.test" },
                "subject": "Your code"
            },
            {
                "id": "msg-other",
                "createdAt": "2024-05-01T09:59:30+00:00",
                "from": { "name": "Other", "address": "news@other.test" },
                "subject": "Newsletter"
            }
        ],
        "hydra:totalItems": 3
    })
}

#[tokio::test]
async fn test_list_messages_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&server)
        .await;

    let messages = client(&server).list_messages(TOKEN).await.unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].id, "msg-old");
    assert_eq!(
        messages[1].created_at,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 59, 0).unwrap())
    );
}

#[tokio::test]
async fn test_list_messages_non_200_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid JWT Token"))
        .mount(&server)
        .await;

    match client(&server).list_messages(TOKEN).await {
        Err(StoreError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid JWT Token");
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_messages_bad_payload_is_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client(&server).list_messages(TOKEN).await;
    assert!(matches!(result, Err(StoreError::Payload { .. })));
}

#[tokio::test]
async fn test_get_message_reads_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/msg-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg-new",
            "text": "Your verification code is 482913.",
            "html": ["<p>Your verification code is <b>482913</b>.</p>"]
        })))
        .mount(&server)
        .await;

    let content = client(&server).get_message(TOKEN, "msg-new").await.unwrap();

    assert_eq!(content.id, "msg-new");
    assert_eq!(content.text, "Your verification code is 482913.");
}

#[tokio::test]
async fn test_request_token_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_json(json!({ "address": "qa@mail.test", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN, "id": "acc-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server)
        .request_token("qa@mail.test", "hunter22")
        .await
        .unwrap();

    assert_eq!(token, TOKEN);
}

#[tokio::test]
async fn test_request_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials."))
        .mount(&server)
        .await;

    let result = client(&server).request_token("qa@mail.test", "wrong").await;
    assert_eq!(
        result,
        Err(AuthError::LoginRejected {
            status: 401,
            body: "Invalid credentials.".to_string(),
        })
    );
}

#[tokio::test]
async fn test_request_token_without_token_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "acc-1" })))
        .mount(&server)
        .await;

    let result = client(&server).request_token("qa@mail.test", "hunter22").await;
    assert_eq!(result, Err(AuthError::MissingToken));
}

#[tokio::test]
async fn test_session_login_reuses_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let session = MailboxSession::new();
    session.login(&client, "qa@mail.test", "hunter22").await.unwrap();
    session.login(&client, "qa@mail.test", "hunter22").await.unwrap();

    assert_eq!(session.token().await.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_list_domains_keeps_active_ones() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hydra:member": [
                { "id": "d1", "domain": "retired.test", "isActive": false },
                { "id": "d2", "domain": "mail.test", "isActive": true }
            ]
        })))
        .mount(&server)
        .await;

    let domains = client(&server).list_domains().await.unwrap();
    assert_eq!(domains, vec!["mail.test".to_string()]);
}

#[tokio::test]
async fn test_generate_address_uses_first_domain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hydra:member": [{ "domain": "mail.test", "isActive": true }]
        })))
        .mount(&server)
        .await;

    let client = client(&server);

    let named = client.generate_address(Some("QA-Login")).await.unwrap();
    assert_eq!(named, "qa-login@mail.test");

    let random = client.generate_address(None).await.unwrap();
    let (local, domain) = random.split_once('@').unwrap();
    assert_eq!(domain, "mail.test");
    assert_eq!(local.len(), 10);
    assert!(local.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn test_generate_address_without_domains_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hydra:member": [] })))
        .mount(&server)
        .await;

    let result = client(&server).generate_address(None).await;
    assert!(matches!(
        result,
        Err(InfrastructureError::Mailbox(StoreError::Payload { .. }))
    ));
}

#[tokio::test]
async fn test_create_account_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts"))
        .and(body_json(json!({ "address": "new@mail.test", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "acc-9",
            "address": "new@mail.test"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/accounts"))
        .and(body_json(json!({ "address": "taken@mail.test", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "violations": [{ "propertyPath": "address", "message": "This value is already used." }]
        })))
        .mount(&server)
        .await;

    let client = client(&server);

    let created = client.create_account("new@mail.test", "hunter22").await.unwrap();
    assert_eq!(
        created,
        AccountOutcome::Created {
            id: "acc-9".to_string(),
            address: "new@mail.test".to_string(),
        }
    );

    let existing = client.create_account("taken@mail.test", "hunter22").await.unwrap();
    assert_eq!(
        existing,
        AccountOutcome::AlreadyExists {
            address: "taken@mail.test".to_string(),
        }
    );
}

#[tokio::test]
async fn test_create_account_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client(&server).create_account("new@mail.test", "hunter22").await;
    assert!(matches!(
        result,
        Err(InfrastructureError::Mailbox(StoreError::Status { status: 500, .. }))
    ));
}

fn resolver_for(client: MailTmClient) -> VerificationCodeResolver {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    VerificationCodeResolver::new(
        Arc::new(MailboxSession::with_token(TOKEN)),
        ResolverConfig::default(),
    )
    .with_message_store(Arc::new(client))
    .with_clock(Arc::new(clock))
}

#[tokio::test]
async fn test_resolve_email_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/messages/msg-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg-new",
            "text": "Hello,\nyour login code is 908172.\nIt expires in 5 minutes."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(client(&server));
    let target = VerificationTarget::Email(SenderFilter::new("Acme", "no-reply@acme.test"));

    let code = resolver.resolve(&target).await.unwrap();
    assert_eq!(code.as_str(), "908172");
}

#[tokio::test]
async fn test_resolve_email_server_failure_is_fetch_stage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let resolver = resolver_for(client(&server));
    let target = VerificationTarget::Email(SenderFilter::new("Acme", "no-reply@acme.test"));

    match resolver.resolve(&target).await {
        Err(ResolveError::ExternalService { stage, source, .. }) => {
            assert_eq!(stage, ResolveStage::Fetch);
            assert!(matches!(source, StoreError::Status { status: 503, .. }));
        }
        other => panic!("Expected ExternalService, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_inbox_times_out_as_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = MailboxConfig {
        request_timeout_secs: 1,
        ..MailboxConfig::new(server.uri())
    };
    let client = MailTmClient::new(config).unwrap();

    let direct = client.list_messages(TOKEN).await;
    assert!(matches!(direct, Err(StoreError::Transport { .. })));

    let resolver = resolver_for(client);
    let target = VerificationTarget::Email(SenderFilter::new("Acme", "no-reply@acme.test"));

    match resolver.resolve(&target).await {
        Err(ResolveError::ExternalService { stage, source, .. }) => {
            assert_eq!(stage, ResolveStage::Fetch);
            assert!(matches!(source, StoreError::Transport { .. }));
        }
        other => panic!("Expected ExternalService, got {:?}", other),
    }
}
