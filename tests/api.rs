//
//  wpcom-kit
//  tests/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end tests of `WpcomClient` over `HttpTransport` against a mock server.

use mockito::{Matcher, Server};
use serde_json::json;

use wpcom_kit::api::backup::{BackupStatus, JetpackRestoreTypes};
use wpcom_kit::api::editor::MobileEditor;
use wpcom_kit::api::scan::{ScanState, ThreatFixType};
use wpcom_kit::api::site::SiteCreationRequest;
use wpcom_kit::api::{ApiError, HttpTransport, TransportError, WpcomClient};
use wpcom_kit::auth::AuthCredential;

fn client(server: &Server) -> WpcomClient {
    let transport = HttpTransport::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::bearer("test-token"));
    WpcomClient::new(transport)
}

#[tokio::test]
async fn prepare_backup_sends_rewind_id_and_types() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/wpcom/v2/sites/7/rewind/downloads/")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(json!({
            "rewindId": "1700000000.5",
            "types": {
                "themes": true,
                "plugins": true,
                "uploads": false,
                "sqls": true,
                "roots": true,
                "contents": true
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "downloadId": 91,
                "rewindId": "1700000000.5",
                "backupPoint": "2023-11-14T22:13:20+00:00",
                "startedAt": "2023-11-15T08:00:00+00:00",
                "progress": 0
            })
            .to_string(),
        )
        .create_async()
        .await;

    let types = JetpackRestoreTypes {
        uploads: false,
        ..JetpackRestoreTypes::default()
    };
    let backup = client(&server)
        .prepare_backup(7, Some("1700000000.5"), Some(types))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(backup.download_id, 91);
    assert_eq!(backup.status(), BackupStatus::Preparing);
}

#[tokio::test]
async fn backup_status_ready() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wpcom/v2/sites/7/rewind/downloads/91")
        .with_status(200)
        .with_body(
            json!({
                "downloadId": 91,
                "rewindId": "1700000000.5",
                "backupPoint": "2023-11-14T22:13:20+00:00",
                "startedAt": "2023-11-15T08:00:00+00:00",
                "progress": 100,
                "downloadCount": 0,
                "url": "https://example.com/backup.tar.gz",
                "validUntil": "2023-11-22T08:00:00+00:00"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let backup = client(&server).backup_status(7, 91).await.unwrap();
    assert_eq!(backup.status(), BackupStatus::Ready);
    assert_eq!(backup.url.as_deref(), Some("https://example.com/backup.tar.gz"));
    assert!(backup.valid_until.is_some());
}

#[tokio::test]
async fn server_error_is_a_transport_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wpcom/v2/sites/7/rewind/downloads/91")
        .with_status(500)
        .with_body(r#"{"code":"internal_error","message":"Something broke"}"#)
        .create_async()
        .await;

    let err = client(&server).backup_status(7, 91).await.unwrap_err();
    match err {
        ApiError::Transport(TransportError::Http { status, code, message }) => {
            assert_eq!(status, 500);
            assert_eq!(code.as_deref(), Some("internal_error"));
            assert_eq!(message, "Something broke");
        }
        other => panic!("expected an HTTP transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_an_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wpcom/v2/sites/7/scan")
        .with_status(403)
        .with_body(r#"{"error":"unauthorized","message":"User cannot access this private blog."}"#)
        .create_async()
        .await;

    let err = client(&server).scan(7).await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn malformed_body_is_a_decoding_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wpcom/v2/sites/7/rewind/downloads/91")
        .with_status(200)
        .with_body(r#"{"downloadId":"ninety-one"}"#)
        .create_async()
        .await;

    let err = client(&server).backup_status(7, 91).await.unwrap_err();
    assert!(matches!(err, ApiError::Decoding(_)));
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wpcom/v2/sites/7/gutenberg")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client(&server).editor_settings(7).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::InvalidJson { status: 200, .. })
    ));
}

#[tokio::test]
async fn scan_with_threat_context() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wpcom/v2/sites/7/scan")
        .with_status(200)
        .with_body(
            json!({
                "state": "idle",
                "threats": [{
                    "id": 1234,
                    "signature": "PHP.Backdoor.Generic",
                    "description": "Backdoor found",
                    "first_detected": "2023-11-01T10:00:00+00:00",
                    "filename": "/var/www/wp-content/evil.php",
                    "status": "current",
                    "fixer": {"fixer": "quarantine"},
                    "context": {
                        "3": "start test",
                        "4": "VIRUS_SIG",
                        "5": "end test",
                        "marks": {"4": [[0, 9]]}
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let scan = client(&server).scan(7).await.unwrap();
    assert_eq!(scan.state, ScanState::Idle);

    let threat = &scan.threats.as_ref().unwrap()[0];
    assert_eq!(threat.fixer.as_ref().unwrap().fix_type, ThreatFixType::Unknown);
    let context = threat.context.as_ref().unwrap();
    let numbers: Vec<u64> = context.lines.iter().map(|l| l.line_number).collect();
    assert_eq!(numbers, vec![3, 4, 5]);
    assert_eq!(context.line(4).unwrap().highlights, vec![0..9]);
}

#[tokio::test]
async fn ignore_threat_posts_ignore_flag() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/wpcom/v2/sites/7/alerts/1234")
        .match_body(Matcher::Json(json!({"ignore": true})))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    client(&server).ignore_threat(7, 1234).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn set_mobile_editor_for_all_sites() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/wpcom/v2/me/gutenberg")
        .match_body(Matcher::Json(json!({
            "editor": "gutenberg",
            "platform": "mobile",
            "set_only_if_empty": false
        })))
        .with_status(200)
        .with_body(r#"{"7":"gutenberg","8":"gutenberg"}"#)
        .create_async()
        .await;

    let sites = client(&server)
        .set_mobile_editor_for_all_sites(MobileEditor::Gutenberg, false)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(sites.len(), 2);
}

#[tokio::test]
async fn create_site() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1.1/sites/new")
        .match_body(Matcher::PartialJson(json!({
            "blog_name": "fieldnotes",
            "public": 0,
            "options": {"site_information": {"site_tagline": "Dispatches"}}
        })))
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "blog_details": {
                    "blogid": "201876543",
                    "blogname": "Field Notes",
                    "url": "https://fieldnotes.wordpress.com/",
                    "xmlrpc": "https://fieldnotes.wordpress.com/xmlrpc.php"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let request = SiteCreationRequest {
        tagline: Some("Dispatches".to_string()),
        is_public: false,
        ..SiteCreationRequest::new(1, "Field Notes", "fieldnotes", "en", "11", "secret")
    };
    let response = client(&server).create_site(&request).await.unwrap();

    mock.assert_async().await;
    assert!(response.success);
    assert_eq!(response.created_site.id, 201876543);
    assert_eq!(response.created_site.url, "https://fieldnotes.wordpress.com/");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let transport = HttpTransport::new("http://127.0.0.1:1/").unwrap();
    let err = WpcomClient::new(transport).scan(7).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(TransportError::Network(_))));
}
