//
//  wpcom-kit
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;
use tempfile::TempDir;

/// A `wpk` invocation isolated from the user's config and environment.
fn wpk(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wpk").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("WPK_SITE")
        .env_remove("WPK_TOKEN")
        .env_remove("WPK_DEBUG");
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("wpk");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    wpk(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("backup"))
        .stdout(contains("scan"))
        .stdout(contains("editor"))
        .stdout(contains("site"));
}

#[test]
fn version_prints_crate_version() {
    let home = TempDir::new().unwrap();
    wpk(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    wpk(&home)
        .args(["config", "set", "defaults.site_id", "42"])
        .assert()
        .success();
    wpk(&home)
        .args(["config", "get", "defaults.site_id"])
        .assert()
        .success()
        .stdout(contains("42"));
}

#[test]
fn config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    wpk(&home)
        .args(["config", "set", "core.editor", "vim"])
        .assert()
        .failure()
        .stderr(contains("Unknown configuration key"));
}

#[test]
fn backup_without_site_fails() {
    let home = TempDir::new().unwrap();
    wpk(&home)
        .args(["backup", "list"])
        .assert()
        .code(1)
        .stderr(contains("No site specified"));
}

#[test]
fn backup_status_against_mock_server() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/wpcom/v2/sites/7/rewind/downloads/91")
        .match_header("authorization", "Bearer env-token")
        .with_status(200)
        .with_body(
            json!({
                "downloadId": 91,
                "rewindId": "1700000000.5",
                "backupPoint": "2023-11-14T22:13:20+00:00",
                "startedAt": "2023-11-15T08:00:00+00:00",
                "progress": 40
            })
            .to_string(),
        )
        .create();

    let home = TempDir::new().unwrap();
    write_config(&home, &format!("[api]\nbase_url = \"{}\"\n", server.url()));

    wpk(&home)
        .env("WPK_TOKEN", "env-token")
        .args(["--site", "7", "--json", "backup", "status", "91"])
        .assert()
        .success()
        .stdout(contains("\"download_id\": 91"))
        .stdout(contains("\"progress\": 40"));

    mock.assert();
}

#[test]
fn not_found_maps_to_exit_code() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/wpcom/v2/sites/7/scan")
        .with_status(404)
        .with_body(r#"{"error":"unknown_blog","message":"Unknown blog"}"#)
        .create();

    let home = TempDir::new().unwrap();
    write_config(&home, &format!("[api]\nbase_url = \"{}\"\n", server.url()));

    wpk(&home)
        .env("WPK_TOKEN", "env-token")
        .args(["--site", "7", "scan", "status"])
        .assert()
        .code(8)
        .stderr(contains("Unknown blog"));
}

#[test]
fn empty_backup_list_prints_notice() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/wpcom/v2/sites/7/rewind/downloads/")
        .with_status(200)
        .with_body("[]")
        .create();

    let home = TempDir::new().unwrap();
    write_config(&home, &format!("[api]\nbase_url = \"{}\"\n", server.url()));

    wpk(&home)
        .env("WPK_TOKEN", "env-token")
        .args(["--site", "7", "backup", "list"])
        .assert()
        .success()
        .stdout(contains("No backup downloads found."));

    wpk(&home)
        .env("WPK_TOKEN", "env-token")
        .args(["--site", "7", "--json", "backup", "list"])
        .assert()
        .success()
        .stdout(contains("No backup downloads found.").not());
}

#[test]
fn unsuccessful_site_creation_warns() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/rest/v1.1/sites/new")
        .with_status(200)
        .with_body(
            json!({
                "success": false,
                "blog_details": {
                    "blogid": 55,
                    "blogname": "Field Notes",
                    "url": "https://fieldnotes.wordpress.com/",
                    "xmlrpc": "https://fieldnotes.wordpress.com/xmlrpc.php"
                }
            })
            .to_string(),
        )
        .create();

    let home = TempDir::new().unwrap();
    write_config(
        &home,
        &format!(
            "[api]\nbase_url = \"{}\"\n\n[oauth]\nclient_id = \"11\"\nclient_secret = \"s\"\n",
            server.url()
        ),
    );

    wpk(&home)
        .env("WPK_TOKEN", "env-token")
        .args(["site", "create", "--title", "Field Notes"])
        .assert()
        .success()
        .stderr(contains("warning:"))
        .stderr(contains("did not report success"));
}
