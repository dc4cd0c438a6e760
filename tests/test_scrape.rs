//! Tests for page scraping over a local HTTP server

mod common;

use common::{local_options, TestServer};
use serde_json::Value;
use tempfile::TempDir;
use utilkit::web::{build_client, scrape_to_json, to_json_string, write_json, FetchError};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Field Notes</title>
    <meta name="description" content="Notes from the field">
    <meta property="og:title" content="Field Notes">
    <meta charset="utf-8">
</head>
<body>
    <h1>Welcome</h1>
    <h2>Day <em>one</em></h2>
    <p>First   paragraph.</p>
    <p>Café <b>au</b> lait</p>
    <a href="/about">About <span>us</span></a>
    <a>no href</a>
    <img src="/img/a.png" alt="A">
    <img src="/img/b.png">
</body>
</html>"#;

#[test]
fn test_scrape_extracts_document() {
    let server = TestServer::builder().html("/notes", PAGE).start();
    let client = build_client(&local_options()).unwrap();
    let url = server.url("/notes");

    let document = scrape_to_json(&client, &url).unwrap();

    assert_eq!(document.url, url);
    assert_eq!(document.title.as_deref(), Some("Field Notes"));
    assert_eq!(document.meta.len(), 2);
    assert_eq!(document.meta["description"], "Notes from the field");
    assert_eq!(document.meta["og:title"], "Field Notes");
    assert_eq!(document.headings.h1, vec!["Welcome"]);
    assert_eq!(document.headings.h2, vec!["Dayone"]);
    assert!(document.headings.h3.is_empty());
    assert_eq!(document.paragraphs, vec!["First   paragraph.", "Caféaulait"]);
    assert_eq!(document.links.len(), 1);
    assert_eq!(document.links[0].text, "Aboutus");
    assert_eq!(document.links[0].href, "/about");
    assert_eq!(document.images.len(), 2);
    assert_eq!(document.images[1].alt, None);
    assert_eq!(document.images[1].src.as_deref(), Some("/img/b.png"));
}

#[test]
fn test_json_key_order_and_unicode() {
    let server = TestServer::builder().html("/", PAGE).start();
    let client = build_client(&local_options()).unwrap();

    let document = scrape_to_json(&client, &server.url("/")).unwrap();
    let json = to_json_string(&document).unwrap();

    let keys: Vec<String> = match serde_json::from_str::<Value>(&json).unwrap() {
        Value::Object(map) => map.keys().cloned().collect(),
        other => panic!("expected object, got {:?}", other),
    };
    assert_eq!(
        keys,
        vec!["url", "title", "meta", "headings", "paragraphs", "links", "images"]
    );
    assert!(json.contains("Café"), "non-ASCII should not be escaped");
    assert!(json.contains("\n  \"url\""), "two-space indentation");
}

#[test]
fn test_write_json_creates_parent_dirs() {
    let server = TestServer::builder().html("/", PAGE).start();
    let client = build_client(&local_options()).unwrap();
    let document = scrape_to_json(&client, &server.url("/")).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("results").join("output.json");
    write_json(&document, &out).unwrap();

    let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed["title"], "Field Notes");
}

#[test]
fn test_http_error_status_fails() {
    let server = TestServer::builder().html("/", PAGE).start();
    let client = build_client(&local_options()).unwrap();

    let err = scrape_to_json(&client, &server.url("/missing")).unwrap_err();
    match err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {:?}", other),
    }
}
