// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - End-to-End Hunt Tests
 * Signature directory to MATCH FOUND report against a mock site
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::fs;
use std::sync::Arc;
use webshell_hunter::http_client::HttpClient;
use webshell_hunter::reporting::{format_match, MemoryReporter};
use webshell_hunter::{HuntOptions, Hunter, MatchPolicy, SignatureSet, Target};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn two_page_site() -> MockServer {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(format!(r#"<html><a href="{uri}/blog">Blog</a></html>"#), "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(format!(r#"<html><a href="{uri}/">Home</a></html>"#), "text/html"),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

fn signature_dir(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("webshells.txt"), contents).unwrap();
    dir
}

#[tokio::test]
async fn test_end_to_end_single_match() {
    let mock_server = two_page_site().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/shell.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<?php system($_GET['c']); ?>"))
        .mount(&mock_server)
        .await;

    let dir = signature_dir("# known shells\nshell.php\n\n");
    let signatures = SignatureSet::load(dir.path()).unwrap();
    assert_eq!(signatures.len(), 1);

    let reporter = Arc::new(MemoryReporter::new());
    let hunter = Hunter::new(
        Target::parse(&uri).unwrap(),
        signatures,
        HttpClient::new(5).unwrap(),
        reporter.clone(),
        HuntOptions::default(),
    );

    let report = hunter.run().await;

    // One probe per discovered page, built as <pageUrl><signature>
    let requested: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert!(requested.contains(&"/shell.php".to_string()));
    assert!(requested.contains(&"/blogshell.php".to_string()));

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.probes_sent, 2);

    let matches = reporter.matches();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].url, format!("{}/shell.php", uri));
    assert_eq!(matches[0].status_code, 200);
    assert_eq!(report.matches, matches);

    assert!(format_match(&matches[0]).starts_with(&format!("MATCH FOUND: {}/shell.php", uri)));
}

#[tokio::test]
async fn test_end_to_end_no_match_on_404() {
    let mock_server = two_page_site().await;

    let dir = signature_dir("c99.php\nr57.php\n");
    let reporter = Arc::new(MemoryReporter::new());
    let hunter = Hunter::new(
        Target::parse(&mock_server.uri()).unwrap(),
        SignatureSet::load(dir.path()).unwrap(),
        HttpClient::new(5).unwrap(),
        reporter.clone(),
        HuntOptions::default(),
    );

    let report = hunter.run().await;

    assert_eq!(report.probes_sent, 4);
    assert_eq!(report.probe_failures, 0);
    assert!(reporter.is_empty());
    assert!(report.matches.is_empty());
}

#[tokio::test]
async fn test_match_policy_decides_204() {
    let mock_server = two_page_site().await;

    Mock::given(method("GET"))
        .and(path("/cmd.aspx"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    for (policy, expected) in [(MatchPolicy::Success, 1), (MatchPolicy::Legacy, 0)] {
        let reporter = Arc::new(MemoryReporter::new());
        let options = HuntOptions {
            match_policy: policy,
            ..HuntOptions::default()
        };
        let hunter = Hunter::new(
            Target::parse(&mock_server.uri()).unwrap(),
            SignatureSet::new(vec!["cmd.aspx".to_string()]),
            HttpClient::new(5).unwrap(),
            reporter.clone(),
            options,
        );

        hunter.run().await;
        assert_eq!(reporter.len(), expected, "policy {}", policy);
    }
}
