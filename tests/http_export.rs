//! Crawls against a mock Notion API and media host.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use serde_json::json;
use notion2markdown::{
    fetch_all_blocks, ApiKey, CrawlScheduler, HttpMediaFetcher, NotionHttpClient, NotionId,
    OutputLayout,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const TOKEN: &str = "secret_integration_test_token";

/// Matches first-page requests, which carry no cursor.
struct NoCursor;

impl Match for NoCursor {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(k, _)| k == "start_cursor")
    }
}

fn id(n: u32) -> NotionId {
    NotionId::parse(&format!("{:032x}", n)).unwrap()
}

fn client(server: &MockServer) -> NotionHttpClient {
    NotionHttpClient::with_base_url(&ApiKey::new(TOKEN).unwrap(), &server.uri()).unwrap()
}

fn children_path(n: u32) -> String {
    format!("/blocks/{}/children", hyphenated_id(n))
}

async fn mount_children(server: &MockServer, n: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(children_path(n)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn follows_cursor_across_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(children_path(1)))
        .and(query_param("page_size", "100"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(NoCursor)
        .respond_with(ResponseTemplate::new(200).set_body_json(children_page(
            vec![paragraph(10, "first"), paragraph(11, "second")],
            Some("K"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(children_path(1)))
        .and(query_param("start_cursor", "K"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(children_page(vec![paragraph(12, "third")], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let blocks = fetch_all_blocks(&client(&server), &id(1)).await.unwrap();

    let ids: Vec<_> = blocks.iter().map(|b| b.id().clone()).collect();
    assert_eq!(ids, vec![id(10), id(11), id(12)]);
}

#[tokio::test]
async fn exports_pages_and_media() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_children(
        &server,
        1,
        children_page(
            vec![
                heading(2, 1, "Welcome"),
                external_image(3, &format!("{}/media/pic.png", base)),
                hosted_file(4, &format!("{}/media/guide.pdf", base), "Setup guide"),
                hosted_file(5, &format!("{}/media/missing.pdf", base), ""),
                child_page(6, "Team"),
            ],
            None,
        ),
    )
    .await;
    mount_children(
        &server,
        6,
        children_page(vec![bullet(7, &["Ada"], false)], None),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/media/pic.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89u8, b'P', b'N', b'G']))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/guide.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let report = CrawlScheduler::new(
        Arc::new(client(&server)),
        Arc::new(HttpMediaFetcher::new(Duration::from_secs(5)).unwrap()),
        OutputLayout::new(dir.path()),
    )
    .run(&id(1))
    .await
    .unwrap();

    assert_eq!(report.pages.len(), 2);

    let index = std::fs::read_to_string(dir.path().join("index.md")).unwrap();
    assert_eq!(
        index,
        "# index\n\n\
         ## Welcome\n\n\
         \n\n![image](images/00000000-0000-0000-0000-000000000003.png)\n\n\
         \n\n[📎 Attachment: Setup_guide.pdf](files/Setup_guide.pdf)\n\n\
         \n\n### 📄 [Team](./Team.md)\n\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Team.md")).unwrap(),
        "# Team\n\n* Ada\n"
    );
    assert_eq!(
        std::fs::read(
            dir.path()
                .join("images/00000000-0000-0000-0000-000000000003.png")
        )
        .unwrap(),
        vec![0x89u8, b'P', b'N', b'G']
    );
    assert!(dir.path().join("files/Setup_guide.pdf").is_file());
    assert!(!dir
        .path()
        .join("files/00000000-0000-0000-0000-000000000005.pdf")
        .exists());
}

#[tokio::test]
async fn rejected_token_aborts_the_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid.",
            "request_id": "req_401"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let err = CrawlScheduler::new(
        Arc::new(client(&server)),
        Arc::new(HttpMediaFetcher::new(Duration::from_secs(5)).unwrap()),
        OutputLayout::new(dir.path()),
    )
    .run(&id(1))
    .await
    .unwrap_err();

    assert!(err.is_auth_failure());
    assert!(!dir.path().join("index.md").exists());
}

#[tokio::test]
async fn unknown_block_kinds_do_not_stop_the_export() {
    let server = MockServer::start().await;

    mount_children(
        &server,
        1,
        children_page(
            vec![
                paragraph(2, "Intro"),
                block(
                    3,
                    "audio",
                    false,
                    json!({"type": "external", "external": {"url": "https://a.example/x.mp3"}}),
                ),
                block(4, "transcription", true, json!({})),
                child_page(5, "Notes"),
            ],
            None,
        ),
    )
    .await;
    mount_children(
        &server,
        4,
        children_page(vec![paragraph(40, "Spoken words")], None),
    )
    .await;
    mount_children(
        &server,
        5,
        children_page(vec![paragraph(50, "Notes body")], None),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let report = CrawlScheduler::new(
        Arc::new(client(&server)),
        Arc::new(HttpMediaFetcher::new(Duration::from_secs(2)).unwrap()),
        OutputLayout::new(dir.path()),
    )
    .run(&id(1))
    .await
    .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("index.md")).unwrap(),
        "# index\n\nIntro\n\nSpoken words\n\n\n\n### 📄 [Notes](./Notes.md)\n\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Notes.md")).unwrap(),
        "# Notes\n\nNotes body\n\n"
    );
}
