//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock documentation sites and test
//! the full harvest cycle end-to-end.

use std::fs;
use std::path::Path;
use sumi_scroll::config::{
    ArticleConfig, Config, FetchConfig, NavigationConfig, OutputConfig, SiteConfig,
};
use sumi_scroll::crawler::{run_crawl, run_navigation_only, Coordinator};
use sumi_scroll::ScrollError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NAV_PAGE: &str = r#"<html><body>
<nav>
  <ul>
    <li data-depth="2"><a href="/a">Alpha</a></li>
    <li data-depth="2"><a class="external" href="https://github.com/example">GitHub</a></li>
    <li data-depth="2"><a href="c">Charlie</a>
      <ul>
        <li data-depth="3"><a href="/c/d">Delta</a></li>
      </ul>
    </li>
  </ul>
</nav>
</body></html>"#;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        navigation: NavigationConfig::default(),
        article: ArticleConfig::default(),
        fetch: FetchConfig {
            batch_size: 2,
            inter_batch_delay_ms: 10, // Very short for testing
            request_timeout_secs: 5,
            ..FetchConfig::default()
        },
        output: OutputConfig {
            directory: output_dir.display().to_string(),
            timestamped: false,
        },
    }
}

fn article_page(title: &str) -> String {
    format!(
        r#"<html><head><title>{title} | Docs</title></head><body>
        <ol class="breadcrumb"><li>Docs</li><li>{title}</li></ol>
        <article><h1>{title}</h1><p>About {title}.</p></article>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).expect("invalid JSON")
}

#[tokio::test]
async fn test_full_harvest() {
    let server = MockServer::start().await;
    let base_url = format!("{}/docs/", server.uri());

    mount_html(&server, "/docs/", NAV_PAGE.to_string()).await;
    mount_html(&server, "/a", article_page("Alpha")).await;
    mount_html(&server, "/c", article_page("Charlie")).await;
    mount_html(&server, "/c/d", article_page("Delta")).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, dir.path());

    let stats = run_crawl(config, dir.path().to_path_buf(), "hash123")
        .await
        .expect("harvest failed");

    assert_eq!(stats.tasks, 3);
    assert_eq!(stats.successes, 3);
    assert_eq!(stats.failures, 0);
    assert_eq!(stats.index_entries, 3);
    assert_eq!(stats.navigation_nodes, 5);

    // Navigation tree: resolved hrefs, external untouched
    let navigation = read_json(&dir.path().join("navigation.json"));
    assert_eq!(navigation["href"], "");
    assert_eq!(navigation["children"][0]["href"], format!("{}/a", server.uri()));
    assert_eq!(
        navigation["children"][1]["href"],
        "https://github.com/example"
    );
    assert_eq!(navigation["children"][1]["isExternal"], true);
    assert_eq!(
        navigation["children"][2]["children"][0]["href"],
        format!("{}/c/d", server.uri())
    );

    // Index keyed by title
    let index = read_json(&dir.path().join("index.json"));
    assert_eq!(index["Alpha"]["url"], format!("{}/a", server.uri()));
    assert_eq!(index["Delta"]["breadcrumbs"], "Docs > Delta");
    assert!(index["Charlie"]["content"]
        .as_str()
        .unwrap()
        .contains("About Charlie."));

    // Articles numbered in navigation order
    let articles = dir.path().join("articles");
    assert!(articles.join("001-Alpha.json").exists());
    assert!(articles.join("002-Charlie.json").exists());
    assert!(articles.join("003-Delta.json").exists());

    let manifest = read_json(&dir.path().join("manifest.json"));
    assert_eq!(manifest["config_hash"], "hash123");
    assert_eq!(manifest["task_count"], 3);
    assert_eq!(manifest["batch_size"], 2);
}

#[tokio::test]
async fn test_partial_failure_does_not_abort() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    let nav: String = {
        let items: String = (1..=7)
            .map(|i| format!(r#"<li data-depth="2"><a href="/p{i}">Page {i}</a></li>"#))
            .collect();
        format!("<html><body><nav><ul>{}</ul></nav></body></html>", items)
    };
    mount_html(&server, "/", nav).await;

    for i in 1..=7 {
        let route = format!("/p{}", i);
        match i {
            4 => {
                Mock::given(method("GET"))
                    .and(path(route.as_str()))
                    .respond_with(ResponseTemplate::new(500))
                    .expect(1)
                    .mount(&server)
                    .await;
            }
            6 => {
                // Fetchable, but no article container
                mount_html(
                    &server,
                    &route,
                    "<html><body><div>moved</div></body></html>".to_string(),
                )
                .await;
            }
            _ => mount_html(&server, &route, article_page(&format!("Page {}", i))).await,
        }
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, dir.path());

    let stats = run_crawl(config, dir.path().to_path_buf(), "hash")
        .await
        .expect("partial failures must not fail the run");

    assert_eq!(stats.tasks, 7);
    assert_eq!(stats.successes, 5);
    assert_eq!(stats.failures, 2);
    assert_eq!(stats.index_entries, 5);

    let failures = read_json(&dir.path().join("failures.json"));
    let failed_urls: Vec<&str> = failures
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        failed_urls,
        vec![
            format!("{}/p4", server.uri()),
            format!("{}/p6", server.uri())
        ]
    );

    // Sequence numbers count successes only, in task order
    let articles = dir.path().join("articles");
    assert!(articles.join("004-Page_5.json").exists());
    assert!(articles.join("005-Page_7.json").exists());
}

#[tokio::test]
async fn test_navigation_fetch_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", server.uri()), dir.path());

    let err = run_crawl(config, dir.path().to_path_buf(), "hash")
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, ScrollError::NavFetch { .. }));
    assert!(!dir.path().join("index.json").exists());
}

#[tokio::test]
async fn test_malformed_navigation_aborts_before_fetching() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><body><nav><ul>
            <li data-depth="2"><a href="/a">A</a></li>
            <li data-depth="2"><span>broken</span></li>
        </ul></nav></body></html>"#
            .to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("A")))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", server.uri()), dir.path());

    let err = run_crawl(config, dir.path().to_path_buf(), "hash")
        .await
        .unwrap_err();

    assert!(matches!(err, ScrollError::MalformedNavNode { depth: 2, .. }));
    assert!(!dir.path().join("navigation.json").exists());
}

#[tokio::test]
async fn test_missing_navigation_container_is_parse_error() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        "<html><body><p>No menu here</p></body></html>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", server.uri()), dir.path());
    let coordinator = Coordinator::new(config).unwrap();

    let err = coordinator.fetch_navigation().await.unwrap_err();
    assert!(matches!(err, ScrollError::NavParse { .. }));
}

#[tokio::test]
async fn test_navigation_only() {
    let server = MockServer::start().await;
    mount_html(&server, "/docs/", NAV_PAGE.to_string()).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/docs/", server.uri()), dir.path());

    let (tree, task_count) = run_navigation_only(config, dir.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(tree.children.len(), 3);
    assert_eq!(task_count, 3);
    assert!(dir.path().join("navigation.json").exists());
    assert!(!dir.path().join("index.json").exists());
}
