//! Integration tests for the crawler
//!
//! These tests drive the public API end-to-end: table-backed crawls for the
//! scheduling properties, wiremock servers for the HTTP fetcher, and the
//! compiled binary for the command-line surface.

use sitemapper::config::{CrawlerConfig, HttpConfig, UserAgentConfig};
use sitemapper::crawler::{crawl, crawl_with_stats, Fetcher, HttpFetcher, StaticFetcher};
use std::io::Write;
use std::process::{Command, Output};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The site graph used throughout: four pages, an image and two external links
fn golang_fixture() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(
            "http://golang.org",
            [
                "http://golang.org/test.html",
                "http://golang.org/test2.html",
                "http://golang.org/images/gopher.jpg",
                "http://goweeklynews.com", // Won't get crawled
            ],
        )
        .with_page(
            "http://golang.org/test.html",
            [
                "http://golang.org/testing.html",
                "http://golang.org/images/gopher.jpg",
                "http://linkedin.com/golang",
            ],
        )
        .with_page("http://golang.org/test2.html", ["http://golang.org"])
        .with_page("http://golang.org/testing.html", ["http://golang.org"])
}

fn http_fetcher() -> Arc<dyn Fetcher> {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: None,
    };
    let http = HttpConfig {
        request_timeout_secs: Some(10),
        connect_timeout_secs: Some(5),
    };
    Arc::new(HttpFetcher::new(&user_agent, &http).expect("Failed to build HTTP fetcher"))
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn run_binary(args: Vec<String>) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sitemapper"))
        .args(args)
        .output()
        .expect("Failed to run sitemapper binary")
}

#[tokio::test]
async fn test_fixture_sitemap() {
    let fetcher = golang_fixture();
    let sitemap = crawl(
        "http://golang.org",
        Arc::new(fetcher.clone()),
        &CrawlerConfig::default(),
    )
    .await
    .expect("Crawl failed");

    // Check expected number of pages in the sitemap
    assert_eq!(sitemap.len(), 4, "Expected 4 entries in the sitemap");

    // Check number of links for each page
    for (url, links) in sitemap.iter() {
        let expected = fetcher.get(url).expect("crawled page missing from fixture");
        assert_eq!(
            links.len(),
            expected.len(),
            "expected {} entries for {}, got {}",
            expected.len(),
            url,
            links.len()
        );
    }

    for url in [
        "http://golang.org",
        "http://golang.org/test.html",
        "http://golang.org/test2.html",
        "http://golang.org/testing.html",
    ] {
        assert!(sitemap.contains(url), "missing {}", url);
    }
}

#[tokio::test]
async fn test_no_image_or_external_keys() {
    let sitemap = crawl(
        "http://golang.org",
        Arc::new(golang_fixture()),
        &CrawlerConfig::default(),
    )
    .await
    .expect("Crawl failed");

    for url in sitemap.urls() {
        assert!(url.starts_with("http://golang.org"), "external key {}", url);
        assert!(!url.ends_with(".jpg"), "image key {}", url);
    }

    // Images and external links are still recorded as values
    let root_links = sitemap.get("http://golang.org").expect("root missing");
    assert!(root_links.contains(&"http://golang.org/images/gopher.jpg".to_string()));
    assert!(root_links.contains(&"http://goweeklynews.com".to_string()));
}

#[tokio::test]
async fn test_dense_cyclic_graph() {
    const PAGES: usize = 200;
    let mut fetcher = StaticFetcher::new();
    for i in 0..PAGES {
        fetcher.insert(
            format!("http://site.test/{}", i),
            [
                format!("http://site.test/{}", (i + 1) % PAGES),
                format!("http://site.test/{}", (i * 7) % PAGES),
                format!("http://site.test/{}", i),
                "http://site.test/0".to_string(),
            ],
        );
    }

    let config = CrawlerConfig {
        max_concurrent_fetches: 8,
    };
    let outcome = crawl_with_stats("http://site.test/0", Arc::new(fetcher), &config)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.sitemap.len(), PAGES);
    assert_eq!(outcome.stats.pages_discovered, PAGES);
    assert_eq!(outcome.stats.total_links, PAGES * 4);
    assert_eq!(outcome.stats.failed_fetches, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_independent_concurrent_crawls() {
    let other = StaticFetcher::new()
        .with_page("http://rust-lang.org", ["http://rust-lang.org/learn"])
        .with_page("http://rust-lang.org/learn", Vec::<String>::new());

    let config = CrawlerConfig::default();
    let (golang, rust) = tokio::join!(
        crawl("http://golang.org", Arc::new(golang_fixture()), &config),
        crawl("http://rust-lang.org", Arc::new(other), &config),
    );

    let golang = golang.expect("golang crawl failed");
    let rust = rust.expect("rust crawl failed");

    assert_eq!(golang.len(), 4);
    assert_eq!(rust.len(), 2);
    assert!(golang.urls().all(|u| u.starts_with("http://golang.org")));
    assert!(rust.urls().all(|u| u.starts_with("http://rust-lang.org")));
}

#[tokio::test]
async fn test_repeated_crawls_start_fresh() {
    let config = CrawlerConfig::default();
    let first = crawl("http://golang.org", Arc::new(golang_fixture()), &config)
        .await
        .expect("Crawl failed");
    let second = crawl("http://golang.org", Arc::new(golang_fixture()), &config)
        .await
        .expect("Crawl failed");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_seed_is_rejected() {
    let result = crawl("", Arc::new(golang_fixture()), &CrawlerConfig::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_http_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let root = format!("{}/", base_url);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/page1">Page 1</a>
               <a href="page2">Page 2</a>
               <img src="/logo.png">
               <a href="http://external.invalid/x">Elsewhere</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(r#"<a href="/">Home</a><a href="/page2">Page 2</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Images are listed but never fetched
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = crawl_with_stats(&root, http_fetcher(), &CrawlerConfig::default())
        .await
        .expect("Crawl failed");
    let sitemap = &outcome.sitemap;

    assert_eq!(sitemap.len(), 3);
    assert_eq!(
        sitemap.get(&root).expect("root missing"),
        &[
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            format!("{}/logo.png", base_url),
            "http://external.invalid/x".to_string(),
        ][..]
    );
    assert_eq!(
        sitemap
            .get(&format!("{}/page1", base_url))
            .map(<[String]>::len),
        Some(2)
    );

    // The 404 page is recorded with no links
    assert_eq!(
        sitemap
            .get(&format!("{}/page2", base_url))
            .map(<[String]>::len),
        Some(0)
    );
    assert_eq!(outcome.stats.failed_fetches, 1);
}

#[tokio::test]
async fn test_http_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let root = format!("{}/", base_url);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/old">Moved</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new/"))
        .respond_with(html_page(r#"<a href="child">Child</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new/child"))
        .respond_with(html_page(""))
        .mount(&mock_server)
        .await;

    let sitemap = crawl(&root, http_fetcher(), &CrawlerConfig::default())
        .await
        .expect("Crawl failed");

    assert_eq!(
        sitemap.get(&format!("{}/old", base_url)),
        Some(&[format!("{}/new/child", base_url)][..])
    );
    assert!(sitemap.contains(&format!("{}/new/child", base_url)));
    assert_eq!(sitemap.len(), 3);
}

#[tokio::test]
async fn test_http_unreachable_root_completes() {
    // Nothing listens on port 9 of the loopback interface
    let sitemap = crawl(
        "http://127.0.0.1:9/",
        http_fetcher(),
        &CrawlerConfig::default(),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(sitemap.len(), 1);
    assert_eq!(sitemap.get("http://127.0.0.1:9/").map(<[String]>::len), Some(0));
}

#[test]
fn test_cli_missing_url_exits_with_one() {
    let output = run_binary(Vec::new());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing URL to crawl"), "stderr: {}", stderr);
}

#[test]
fn test_cli_usage_errors_exit_with_one() {
    let extra = run_binary(vec![
        "http://127.0.0.1:9/".to_string(),
        "http://127.0.0.1:9/other".to_string(),
    ]);
    assert_eq!(extra.status.code(), Some(1));

    let unknown_flag = run_binary(vec!["--bogus".to_string(), "http://127.0.0.1:9/".to_string()]);
    assert_eq!(unknown_flag.status.code(), Some(1));
}

#[test]
fn test_cli_help_exits_with_zero() {
    let output = run_binary(vec!["--help".to_string()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_cli_invalid_config_exits_with_one() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"[crawler]\nmax-concurrent-fetches = 0\n")
        .expect("Failed to write config");

    let output = run_binary(vec![
        "--config".to_string(),
        file.path().display().to_string(),
        "http://127.0.0.1:9/".to_string(),
    ]);

    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_prints_sorted_sitemap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let root = format!("{}/", base_url);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/zeta">Z</a><a href="/alpha">A</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/zeta"))
        .respond_with(html_page(""))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alpha"))
        .respond_with(html_page(r#"<img src="/a.gif">"#))
        .mount(&mock_server)
        .await;

    let args = vec!["-q".to_string(), "-j".to_string(), "2".to_string(), root.clone()];
    let output = tokio::task::spawn_blocking(move || run_binary(args))
        .await
        .expect("Binary task panicked");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout is not UTF-8");
    let expected = format!(
        "Found 3 pages from {root}\n\
         {root}\n\
         \t{base}/zeta\n\
         \t{base}/alpha\n\
         {base}/alpha\n\
         \t{base}/a.gif\n\
         {base}/zeta\n",
        root = root,
        base = base_url
    );
    assert_eq!(stdout, expected);
}
