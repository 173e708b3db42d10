use std::time::Duration;

use folio::{FolioError, ReadmeResolver};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WIDGET_URL: &str = "https://github.com/acme/widget.git";

fn resolver(server: &MockServer, timeout: Duration) -> ReadmeResolver {
    let host = Url::parse(&server.uri()).unwrap();
    ReadmeResolver::new(host, timeout).unwrap()
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_owned())
        .collect()
}

#[tokio::test]
async fn main_branch_is_used_when_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/widget/main/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Widget"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/acme/widget/master/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stale"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let readme = resolver(&mock_server, Duration::from_secs(2))
        .fetch(WIDGET_URL)
        .await
        .unwrap();

    assert_eq!(readme, "# Widget");
}

#[tokio::test]
async fn falls_back_to_master_after_main() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/widget/main/README.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/acme/widget/master/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Legacy"))
        .mount(&mock_server)
        .await;

    let readme = resolver(&mock_server, Duration::from_secs(2))
        .fetch(WIDGET_URL)
        .await
        .unwrap();

    assert_eq!(readme, "# Legacy");
    assert_eq!(
        requested_paths(&mock_server).await,
        vec![
            "/acme/widget/main/README.md",
            "/acme/widget/master/README.md"
        ]
    );
}

#[tokio::test]
async fn exhausted_branches_are_readme_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = resolver(&mock_server, Duration::from_secs(2))
        .fetch(WIDGET_URL)
        .await;

    match result {
        Err(FolioError::ReadmeNotFound { owner, repo }) => {
            assert_eq!(owner, "acme");
            assert_eq!(repo, "widget");
        }
        other => panic!("expected ReadmeNotFound, got {:?}", other),
    }
    assert_eq!(requested_paths(&mock_server).await.len(), 2);
}

#[tokio::test]
async fn timed_out_branch_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/widget/main/README.md"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/acme/widget/master/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Master"))
        .mount(&mock_server)
        .await;

    let readme = resolver(&mock_server, Duration::from_millis(300))
        .fetch(WIDGET_URL)
        .await
        .unwrap();

    assert_eq!(readme, "# Master");
}

#[tokio::test]
async fn invalid_url_makes_no_requests() {
    let mock_server = MockServer::start().await;

    let result = resolver(&mock_server, Duration::from_secs(2))
        .fetch("https://example.com/not-github")
        .await;

    assert!(matches!(result, Err(FolioError::InvalidSourceUrl(_))));
    assert!(requested_paths(&mock_server).await.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_readme_not_found() {
    // Nothing listens on the discard port.
    let host = Url::parse("http://127.0.0.1:9").unwrap();
    let resolver =
        ReadmeResolver::new(host, Duration::from_millis(500)).unwrap();

    let result = resolver.fetch(WIDGET_URL).await;

    assert!(matches!(result, Err(FolioError::ReadmeNotFound { .. })));
}
