//! Tarball passthrough E2E tests against a mocked GitLab

mod helper;

use axum::http::StatusCode;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use mockito::Matcher;

use helper::{GitLabFixture, PUBLIC_URL, create_test_app, get};

#[tokio::test]
async fn tarball_streams_archive_of_tagged_commit() {
    let mut gitlab = GitLabFixture::new().await;
    gitlab.project("acme", "widgets", 42).await;
    gitlab
        .tags(42, &[("v2.0.0", "c2"), ("v1.0.0", "c1")])
        .await;
    let archive = gitlab.archive(42, "c1", "archive-one").await;
    let app = create_test_app(&gitlab.url(), Some(PUBLIC_URL));

    let response = get(app, "/%40acme%2Fwidgets/v1.0.0/tarball", &[]).await;

    archive.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[CONTENT_TYPE], "application/x-gzip");
    assert_eq!(response.headers[CONTENT_LENGTH], "11");
    assert_eq!(&response.body[..], b"archive-one");
}

#[tokio::test]
async fn tarball_forwards_private_token_header() {
    let mut gitlab = GitLabFixture::new().await;
    gitlab
        .server
        .mock("GET", "/projects/acme%2Fwidgets")
        .match_header("private-token", "tok")
        .with_status(200)
        .with_body(r#"{"id": 42}"#)
        .create_async()
        .await;
    gitlab
        .server
        .mock("GET", "/projects/42/repository/tags")
        .match_header("private-token", "tok")
        .with_status(200)
        .with_body(r#"[{"name": "v1.0.0", "commit": {"id": "c1"}}]"#)
        .create_async()
        .await;
    let archive = gitlab
        .server
        .mock("GET", "/projects/42/repository/archive")
        .match_query(Matcher::UrlEncoded("sha".into(), "c1".into()))
        .match_header("private-token", "tok")
        .with_status(200)
        .with_body("secret-archive")
        .create_async()
        .await;
    let app = create_test_app(&gitlab.url(), Some(PUBLIC_URL));

    let response = get(
        app,
        "/%40acme%2Fwidgets/v1.0.0/tarball",
        &[("private-token", "tok")],
    )
    .await;

    archive.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"secret-archive");
}

#[tokio::test]
async fn tarball_for_unknown_tag_never_opens_an_archive() {
    let mut gitlab = GitLabFixture::new().await;
    gitlab.project("acme", "widgets", 42).await;
    gitlab.tags(42, &[("v1.0.0", "c1")]).await;
    let archive = gitlab
        .server
        .mock("GET", "/projects/42/repository/archive")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = create_test_app(&gitlab.url(), Some(PUBLIC_URL));

    let response = get(app, "/%40acme%2Fwidgets/v9.9.9/tarball", &[]).await;

    archive.assert_async().await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json()["error"],
        "Tag v9.9.9 not found for @acme/widgets"
    );
}

#[tokio::test]
async fn tarball_upstream_failure_is_bad_gateway() {
    let mut gitlab = GitLabFixture::new().await;
    gitlab.project("acme", "widgets", 42).await;
    gitlab.tags(42, &[("v1.0.0", "c1")]).await;
    gitlab
        .server
        .mock("GET", "/projects/42/repository/archive")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let app = create_test_app(&gitlab.url(), Some(PUBLIC_URL));

    let response = get(app, "/%40acme%2Fwidgets/v1.0.0/tarball", &[]).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.json()["error"], "Bad Gateway");
}

#[tokio::test]
async fn tarball_rejects_unscoped_name() {
    let gitlab = GitLabFixture::new().await;
    let app = create_test_app(&gitlab.url(), Some(PUBLIC_URL));

    let response = get(app, "/widgets/v1.0.0/tarball", &[]).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
