//! Drives the router without binding a socket

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use tower::ServiceExt;

use npm_gitlab_proxy::config::ProxyConfig;
use npm_gitlab_proxy::server::{AppState, router};

pub const PUBLIC_URL: &str = "http://registry.test";

/// Router wired to a real GitLab client pointing at `gitlab_url`
pub fn create_test_app(gitlab_url: &str, public_url: Option<&str>) -> Router {
    let config = ProxyConfig {
        gitlab_url: gitlab_url.to_string(),
        public_url: public_url.map(str::to_string),
        ..Default::default()
    };

    router(AppState::from_config(&config).unwrap())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Sends `GET uri` with optional extra headers and collects the response
pub async fn get(app: Router, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
    let mut request = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}
