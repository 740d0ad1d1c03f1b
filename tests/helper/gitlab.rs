//! Mock GitLab API backed by mockito

use mockito::{Matcher, Mock, Server, ServerGuard};

/// A mockito server answering the GitLab endpoints the proxy uses
pub struct GitLabFixture {
    pub server: ServerGuard,
}

impl GitLabFixture {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// `GET /projects/{user%2Frepo}` answering with `id`
    pub async fn project(&mut self, user: &str, repo: &str, id: u64) -> Mock {
        self.server
            .mock("GET", format!("/projects/{}%2F{}", user, repo).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"id": {}, "path": "{}"}}"#, id, repo))
            .create_async()
            .await
    }

    /// `GET /projects/{user%2Frepo}` answering 404
    #[allow(dead_code)]
    pub async fn missing_project(&mut self, user: &str, repo: &str) -> Mock {
        self.server
            .mock("GET", format!("/projects/{}%2F{}", user, repo).as_str())
            .with_status(404)
            .with_body(r#"{"message": "404 Project Not Found"}"#)
            .create_async()
            .await
    }

    /// `GET /projects/{id}/repository/tags` listing `(tag, commit)` pairs
    pub async fn tags(&mut self, id: u64, tags: &[(&str, &str)]) -> Mock {
        let body = serde_json::Value::Array(
            tags.iter()
                .map(|(name, commit)| {
                    serde_json::json!({
                        "name": name,
                        "message": "",
                        "commit": {"id": commit, "message": "release"}
                    })
                })
                .collect(),
        );

        self.server
            .mock("GET", format!("/projects/{}/repository/tags", id).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Tree at `tag` containing `package.json` as `blob`, plus the blob itself
    #[allow(dead_code)]
    pub async fn manifest(&mut self, id: u64, tag: &str, blob: &str, body: &str) -> (Mock, Mock) {
        let tree = self
            .server
            .mock("GET", format!("/projects/{}/repository/tree", id).as_str())
            .match_query(Matcher::UrlEncoded("ref_name".into(), tag.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"[
                    {{"id": "readme-{blob}", "name": "README.md", "type": "blob"}},
                    {{"id": "{blob}", "name": "package.json", "type": "blob"}}
                ]"#
            ))
            .create_async()
            .await;

        let raw = self
            .server
            .mock(
                "GET",
                format!("/projects/{}/repository/raw_blobs/{}", id, blob).as_str(),
            )
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        (tree, raw)
    }

    /// `GET /projects/{id}/repository/archive?sha={commit}`
    pub async fn archive(&mut self, id: u64, commit: &str, body: &'static str) -> Mock {
        self.server
            .mock("GET", format!("/projects/{}/repository/archive", id).as_str())
            .match_query(Matcher::UrlEncoded("sha".into(), commit.into()))
            .with_status(200)
            .with_header("content-type", "application/x-gzip")
            .with_body(body)
            .create_async()
            .await
    }
}
