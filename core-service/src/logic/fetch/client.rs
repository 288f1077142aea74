//! Changeset Download Client
//!
//! Blocking GET against the changeset host. Failures never surface as
//! errors: `download` yields `None`, `fetch` says which kind of nothing.

use std::fmt::Display;
use std::time::Duration;

use crate::logic::config::Config;

use super::types::{Changeset, FetchOutcome};

/// Changeset host client
pub struct ChangesetClient {
    url_template: String,
    agent: ureq::Agent,
}

impl ChangesetClient {
    pub fn new(url_template: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            url_template: url_template.into(),
            agent: builder.build(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.changeset_url.clone(), config.timeout)
    }

    /// Substitute the changeset id into the URL template
    pub fn changeset_url(&self, changeset_id: impl Display) -> String {
        if self.url_template.contains("{}") {
            self.url_template.replacen("{}", &changeset_id.to_string(), 1)
        } else {
            format!("{}{}", self.url_template, changeset_id)
        }
    }

    /// Download a changeset, distinguishing why nothing came back
    pub fn fetch(&self, changeset_id: impl Display) -> FetchOutcome {
        let url = self.changeset_url(changeset_id);
        log::debug!("GET {}", url);

        match self.agent.get(&url).call() {
            Ok(resp) if resp.status() == 200 => {
                let body = match resp.into_string() {
                    Ok(body) => body,
                    Err(e) => {
                        log::warn!("Failed reading changeset body from {}: {}", url, e);
                        return FetchOutcome::TransientError(e.to_string());
                    }
                };

                match serde_json::from_str::<serde_json::Value>(&body) {
                    Ok(value) => FetchOutcome::Found(Changeset::new(value)),
                    Err(e) => {
                        log::warn!("Changeset body from {} is not JSON: {}", url, e);
                        FetchOutcome::TransientError(e.to_string())
                    }
                }
            }
            Ok(resp) => {
                log::debug!("Changeset host answered {} for {}", resp.status(), url);
                FetchOutcome::Unavailable(resp.status())
            }
            Err(ureq::Error::Status(404, _)) => {
                log::debug!("Changeset not found: {}", url);
                FetchOutcome::NotFound
            }
            Err(ureq::Error::Status(code, _)) => {
                log::debug!("Changeset host answered {} for {}", code, url);
                FetchOutcome::Unavailable(code)
            }
            Err(e) => {
                log::warn!("Changeset download failed for {}: {}", url, e);
                FetchOutcome::TransientError(e.to_string())
            }
        }
    }

    /// Download a changeset; `None` on any status other than 200 or any failure
    pub fn download(&self, changeset_id: impl Display) -> Option<Changeset> {
        self.fetch(changeset_id).into_changeset()
    }
}

impl Default for ChangesetClient {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Download with the default host and client settings
pub fn download_changeset(changeset_id: impl Display) -> Option<Changeset> {
    ChangesetClient::default().download(changeset_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ChangesetClient {
        ChangesetClient::new(format!("{}/changesets/{{}}.json", server.uri()), None)
    }

    async fn fetch_blocking(client: ChangesetClient, id: &'static str) -> FetchOutcome {
        tokio::task::spawn_blocking(move || client.fetch(id))
            .await
            .unwrap()
    }

    #[test]
    fn test_changeset_url_substitution() {
        let client = ChangesetClient::new("https://host/real-changesets/{}.json", None);
        assert_eq!(client.changeset_url(49172351), "https://host/real-changesets/49172351.json");
        assert_eq!(client.changeset_url("abc"), "https://host/real-changesets/abc.json");

        let bare = ChangesetClient::new("https://host/changesets/", None);
        assert_eq!(bare.changeset_url(7), "https://host/changesets/7");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/changesets/42.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "create": 10, "modify": 5, "delete": 1, "metadata": {"id": "42"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        match fetch_blocking(client_for(&server), "42").await {
            FetchOutcome::Found(changeset) => {
                assert_eq!(changeset.field("delete"), Some(&json!(1)));
                assert_eq!(changeset.field("metadata"), Some(&json!({"id": "42"})));
            }
            other => panic!("Expected Found, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(fetch_blocking(client, "1").await, FetchOutcome::NotFound);

        let client = client_for(&server);
        let downloaded = tokio::task::spawn_blocking(move || client.download("1"))
            .await
            .unwrap();
        assert!(downloaded.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_other_statuses_are_no_data() {
        for status in [204u16, 403, 500, 503] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let outcome = fetch_blocking(client_for(&server), "9").await;
            assert_eq!(outcome, FetchOutcome::Unavailable(status));
            assert!(outcome.into_changeset().is_none());
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_malformed_body_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json"))
            .mount(&server)
            .await;

        let outcome = fetch_blocking(client_for(&server), "3").await;
        assert!(matches!(outcome, FetchOutcome::TransientError(_)));
    }

    #[test]
    fn test_connection_refused_is_no_data() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ChangesetClient::new(
            format!("http://127.0.0.1:{}/{{}}.json", port),
            Some(Duration::from_secs(2)),
        );

        assert!(matches!(client.fetch(5), FetchOutcome::TransientError(_)));
        assert!(client.download(5).is_none());
    }
}
