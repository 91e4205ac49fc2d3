//! HTTP client for the public IBGE localities API.

use serde::de::DeserializeOwned;
use url::Url;

use super::abort::AbortToken;
use crate::domain::{City, FetchError, FetchResult, SetupError, State};

/// Read-only client for the two endpoints the UI consumes.
///
/// No timeout and no retry are configured: a request either completes,
/// fails, or is aborted through its [`AbortToken`].
#[derive(Debug, Clone)]
pub struct LocalityClient {
    base_url: Url,
    http: reqwest::Client,
}

impl LocalityClient {
    pub fn new(base_url: Url) -> Result<Self, SetupError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http_client(base_url, http)
    }

    pub fn with_http_client(base_url: Url, http: reqwest::Client) -> Result<Self, SetupError> {
        if base_url.cannot_be_a_base() {
            return Err(SetupError::BaseUrl(base_url));
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/estados?orderBy=nome`. The API returns the states
    /// already sorted by name, and they are kept in that order.
    pub async fn list_states(&self, abort: &AbortToken) -> FetchResult<Vec<State>> {
        let mut url = self.endpoint(&["estados"]);
        url.query_pairs_mut().append_pair("orderBy", "nome");
        self.get_json(url, abort).await
    }

    /// `GET {base}/estados/{uf}/distritos`, returned in API order.
    pub async fn list_cities(&self, uf: &str, abort: &AbortToken) -> FetchResult<Vec<City>> {
        let url = self.endpoint(&["estados", uf, "distritos"]);
        self.get_json(url, abort).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, abort: &AbortToken) -> FetchResult<T> {
        tokio::select! {
            biased;
            _ = abort.aborted() => {
                tracing::debug!(%url, "request aborted");
                Err(FetchError::Aborted)
            }
            result = self.fetch(&url) => result,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> FetchResult<T> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        tracing::trace!(%url, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
