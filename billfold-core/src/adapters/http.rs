//! HTTP document store client
//!
//! Talks to a remote blob store that serves an account's files over
//! plain HTTP: HEAD for existence, GET for reads, PUT for writes. An
//! optional bearer token covers authenticated deployments.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::Existence;
use crate::ports::DocumentStore;

/// HTTP-backed document store
pub struct HttpStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStore {
    /// Create a client for a store served at the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::store(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn exists(&self, path: &str) -> Result<Existence> {
        let response = self
            .authorize(self.client.head(self.url(path)))
            .send()
            .await
            .map_err(|e| Error::store(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(Existence::Present),
            StatusCode::NOT_FOUND => Ok(Existence::Absent),
            status => Err(Error::store(format!(
                "existence check for {} failed: HTTP {}",
                path, status
            ))),
        }
    }

    async fn read_json(&self, path: &str) -> Result<Option<JsonValue>> {
        let response = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| Error::store(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let value = response
                    .json::<JsonValue>()
                    .await
                    .map_err(|e| Error::store(e.to_string()))?;
                Ok(Some(value))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(Error::store(format!(
                "read of {} failed: HTTP {}",
                path, status
            ))),
        }
    }

    async fn write_json(&self, path: &str, value: &JsonValue) -> Result<()> {
        let response = self
            .authorize(self.client.put(self.url(path)))
            .json(value)
            .send()
            .await
            .map_err(|e| Error::store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::store(format!(
                "write of {} failed: HTTP {}",
                path,
                response.status()
            )));
        }
        Ok(())
    }

    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let response = self
            .authorize(self.client.put(self.url(path)))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| Error::store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::store(format!(
                "write of {} failed: HTTP {}",
                path,
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http_mock::MockStoreServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_exists_reflects_server_state() {
        let server = MockStoreServer::start().unwrap();
        let store = HttpStore::new(server.base_url()).unwrap();

        assert_eq!(store.exists("profile.json").await.unwrap(), Existence::Absent);

        server.insert("profile.json", br#"{"a": 1}"#.to_vec());
        assert_eq!(store.exists("profile.json").await.unwrap(), Existence::Present);
    }

    #[tokio::test]
    async fn test_read_json_round_trip() {
        let server = MockStoreServer::start().unwrap();
        let store = HttpStore::new(server.base_url()).unwrap();

        assert!(store.read_json("profile.json").await.unwrap().is_none());

        store
            .write_json("profile.json", &json!({"user": {"name": "Jane"}}))
            .await
            .unwrap();

        let value = store.read_json("profile.json").await.unwrap().unwrap();
        assert_eq!(value["user"]["name"], "Jane");
    }

    #[tokio::test]
    async fn test_write_binary_stores_raw_bytes() {
        let server = MockStoreServer::start().unwrap();
        let store = HttpStore::new(server.base_url()).unwrap();

        store.write_binary("profile.jpg", &[0xFF, 0xD8, 0xFF]).await.unwrap();
        assert_eq!(server.get("profile.jpg").unwrap(), vec![0xFF, 0xD8, 0xFF]);
    }
}
