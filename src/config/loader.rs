//! Where configuration and feature documents come from.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::{Result, StyleError};

/// Anything that can produce the raw text of a JSON document.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;

    /// Short human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// A document already held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    body: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl ConfigSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// A document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        #[cfg(feature = "tokio-runtime")]
        let body = tokio::fs::read_to_string(&self.path).await?;

        #[cfg(not(feature = "tokio-runtime"))]
        let body = std::fs::read_to_string(&self.path)?;

        Ok(body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A document served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    attempts: usize,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("atlas-style/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            attempts: 2,
        }
    }

    /// Total tries before giving up; at least one.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    async fn fetch_once(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    #[cfg_attr(not(feature = "debug"), allow(unused_variables))]
    async fn fetch(&self) -> Result<String> {
        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match self.fetch_once().await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    #[cfg(feature = "debug")]
                    log::warn!("fetch of {} failed on attempt {}: {}", self.url, attempt, e);

                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            StyleError::InvalidConfig(format!("no attempt made for {}", self.url))
        }))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_returns_body() {
        let source = StaticSource::new("inline", "{}");
        assert_eq!(source.fetch().await.unwrap(), "{}");
        assert_eq!(source.describe(), "inline");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new("/definitely/not/here/styles-config.json");
        assert!(matches!(source.fetch().await, Err(StyleError::Io(_))));
    }

    #[test]
    fn test_attempts_never_zero() {
        let source = HttpSource::with_client("http://localhost/styles.json", reqwest::Client::new())
            .with_attempts(0);
        assert_eq!(source.attempts, 1);
    }
}
