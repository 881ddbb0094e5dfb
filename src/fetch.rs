//! Remote content fetch capability and the content fetcher.
//!
//! A [`ContentSource`] answers a site-absolute URL with a status and a body,
//! the same contract as a browser `fetch`. The [`ContentFetcher`] adds the
//! page-depth prefix, resolves the URL against the current page, and turns
//! the response into a [`ContentDocument`].
//!
//! Failures are typed and never retried; the caller picks the fallback:
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`ContentError::Unreachable`] | transport failed before a response |
//! | [`ContentError::Status`] | non-2xx response |
//! | [`ContentError::Parse`] | body is not valid JSON |

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::ContentDocument;
use crate::paths::Location;

/// A transport-level response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// The remote-fetch capability the host provides.
pub trait ContentSource {
    /// Fetch a site-absolute URL such as `/content/sellers.json`.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, TransportError>>;
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("fetch {url} failed: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("fetch {url} failed ({status})")]
    Status { url: String, status: u16 },
    #[error("parse {url} failed: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetches content on behalf of one page.
pub struct ContentFetcher<'a, S> {
    source: &'a S,
    location: &'a Location,
}

impl<'a, S: ContentSource> ContentFetcher<'a, S> {
    pub fn new(source: &'a S, location: &'a Location) -> Self {
        Self { source, location }
    }

    /// The site-absolute URL a root-relative path is fetched from.
    pub fn url_for(&self, relative: &str) -> String {
        self.location.resolve(&self.location.with_prefix(relative))
    }

    /// Fetch a root-relative path as text.
    pub async fn fetch_text(&self, relative: &str) -> Result<String, ContentError> {
        let url = self.url_for(relative);
        let response = self
            .source
            .get(&url)
            .await
            .map_err(|source| ContentError::Unreachable {
                url: url.clone(),
                source,
            })?;
        if !response.is_success() {
            return Err(ContentError::Status {
                url,
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Fetch and parse a content document.
    pub async fn fetch_content(&self, relative: &str) -> Result<ContentDocument, ContentError> {
        let url = self.url_for(relative);
        let body = self.fetch_text(relative).await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|source| ContentError::Parse { url, source })?;
        Ok(ContentDocument::from_value(value))
    }
}

/// Serves files from a site directory. Missing files answer 404.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirSource {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        if url.contains("://") {
            return Err(TransportError(format!("no network access for {url}")));
        }
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|part| part == "..") {
            return Ok(Response::with_status(403));
        }
        match std::fs::read_to_string(self.root.join(relative)) {
            Ok(body) => Ok(Response::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Response::with_status(404)),
            Err(e) => Err(TransportError(e.to_string())),
        }
    }
}

/// Canned responses keyed by URL, with a request log. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MemorySource {
    responses: HashMap<String, Result<Response, TransportError>>,
    requests: RefCell<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<String>) -> Self {
        self.responses.insert(url.to_string(), Ok(Response::ok(body)));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), Ok(Response::with_status(status)));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err(TransportError(reason.to_string())));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ContentSource for MemorySource {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(Response::with_status(404)))
    }
}
