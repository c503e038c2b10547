//! Collaborator interfaces: identity, document store, media upload, clipboard.
//!
//! DESIGN
//! ======
//! The whiteboard never talks to a hosted backend directly. Everything it
//! needs from the outside world goes through the four traits here, so the
//! services can be driven by the in-memory implementations in
//! [`crate::memory`] under test and by real clients in the app.
//!
//! Documents are schemaless JSON field maps; each service owns the shape of
//! the documents in its collection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

/// Identifier of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field map of a stored document.
pub type Fields = Map<String, Value>;

/// A stored document with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filter plus single-field ordering. `Default` lists everything in
/// store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<(String, Value)>,
    pub order: Option<(String, Direction)>,
}

impl Query {
    /// Keep documents whose `field` equals `value`.
    #[must_use]
    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter = Some((field.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order = Some((field.to_owned(), direction));
        self
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store rejected the request: {0}")]
    Rejected(String),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E_DOC_NOT_FOUND",
            Self::Unavailable(_) => "E_STORE_UNAVAILABLE",
            Self::Rejected(_) => "E_STORE_REJECTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// No upload endpoint is configured.
    #[error("media upload is not configured")]
    Disabled,
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("upload request failed: {0}")]
    Request(String),
    #[error("upload rejected: status {status}")]
    Response { status: u16, body: String },
    #[error("upload response parse failed: {0}")]
    Parse(String),
}

impl ErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Disabled => "E_UPLOAD_DISABLED",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_UPLOAD_REQUEST",
            Self::Response { .. } => "E_UPLOAD_RESPONSE",
            Self::Parse(_) => "E_UPLOAD_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Write(String),
}

impl ErrorCode for ClipboardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Write(_) => "E_CLIPBOARD_WRITE",
        }
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// The signed-in user, if any.
pub trait Identity: Send + Sync {
    fn current_user_id(&self) -> Option<UserId>;

    /// Receiver notified once per sign-in/sign-out transition.
    fn subscribe(&self) -> watch::Receiver<Option<UserId>>;
}

/// A collection-oriented JSON document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its new id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Merge `fields` into an existing document.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Hosted media storage for recorded video.
#[async_trait]
pub trait MediaUpload: Send + Sync {
    /// Upload `bytes` and return the public HTTPS URL.
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, UploadError>;
}

/// System clipboard, writable only while the page has input focus.
#[async_trait]
pub trait Clipboard: Send + Sync {
    fn has_focus(&self) -> bool;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Current time as milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(nanos).unwrap_or(i64::MAX)
}
