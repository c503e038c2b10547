//! In-memory collaborators.
//!
//! Backing for tests and offline use. `MemoryStore` keeps documents per
//! collection in insertion order and counts writes so callers can assert on
//! exactly which store operations ran.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, watch};
use uuid::Uuid;

use crate::collab::{
    Clipboard, ClipboardError, Direction, Document, DocumentStore, Fields, Identity, MediaUpload, Query, StoreError,
    UploadError, UserId,
};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

// =============================================================================
// DOCUMENT STORE
// =============================================================================

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    fail_writes: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes take `latency` to complete.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency: Some(latency), ..Self::default() }
    }

    /// Make every following write fail with `StoreError::Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, AtomicOrdering::SeqCst);
    }

    #[must_use]
    pub fn create_count(&self) -> usize {
        self.creates.load(AtomicOrdering::SeqCst)
    }

    #[must_use]
    pub fn update_count(&self) -> usize {
        self.updates.load(AtomicOrdering::SeqCst)
    }

    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(AtomicOrdering::SeqCst)
    }

    /// Fetch one document directly.
    pub async fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let collections = self.collections.lock().await;
        collections.get(collection)?.iter().find(|d| d.id == id).cloned()
    }

    async fn write_gate(&self) -> Result<(), StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_writes.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is failing writes".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.creates.fetch_add(1, AtomicOrdering::SeqCst);
        self.write_gate().await?;
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_owned())
            .or_default()
            .push(Document { id: id.clone(), fields });
        Ok(id)
    }

    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| match &query.filter {
                        Some((field, value)) => d.fields.get(field) == Some(value),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order {
            docs.sort_by(|a, b| {
                let ord = compare_values(a.fields.get(field), b.fields.get(field));
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        Ok(docs)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.updates.fetch_add(1, AtomicOrdering::SeqCst);
        self.write_gate().await?;
        let mut collections = self.collections.lock().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::NotFound { collection: collection.to_owned(), id: id.to_owned() })?;
        doc.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, AtomicOrdering::SeqCst);
        self.write_gate().await?;
        let mut collections = self.collections.lock().await;
        let not_found = || StoreError::NotFound { collection: collection.to_owned(), id: id.to_owned() };
        let docs = collections.get_mut(collection).ok_or_else(not_found)?;
        let pos = docs.iter().position(|d| d.id == id).ok_or_else(not_found)?;
        docs.remove(pos);
        Ok(())
    }
}

/// Order numbers numerically and strings lexically; missing fields sort first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity driven by explicit sign-in/sign-out calls.
pub struct MemoryIdentity {
    tx: watch::Sender<Option<UserId>>,
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }
}

impl MemoryIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user: &str) -> Self {
        let identity = Self::new();
        identity.sign_in(UserId::new(user));
        identity
    }

    /// Sign `user` in. Re-signing the same user does not notify.
    pub fn sign_in(&self, user: UserId) {
        self.tx.send_if_modified(|current| {
            if current.as_ref() == Some(&user) {
                return false;
            }
            *current = Some(user);
            true
        });
    }

    pub fn sign_out(&self) {
        self.tx.send_if_modified(|current| current.take().is_some());
    }
}

impl Identity for MemoryIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.tx.subscribe()
    }
}

// =============================================================================
// MEDIA UPLOAD
// =============================================================================

/// Accepts every upload and hands back a `memory://` URL.
#[derive(Default)]
pub struct MemoryUpload {
    uploads: Mutex<Vec<usize>>,
    fail: AtomicBool,
}

impl MemoryUpload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail.store(fail, AtomicOrdering::SeqCst);
    }

    /// Byte length of every accepted upload, in order.
    pub async fn upload_sizes(&self) -> Vec<usize> {
        self.uploads.lock().await.clone()
    }
}

#[async_trait]
impl MediaUpload for MemoryUpload {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, UploadError> {
        if self.fail.load(AtomicOrdering::SeqCst) {
            return Err(UploadError::Response { status: 503, body: "unavailable".into() });
        }
        let mut uploads = self.uploads.lock().await;
        uploads.push(bytes.len());
        Ok(format!("memory://uploads/{}", uploads.len()))
    }
}

// =============================================================================
// CLIPBOARD
// =============================================================================

pub struct MemoryClipboard {
    focused: AtomicBool,
    written: Mutex<Vec<String>>,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self { focused: AtomicBool::new(true), written: Mutex::new(Vec::new()) }
    }
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focus(&self, focused: bool) {
        self.focused.store(focused, AtomicOrdering::SeqCst);
    }

    /// Everything written so far, oldest first.
    pub async fn contents(&self) -> Vec<String> {
        self.written.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    fn has_focus(&self) -> bool {
        self.focused.load(AtomicOrdering::SeqCst)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.has_focus() {
            return Err(ClipboardError::Write("document is not focused".into()));
        }
        self.written.lock().await.push(text.to_owned());
        Ok(())
    }
}
