//! Recording service: capture, upload, gallery, and share links.
//!
//! DESIGN
//! ======
//! The host feeds encoded media chunks into a [`Recorder`] while the user
//! records. Stopping hands the concatenated bytes to [`RecordingService::publish`],
//! which uploads them through the [`MediaUpload`] collaborator and stores a
//! recording document `{url, createdAt, uid}` (`uid` is null when nobody is
//! signed in).
//!
//! The recorder moves `Idle -> Recording -> Uploading -> Idle`. A new
//! recording cannot start until the previous upload has finished, whether it
//! succeeded or not.
//!
//! ERROR HANDLING
//! ==============
//! Upload and store failures are returned and the recorder goes back to
//! `Idle`; nothing is written to the store unless the upload succeeded.
//! Sharing needs a focused document for clipboard access and fails with a
//! prompt otherwise.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::collab::{
    Clipboard, ClipboardError, Direction, Document, DocumentStore, Fields, Identity, MediaUpload, Query, StoreError,
    UploadError, UserId, now_ms,
};
use crate::config::Config;
use crate::error::ErrorCode;
use crate::services::listing::{ListModel, Listed};

#[cfg(test)]
#[path = "recording_test.rs"]
mod recording_test;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("no recording in progress")]
    NotRecording,
    #[error("a recording is already in progress or uploading")]
    Busy,
    #[error("the recording is empty")]
    Empty,
    #[error("recording {0} not found")]
    NotFound(String),
    #[error("Failed to upload the recording: {0}")]
    Upload(#[from] UploadError),
    #[error("Failed to reach the recording store: {0}")]
    Store(#[from] StoreError),
}

impl ErrorCode for RecordingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotRecording => "E_NOT_RECORDING",
            Self::Busy => "E_RECORDER_BUSY",
            Self::Empty => "E_RECORDING_EMPTY",
            Self::NotFound(_) => "E_RECORDING_NOT_FOUND",
            Self::Upload(_) => "E_UPLOAD",
            Self::Store(_) => "E_STORE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Upload(err) => err.retryable(),
            Self::Store(err) => err.retryable(),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Please click on the page first, then try sharing again.")]
    NotFocused,
    #[error("Failed to copy the link: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl ErrorCode for ShareError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFocused => "E_NOT_FOCUSED",
            Self::Clipboard(_) => "E_CLIPBOARD",
        }
    }
}

/// A stored recording as listed in the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub id: String,
    pub url: String,
    pub owner_id: Option<UserId>,
    pub created_at: i64,
}

impl Listed for Recording {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type RecordingList = ListModel<Recording>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecording {
    url: String,
    #[serde(default)]
    created_at: i64,
    uid: Option<UserId>,
}

// =============================================================================
// RECORDER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Uploading,
}

/// Collects media chunks between start and stop.
#[derive(Debug, Default)]
pub struct Recorder {
    state: RecorderState,
    chunks: Vec<Vec<u8>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> RecorderState {
        self.state
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// # Errors
    ///
    /// `Busy` unless the recorder is idle.
    pub fn start(&mut self) -> Result<(), RecordingError> {
        if self.state != RecorderState::Idle {
            return Err(RecordingError::Busy);
        }
        self.chunks.clear();
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Append a chunk. Empty chunks and chunks arriving outside a recording
    /// are dropped.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        if self.state == RecorderState::Recording && !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    /// Stop recording and take the collected bytes. The recorder stays in
    /// `Uploading` until [`Recorder::finish_upload`].
    ///
    /// # Errors
    ///
    /// `NotRecording` if no recording is in progress.
    pub fn stop(&mut self) -> Result<Vec<u8>, RecordingError> {
        if self.state != RecorderState::Recording {
            return Err(RecordingError::NotRecording);
        }
        self.state = RecorderState::Uploading;
        Ok(std::mem::take(&mut self.chunks).concat())
    }

    pub fn finish_upload(&mut self) {
        if self.state == RecorderState::Uploading {
            self.state = RecorderState::Idle;
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct RecordingService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn Identity>,
    upload: Option<Arc<dyn MediaUpload>>,
    clipboard: Arc<dyn Clipboard>,
    collection: String,
}

impl RecordingService {
    /// `upload` is `None` when media upload is not configured; publishing then
    /// fails with `UploadError::Disabled`.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn Identity>,
        upload: Option<Arc<dyn MediaUpload>>,
        clipboard: Arc<dyn Clipboard>,
        config: &Config,
    ) -> Self {
        Self { store, identity, upload, clipboard, collection: config.recording_collection.clone() }
    }

    /// Stop `recorder`, upload what it captured, and store the recording.
    ///
    /// The recorder is back to `Idle` when this returns, on success or error.
    ///
    /// # Errors
    ///
    /// `NotRecording` if `recorder` was not recording, `Empty` if nothing was
    /// captured, `Upload` or `Store` if either step fails.
    pub async fn publish(&self, recorder: &mut Recorder) -> Result<Recording, RecordingError> {
        let bytes = recorder.stop()?;
        let result = self.upload_and_store(bytes).await;
        recorder.finish_upload();
        result
    }

    async fn upload_and_store(&self, bytes: Vec<u8>) -> Result<Recording, RecordingError> {
        if bytes.is_empty() {
            return Err(RecordingError::Empty);
        }
        let upload = self.upload.as_ref().ok_or(UploadError::Disabled)?;
        let size = bytes.len();
        let url = upload
            .upload(bytes)
            .await
            .inspect_err(|err| warn!(size, error = %err, "recording upload failed"))?;

        let owner_id = self.identity.current_user_id();
        let created_at = now_ms();
        let mut fields = Fields::new();
        fields.insert("url".into(), Value::from(url.as_str()));
        fields.insert("createdAt".into(), Value::from(created_at));
        fields.insert("uid".into(), owner_id.as_ref().map_or(Value::Null, |u| Value::from(u.as_str())));

        let id = self.store.create(&self.collection, fields).await?;
        info!(recording_id = %id, size, "recording published");
        Ok(Recording { id, url, owner_id, created_at })
    }

    /// Every stored recording, newest first.
    ///
    /// # Errors
    ///
    /// `Store` if the query fails.
    pub async fn list(&self) -> Result<Vec<Recording>, RecordingError> {
        let query = Query::default().order_by("createdAt", Direction::Descending);
        let docs = self.store.list(&self.collection, &query).await?;
        let recordings: Vec<Recording> = docs.into_iter().filter_map(decode_recording).collect();
        debug!(count = recordings.len(), "recordings listed");
        Ok(recordings)
    }

    /// Delete recording `id`, removing it from `list` optimistically.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not in `list`, `Store` if the delete fails (the
    /// entry is restored first).
    pub async fn delete(&self, list: &mut RecordingList, id: &str) -> Result<(), RecordingError> {
        let removed = list.remove(id).ok_or_else(|| RecordingError::NotFound(id.to_owned()))?;
        if let Err(err) = self.store.delete(&self.collection, id).await {
            warn!(recording_id = %id, error = %err, "recording delete failed; restoring list entry");
            list.restore(removed);
            return Err(err.into());
        }
        info!(recording_id = %id, "recording deleted");
        Ok(())
    }

    /// Copy the recording's URL to the clipboard.
    ///
    /// # Errors
    ///
    /// `NotFocused` if the document does not have focus, `Clipboard` if the
    /// write fails.
    pub async fn share(&self, recording: &Recording) -> Result<(), ShareError> {
        if !self.clipboard.has_focus() {
            return Err(ShareError::NotFocused);
        }
        self.clipboard.write_text(&recording.url).await?;
        info!(recording_id = %recording.id, "share link copied");
        Ok(())
    }
}

fn decode_recording(doc: Document) -> Option<Recording> {
    match serde_json::from_value::<StoredRecording>(Value::Object(doc.fields)) {
        Ok(stored) => Some(Recording {
            id: doc.id,
            url: stored.url,
            owner_id: stored.uid,
            created_at: stored.created_at,
        }),
        Err(err) => {
            warn!(recording_id = %doc.id, error = %err, "skipping malformed recording");
            None
        }
    }
}
