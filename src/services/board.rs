//! Board service: save, list, open, and delete whiteboards.
//!
//! DESIGN
//! ======
//! A board is one document in the whiteboard collection holding the owner
//! `uid`, the canvas [`BoardContent`] fields, `createdAt` and, once updated,
//! `updatedAt` (unix millis). The first save of a board creates the document;
//! the store-assigned id is remembered and every later save updates it.
//!
//! Saves are serialized: the current board id sits behind an async mutex that
//! is held for the whole store round-trip, so a save issued while another is
//! in flight waits and then updates the board the first one created.
//!
//! The current board belongs to the user who created or opened it. A save by
//! anyone else starts a new board instead of updating it.
//!
//! ERROR HANDLING
//! ==============
//! Every operation checks for a signed-in user before touching the store.
//! Store failures are returned unchanged and leave local state as it was;
//! deletes remove the entry from the local list first and put it back if the
//! store delete fails.

use std::sync::Arc;

use canvas::doc::BoardContent;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::collab::{Direction, Document, DocumentStore, Fields, Identity, Query, StoreError, UserId, now_ms};
use crate::config::Config;
use crate::error::ErrorCode;
use crate::services::listing::{ListModel, Listed};

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Please log in to save or load whiteboards.")]
    Unauthenticated,
    #[error("whiteboard {0} not found")]
    NotFound(String),
    #[error("whiteboard could not be encoded: {0}")]
    Encode(String),
    #[error("Failed to reach the whiteboard store: {0}")]
    Store(#[from] StoreError),
}

impl ErrorCode for BoardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "E_UNAUTHENTICATED",
            Self::NotFound(_) => "E_BOARD_NOT_FOUND",
            Self::Encode(_) => "E_BOARD_ENCODE",
            Self::Store(_) => "E_STORE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Store(err) => err.retryable(),
            _ => false,
        }
    }
}

/// A saved board as listed from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: String,
    pub owner_id: Option<UserId>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub content: BoardContent,
}

impl Listed for Board {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type BoardList = ListModel<Board>;

/// Document shape of a stored board.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBoard {
    uid: Option<UserId>,
    #[serde(default)]
    created_at: i64,
    updated_at: Option<i64>,
    #[serde(flatten)]
    content: BoardContent,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The board later saves update, and who it belongs to.
#[derive(Debug, Clone)]
struct CurrentBoard {
    id: String,
    owner: UserId,
}

pub struct BoardService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn Identity>,
    collection: String,
    current: Mutex<Option<CurrentBoard>>,
}

impl BoardService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn Identity>, config: &Config) -> Self {
        Self { store, identity, collection: config.whiteboard_collection.clone(), current: Mutex::new(None) }
    }

    /// Id of the board later saves will update, if any.
    pub async fn current_board_id(&self) -> Option<String> {
        self.current.lock().await.as_ref().map(|board| board.id.clone())
    }

    /// Save `content` as the current board, creating it on first save.
    ///
    /// Returns the board id.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` with no signed-in user (the store is not called),
    /// `Store` if the write fails.
    pub async fn save(&self, content: &BoardContent) -> Result<String, BoardError> {
        let user = self.require_user()?;
        let mut current = self.current.lock().await;
        let mut fields = content_fields(content)?;
        let now = now_ms();

        match current.as_ref() {
            Some(board) if board.owner == user => {
                fields.insert("updatedAt".into(), Value::from(now));
                self.store.update(&self.collection, &board.id, fields).await?;
                info!(board_id = %board.id, user = %user, "board updated");
                return Ok(board.id.clone());
            }
            Some(board) => {
                info!(
                    board_id = %board.id,
                    owner = %board.owner,
                    user = %user,
                    "signed-in user changed; saving as a new board"
                );
            }
            None => {}
        }

        fields.insert("uid".into(), Value::from(user.as_str()));
        fields.insert("createdAt".into(), Value::from(now));
        let id = self.store.create(&self.collection, fields).await?;
        info!(board_id = %id, user = %user, "board created");
        *current = Some(CurrentBoard { id: id.clone(), owner: user });
        Ok(id)
    }

    /// The signed-in user's boards, newest first.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` with no signed-in user, `Store` if the query fails.
    pub async fn list(&self) -> Result<Vec<Board>, BoardError> {
        let user = self.require_user()?;
        let query = Query::default()
            .filter("uid", user.as_str())
            .order_by("createdAt", Direction::Descending);
        let docs = self.store.list(&self.collection, &query).await?;
        let boards: Vec<Board> = docs.into_iter().filter_map(decode_board).collect();
        debug!(user = %user, count = boards.len(), "boards listed");
        Ok(boards)
    }

    /// Make `board` the current board and return its content for the canvas.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` with no signed-in user.
    pub async fn open(&self, board: &Board) -> Result<BoardContent, BoardError> {
        let user = self.require_user()?;
        *self.current.lock().await = Some(CurrentBoard { id: board.id.clone(), owner: user });
        info!(board_id = %board.id, "board opened");
        Ok(board.content.clone())
    }

    /// Forget the current board so the next save creates a new one.
    pub async fn new_board(&self) {
        *self.current.lock().await = None;
    }

    /// Delete board `id`, removing it from `list` optimistically.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` with no signed-in user, `NotFound` if `id` is not in
    /// `list`, `Store` if the delete fails (the entry is restored first).
    pub async fn delete(&self, list: &mut BoardList, id: &str) -> Result<(), BoardError> {
        self.require_user()?;
        let removed = list.remove(id).ok_or_else(|| BoardError::NotFound(id.to_owned()))?;

        if let Err(err) = self.store.delete(&self.collection, id).await {
            warn!(board_id = %id, error = %err, "board delete failed; restoring list entry");
            list.restore(removed);
            return Err(err.into());
        }

        let mut current = self.current.lock().await;
        if current.as_ref().is_some_and(|board| board.id == id) {
            *current = None;
        }
        info!(board_id = %id, "board deleted");
        Ok(())
    }

    fn require_user(&self) -> Result<UserId, BoardError> {
        self.identity.current_user_id().ok_or_else(|| {
            warn!("board operation without a signed-in user");
            BoardError::Unauthenticated
        })
    }
}

fn content_fields(content: &BoardContent) -> Result<Fields, BoardError> {
    match serde_json::to_value(content) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(BoardError::Encode(format!("expected an object, got {other}"))),
        Err(err) => Err(BoardError::Encode(err.to_string())),
    }
}

fn decode_board(doc: Document) -> Option<Board> {
    match serde_json::from_value::<StoredBoard>(Value::Object(doc.fields)) {
        Ok(stored) => Some(Board {
            id: doc.id,
            owner_id: stored.uid,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            content: stored.content,
        }),
        Err(err) => {
            warn!(board_id = %doc.id, error = %err, "skipping malformed board");
            None
        }
    }
}
