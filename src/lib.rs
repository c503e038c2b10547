//! Persistence and session layer around the whiteboard canvas.
//!
//! The [`canvas`] crate owns drawing and history and produces a
//! [`canvas::doc::BoardContent`] to persist. This crate saves, lists, opens
//! and deletes boards for the signed-in user, publishes screen recordings,
//! and defines the external collaborators it needs as traits so hosts can
//! plug in their own identity provider, document store, media host and
//! clipboard.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`collab`] | Collaborator traits, queries and their errors |
//! | [`memory`] | In-memory collaborators for tests and offline use |
//! | [`media`] | HTTP media upload |
//! | [`services`] | Board and recording services |
//! | [`config`] | Environment configuration |
//! | [`error`] | The [`error::ErrorCode`] trait |

pub mod collab;
pub mod config;
pub mod error;
pub mod media;
pub mod memory;
pub mod services;
