//! Services: board persistence and recordings, on top of the collaborators.

pub mod board;
pub mod listing;
pub mod recording;
