//! Error classification shared by every service error.

/// Stable machine-readable code for an error, alongside its user-facing
/// `Display` text.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same call may succeed.
    fn retryable(&self) -> bool {
        false
    }
}
