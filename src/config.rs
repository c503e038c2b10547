//! Service configuration parsed from environment variables.

pub const DEFAULT_WHITEBOARD_COLLECTION: &str = "whiteboards";
pub const DEFAULT_RECORDING_COLLECTION: &str = "recordings";
pub const DEFAULT_MEDIA_UPLOAD_PRESET: &str = "whiteboard_upload";
pub const DEFAULT_MEDIA_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MEDIA_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
}

impl crate::error::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "E_CONFIG_EMPTY",
            Self::InvalidUrl { .. } => "E_CONFIG_URL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Where recorded video is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    pub url: String,
    pub preset: String,
    pub timeouts: MediaTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub whiteboard_collection: String,
    pub recording_collection: String,
    /// `None` disables recording uploads.
    pub media: Option<MediaConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            whiteboard_collection: DEFAULT_WHITEBOARD_COLLECTION.into(),
            recording_collection: DEFAULT_RECORDING_COLLECTION.into(),
            media: None,
        }
    }
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `WHITEBOARD_COLLECTION`: default `whiteboards`
    /// - `RECORDING_COLLECTION`: default `recordings`
    /// - `MEDIA_UPLOAD_URL`: uploads are disabled when absent
    /// - `MEDIA_UPLOAD_PRESET`: default `whiteboard_upload`
    /// - `MEDIA_REQUEST_TIMEOUT_SECS`: default 120
    /// - `MEDIA_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let whiteboard_collection = collection(&lookup, "WHITEBOARD_COLLECTION", DEFAULT_WHITEBOARD_COLLECTION)?;
        let recording_collection = collection(&lookup, "RECORDING_COLLECTION", DEFAULT_RECORDING_COLLECTION)?;

        let media = match lookup("MEDIA_UPLOAD_URL").map(|v| v.trim().to_owned()) {
            None => None,
            Some(url) if url.is_empty() => None,
            Some(url) => {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(ConfigError::InvalidUrl { var: "MEDIA_UPLOAD_URL", value: url });
                }
                let preset = lookup("MEDIA_UPLOAD_PRESET")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MEDIA_UPLOAD_PRESET.to_owned());
                let timeouts = MediaTimeouts {
                    request_secs: parse_u64(&lookup, "MEDIA_REQUEST_TIMEOUT_SECS", DEFAULT_MEDIA_REQUEST_TIMEOUT_SECS),
                    connect_secs: parse_u64(&lookup, "MEDIA_CONNECT_TIMEOUT_SECS", DEFAULT_MEDIA_CONNECT_TIMEOUT_SECS),
                };
                Some(MediaConfig { url, preset, timeouts })
            }
        };

        Ok(Self { whiteboard_collection, recording_collection, media })
    }
}

fn collection<F>(lookup: &F, var: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default.to_owned()),
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(v) => Ok(v.trim().to_owned()),
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
