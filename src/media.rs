//! HTTP media upload for recorded video.
//!
//! Posts an unsigned multipart upload (`file` + `upload_preset`) and reads the
//! hosted URL from the `secure_url` field of the JSON response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::collab::{MediaUpload, UploadError};
use crate::config::MediaConfig;

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

const UPLOAD_FILE_NAME: &str = "recording.webm";
const UPLOAD_MIME: &str = "video/webm";

pub struct HttpMediaUpload {
    http: reqwest::Client,
    url: String,
    preset: String,
}

impl HttpMediaUpload {
    /// # Errors
    ///
    /// Returns `UploadError::HttpClientBuild` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &MediaConfig) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| UploadError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: config.url.clone(), preset: config.preset.clone() })
    }
}

#[async_trait]
impl MediaUpload for HttpMediaUpload {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, UploadError> {
        let size = bytes.len();
        let file = Part::bytes(bytes)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)
            .map_err(|e| UploadError::Request(e.to_string()))?;
        let form = Form::new().part("file", file).text("upload_preset", self.preset.clone());

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| UploadError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            warn!(status, size, "media upload rejected");
            return Err(UploadError::Response { status, body: text });
        }

        let url = parse_upload_response(&text)?;
        info!(size, %url, "media uploaded");
        Ok(url)
    }
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Extract the hosted URL from an upload response body.
///
/// # Errors
///
/// Returns `UploadError::Parse` if the body is not JSON or has no
/// non-empty `secure_url`.
pub fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    let response: UploadResponse = serde_json::from_str(body).map_err(|e| UploadError::Parse(e.to_string()))?;
    match response.secure_url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(UploadError::Parse("response has no secure_url".into())),
    }
}
