//! Upload of item metadata files to the IPFS pinning service.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum PinningError {
    /// Non-success response; status and body are forwarded to the client
    #[error("Pinning service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("An error occurred during Pinata upload: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

#[async_trait]
pub trait MetadataPinner: Send + Sync {
    /// Pin the file and return the gateway URI it can be fetched from.
    async fn pin_file(&self, file: UploadedFile) -> Result<String, PinningError>;
}

#[derive(Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

pub struct PinataClient {
    http: reqwest::Client,
    api_url: String,
    gateway_url: String,
    jwt: Option<String>,
}

impl PinataClient {
    pub fn new(
        api_url: impl Into<String>,
        gateway_url: impl Into<String>,
        jwt: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_url: api_url.into(),
            gateway_url: gateway_url.into(),
            jwt,
        })
    }

    fn gateway_uri(&self, ipfs_hash: &str) -> String {
        format!("{}/{}", self.gateway_url.trim_end_matches('/'), ipfs_hash)
    }
}

#[async_trait]
impl MetadataPinner for PinataClient {
    #[instrument(skip_all, fields(file_name = %file.file_name, size = file.content.len()))]
    async fn pin_file(&self, file: UploadedFile) -> Result<String, PinningError> {
        let mut part = Part::bytes(file.content.to_vec()).file_name(file.file_name);
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }

        let mut request = self
            .http
            .post(&self.api_url)
            .multipart(Form::new().part("file", part));
        if let Some(jwt) = &self.jwt {
            request = request.bearer_auth(jwt);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PinningError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let pinned: PinFileResponse = response.json().await?;
        debug!(ipfs_hash = %pinned.ipfs_hash, "file pinned");
        Ok(self.gateway_uri(&pinned.ipfs_hash))
    }
}
