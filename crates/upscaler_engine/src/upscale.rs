use std::fmt;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{FailureKind, UpscaleError, UpscaleRequest};

pub const DEFAULT_ENDPOINT: &str = "https://ai-image-upscaler1.p.rapidapi.com/v1";
pub const DEFAULT_HOST: &str = "ai-image-upscaler1.p.rapidapi.com";

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";
const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
pub struct UpscaleSettings {
    pub endpoint: String,
    pub host: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
    /// Multipart field carrying the quality selector; not sent when `None`.
    pub quality_field: Option<String>,
}

impl Default for UpscaleSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            host: DEFAULT_HOST.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 64 * 1024 * 1024,
            quality_field: None,
        }
    }
}

impl fmt::Debug for UpscaleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpscaleSettings")
            .field("endpoint", &self.endpoint)
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_response_bytes", &self.max_response_bytes)
            .field("quality_field", &self.quality_field)
            .finish()
    }
}

/// Submits one packaged image and returns the base64 result.
#[async_trait::async_trait]
pub trait Upscaler: Send + Sync {
    /// Reject a request that cannot be packaged, before anything is sent.
    fn validate(&self, _request: &UpscaleRequest) -> Result<(), UpscaleError> {
        Ok(())
    }

    async fn upscale(&self, request: UpscaleRequest) -> Result<String, UpscaleError>;
}

#[derive(Debug, Deserialize)]
struct UpscaleResponse {
    result_base64: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestUpscaler {
    settings: UpscaleSettings,
}

impl ReqwestUpscaler {
    pub fn new(settings: UpscaleSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UpscaleError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| UpscaleError::new(FailureKind::Network, err.to_string()))
    }

    fn build_form(&self, request: UpscaleRequest) -> Result<Form, UpscaleError> {
        let part = image_part(Part::bytes(request.bytes), &request.media_type)?
            .file_name(request.file_name);
        let mut form = Form::new().part(IMAGE_FIELD, part);
        if let Some(field) = &self.settings.quality_field {
            form = form.text(field.clone(), request.quality);
        }
        Ok(form)
    }
}

fn image_part(part: Part, media_type: &str) -> Result<Part, UpscaleError> {
    part.mime_str(media_type)
        .map_err(|err| UpscaleError::new(FailureKind::InvalidRequest, err.to_string()))
}

#[async_trait::async_trait]
impl Upscaler for ReqwestUpscaler {
    fn validate(&self, request: &UpscaleRequest) -> Result<(), UpscaleError> {
        image_part(Part::bytes(Vec::new()), &request.media_type).map(|_| ())
    }

    async fn upscale(&self, request: UpscaleRequest) -> Result<String, UpscaleError> {
        let client = self.build_client()?;
        let form = self.build_form(request)?;

        // reqwest sets the multipart Content-Type with its boundary.
        let response = client
            .post(&self.settings.endpoint)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .header(API_HOST_HEADER, &self.settings.host)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpscaleError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(UpscaleError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(UpscaleError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        parse_response(&body)
    }
}

fn parse_response(body: &[u8]) -> Result<String, UpscaleError> {
    let parsed: UpscaleResponse = serde_json::from_slice(body)
        .map_err(|err| UpscaleError::new(FailureKind::MalformedResponse, err.to_string()))?;
    parsed
        .result_base64
        .ok_or_else(|| UpscaleError::new(FailureKind::MissingResult, "result_base64 missing"))
}

fn map_reqwest_error(err: reqwest::Error) -> UpscaleError {
    if err.is_timeout() {
        return UpscaleError::new(FailureKind::Timeout, err.to_string());
    }
    UpscaleError::new(FailureKind::Network, err.to_string())
}
