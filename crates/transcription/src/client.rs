use std::path::Path;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::multipart::{Form, Part};

use crate::{Error, Transcriber, Transcription};

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080/v1";
const DEFAULT_MODEL: &str = "whisper-1";

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint
/// (whisper.cpp server, faster-whisper servers, OpenAI itself).
///
/// Requests `verbose_json` so the response carries segment timestamps.
#[derive(Debug, Clone)]
pub struct WhisperApiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Default)]
pub struct WhisperApiClientBuilder {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
}

impl WhisperApiClientBuilder {
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn build(self) -> WhisperApiClient {
        WhisperApiClient {
            client: reqwest::Client::new(),
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: self.api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

impl WhisperApiClient {
    pub fn builder() -> WhisperApiClientBuilder {
        WhisperApiClientBuilder::default()
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.api_base)
    }

    async fn transcribe_file(&self, audio: &Path) -> Result<Transcription, Error> {
        let bytes = tokio::fs::read(audio).await?;
        let audio_size_bytes = bytes.len();

        let part = Part::bytes(bytes)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment");

        let mut request = self.client.post(self.endpoint()).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::info!(
            model = %self.model,
            audio_size_bytes,
            "transcription_request"
        );

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let transcription: Transcription = response.json().await?;
        tracing::info!(
            segment_count = transcription.segments.len(),
            "transcription_received"
        );
        Ok(transcription)
    }
}

impl Transcriber for WhisperApiClient {
    fn transcribe<'a>(&'a self, audio: &'a Path) -> BoxFuture<'a, Result<Transcription, Error>> {
        self.transcribe_file(audio).boxed()
    }
}
