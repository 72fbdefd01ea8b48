use std::path::Path;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{DiarizationTurn, Diarizer, Error};

/// Client for a pyannote speaker-diarization server.
///
/// Posts the extracted WAV to `{api_base}/diarize` and expects
/// `{"segments": [{"start", "end", "speaker"}]}` back, in the order the
/// pipeline produced the turns. The Hugging Face token gates access to the
/// gated pyannote models and is forwarded as a bearer token.
#[derive(Debug, Clone)]
pub struct PyannoteClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Deserialize)]
struct DiarizeResponse {
    #[serde(default)]
    segments: Vec<DiarizationTurn>,
}

impl PyannoteClient {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base, token)
    }

    pub fn with_client(
        client: reqwest::Client,
        api_base: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn diarize_file(&self, audio: &Path) -> Result<Vec<DiarizationTurn>, Error> {
        let bytes = tokio::fs::read(audio).await?;
        let part = Part::bytes(bytes)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/diarize", self.api_base))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let DiarizeResponse { segments } = response.json().await?;
        Ok(segments)
    }
}

impl Diarizer for PyannoteClient {
    fn diarize<'a>(&'a self, audio: &'a Path) -> BoxFuture<'a, Result<Vec<DiarizationTurn>, Error>> {
        self.diarize_file(audio).boxed()
    }
}
