use std::path::Path;
use std::sync::Arc;

use futures_util::{FutureExt, future::BoxFuture};
use hypr_audio_extract::AudioExtractor;
use hypr_diarization::{DiarizationTurn, Diarizer};
use hypr_subtitle::Segment;
use hypr_transcription::{Transcriber, Transcription};
use subtitler::{AppState, Pipeline, router};

pub struct FakeExtractor {
    pub fail: bool,
}

impl AudioExtractor for FakeExtractor {
    fn extract<'a>(
        &'a self,
        _input: &'a Path,
        output: &'a Path,
    ) -> BoxFuture<'a, Result<(), hypr_audio_extract::Error>> {
        async move {
            if self.fail {
                return Err(hypr_audio_extract::Error::Failed {
                    code: Some(1),
                    stderr: "Invalid data found when processing input".to_string(),
                });
            }
            tokio::fs::write(output, b"RIFF")
                .await
                .map_err(|source| hypr_audio_extract::Error::Spawn {
                    program: "fake".to_string(),
                    source,
                })
        }
        .boxed()
    }
}

pub struct FakeTranscriber(pub Option<Vec<Segment>>);

impl Transcriber for FakeTranscriber {
    fn transcribe<'a>(
        &'a self,
        _audio: &'a Path,
    ) -> BoxFuture<'a, Result<Transcription, hypr_transcription::Error>> {
        let result = match &self.0 {
            Some(segments) => Ok(Transcription {
                text: segments
                    .iter()
                    .map(|s| s.text.trim())
                    .collect::<Vec<_>>()
                    .join(" "),
                segments: segments.clone(),
            }),
            None => Err(hypr_transcription::Error::Upstream {
                status: 503,
                body: "model loading".to_string(),
            }),
        };
        async move { result }.boxed()
    }
}

/// `None` behaves like an engine that cannot be reached.
pub struct FakeDiarizer(pub Option<Vec<DiarizationTurn>>);

impl Diarizer for FakeDiarizer {
    fn diarize<'a>(
        &'a self,
        _audio: &'a Path,
    ) -> BoxFuture<'a, Result<Vec<DiarizationTurn>, hypr_diarization::Error>> {
        let result = match &self.0 {
            Some(turns) => Ok(turns.clone()),
            None => Err(hypr_diarization::Error::Upstream {
                status: 401,
                body: "invalid token".to_string(),
            }),
        };
        async move { result }.boxed()
    }
}

pub fn segment(start: f64, end: f64, text: &str) -> Segment {
    Segment {
        start,
        end,
        text: text.to_string(),
    }
}

pub fn turn(start: f64, end: f64, speaker: &str) -> DiarizationTurn {
    DiarizationTurn {
        start,
        end,
        speaker: speaker.to_string(),
    }
}

pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    pub upload_dir: tempfile::TempDir,
}

impl TestServer {
    pub async fn start(
        extractor: FakeExtractor,
        transcriber: FakeTranscriber,
        diarizer: FakeDiarizer,
    ) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            Arc::new(extractor),
            Arc::new(transcriber),
            Arc::new(diarizer),
            upload_dir.path(),
        );
        let app = router(AppState::new(pipeline, 8 * 1024 * 1024));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            upload_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> reqwest::Response {
        self.upload_as(filename, "video/mp4", bytes).await
    }

    pub async fn upload_as(&self, filename: &str, mime: &str, bytes: &[u8]) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(mime)
            .unwrap();
        let form = reqwest::multipart::Form::new().part("video", part);

        self.client
            .post(self.url("/jobs"))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn upload_job(&self) -> String {
        let res = self.upload("clip.mp4", b"\x00\x00\x00\x18ftypmp42").await;
        assert_eq!(res.status(), 201);
        let body: serde_json::Value = res.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn download(&self, id: &str, kind: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/jobs/{id}/download?type={kind}")))
            .send()
            .await
            .unwrap()
    }

    pub async fn rename(&self, id: &str, pairs: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/jobs/{id}/speakers")))
            .form(pairs)
            .send()
            .await
            .unwrap()
    }

    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
