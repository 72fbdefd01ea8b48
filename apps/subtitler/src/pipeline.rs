use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use hypr_audio_extract::AudioExtractor;
use hypr_diarization::{Diarizer, diarize_or_unavailable};
use hypr_job_store::{MediaRef, NewJob};
use hypr_transcription::Transcriber;

use crate::error::{AppError, Result};

/// One uploaded media file as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Media file → audio → diarization + transcription → aligned track.
pub struct Pipeline {
    extractor: Arc<dyn AudioExtractor>,
    transcriber: Arc<dyn Transcriber>,
    diarizer: Arc<dyn Diarizer>,
    upload_dir: PathBuf,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn AudioExtractor>,
        transcriber: Arc<dyn Transcriber>,
        diarizer: Arc<dyn Diarizer>,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            transcriber,
            diarizer,
            upload_dir: upload_dir.into(),
        }
    }

    /// Runs one upload end to end. The stored media is removed again when
    /// any step fails, so only successful jobs leave files behind.
    pub async fn process(&self, upload: Upload) -> Result<NewJob> {
        let extension = hypr_media_mime::upload_extension(
            upload.filename.as_deref(),
            upload.content_type.as_deref(),
        );
        let media_path = self.persist_upload(upload.bytes, &extension).await?;
        tracing::info!(path = %media_path.display(), "upload_stored");

        match self.run(&media_path).await {
            Ok((transcript, alignment)) => Ok(NewJob {
                transcript,
                track: alignment.track,
                mapping: alignment.mapping,
                media: MediaRef { path: media_path },
            }),
            Err(err) => {
                discard(&media_path).await;
                Err(err)
            }
        }
    }

    async fn run(&self, media_path: &Path) -> Result<(String, hypr_subtitle::Alignment)> {
        let audio = tempfile::Builder::new()
            .prefix("audio_")
            .suffix(".wav")
            .tempfile_in(&self.upload_dir)?;

        self.extractor
            .extract(media_path, audio.path())
            .await
            .map_err(|e| AppError::TranscodeFailure(e.to_string()))?;

        let diarization = diarize_or_unavailable(self.diarizer.as_ref(), audio.path()).await;

        let transcription = self
            .transcriber
            .transcribe(audio.path())
            .await
            .map_err(|e| AppError::TranscriptionFailure(e.to_string()))?;

        let alignment = hypr_subtitle::align(&transcription.segments, diarization.turns());

        tracing::info!(
            segment_count = transcription.segments.len(),
            speaker_count = alignment.mapping.len(),
            diarization_available = diarization.is_available(),
            "pipeline_completed"
        );

        Ok((transcription.text, alignment))
    }

    async fn persist_upload(&self, bytes: Bytes, extension: &str) -> Result<PathBuf> {
        let dir = self.upload_dir.clone();
        let suffix = format!(".{extension}");

        tokio::task::spawn_blocking(move || -> std::io::Result<PathBuf> {
            use std::io::Write;

            let mut file = tempfile::Builder::new()
                .prefix("upload_")
                .suffix(&suffix)
                .tempfile_in(&dir)?;
            file.write_all(&bytes)?;
            file.flush()?;
            let (_, path) = file.keep()?;
            Ok(path)
        })
        .await
        .map_err(|e| AppError::Internal(format!("upload writer panicked: {e}")))?
        .map_err(AppError::from)
    }
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "upload_cleanup_failed");
    }
}
