mod client;
mod error;

pub use client::PyannoteClient;
pub use error::Error;
pub use hypr_subtitle::DiarizationTurn;

use std::path::Path;

use futures_util::future::BoxFuture;

pub trait Diarizer: Send + Sync {
    fn diarize<'a>(&'a self, audio: &'a Path) -> BoxFuture<'a, Result<Vec<DiarizationTurn>, Error>>;
}

/// Outcome of the diarization step, settled once before alignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Diarization {
    Available(Vec<DiarizationTurn>),
    /// The engine failed; every segment will be attributed to the unknown
    /// speaker.
    Unavailable,
}

impl Diarization {
    pub fn turns(&self) -> Option<&[DiarizationTurn]> {
        match self {
            Self::Available(turns) => Some(turns),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Runs `diarizer`, turning any failure into [`Diarization::Unavailable`].
/// Diarization never aborts a job.
pub async fn diarize_or_unavailable(diarizer: &dyn Diarizer, audio: &Path) -> Diarization {
    match diarizer.diarize(audio).await {
        Ok(turns) => {
            tracing::info!(turn_count = turns.len(), "diarization_completed");
            Diarization::Available(turns)
        }
        Err(e) => {
            tracing::warn!(error = %e, "diarization_failed");
            Diarization::Unavailable
        }
    }
}
