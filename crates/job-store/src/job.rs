use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use hypr_subtitle::PlaceholderMapping;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque job identifier backed by a random (v4) UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub(crate) fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Track still carries the raw `SPEAKER_NN` placeholders.
    Labeled,
    /// At least one rename has been applied.
    Finalized,
}

/// The uploaded source media, kept on disk for preview. The extension of
/// `path` is chosen by the server and decides the served content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub path: PathBuf,
}

/// Everything produced by processing one upload, before an id is issued.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub transcript: String,
    pub track: String,
    pub mapping: PlaceholderMapping,
    pub media: MediaRef,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub state: JobState,
    pub track: String,
    pub transcript: String,
    pub mapping: PlaceholderMapping,
    pub media: MediaRef,
}
