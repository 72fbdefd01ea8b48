mod client;
mod error;

pub use client::{WhisperApiClient, WhisperApiClientBuilder};
pub use error::Error;

use std::path::Path;

use futures_util::future::BoxFuture;
use hypr_subtitle::Segment;
use serde::{Deserialize, Serialize};

/// Full recognized text plus its timestamped segments, in chronological
/// order. `segments` may be empty (silence), which yields an empty track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

pub trait Transcriber: Send + Sync {
    fn transcribe<'a>(&'a self, audio: &'a Path) -> BoxFuture<'a, Result<Transcription, Error>>;
}
