mod error;
mod ffmpeg;

pub use error::Error;
pub use ffmpeg::FfmpegExtractor;

use std::path::Path;

use futures_util::future::BoxFuture;

pub const SAMPLE_RATE: u32 = 16_000;
pub const CHANNELS: u16 = 1;

/// Turns an arbitrary media container into mono 16 kHz PCM WAV.
///
/// Object-safe so callers can hold `Arc<dyn AudioExtractor>`.
pub trait AudioExtractor: Send + Sync {
    fn extract<'a>(&'a self, input: &'a Path, output: &'a Path) -> BoxFuture<'a, Result<(), Error>>;
}
