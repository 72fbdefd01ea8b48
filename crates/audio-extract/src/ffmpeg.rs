use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::process::Command;

use crate::{AudioExtractor, CHANNELS, Error, SAMPLE_RATE};

const STDERR_TAIL_BYTES: usize = 2048;

#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    program: PathBuf,
}

impl FfmpegExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-ac".into(),
            CHANNELS.to_string().into(),
            "-ar".into(),
            SAMPLE_RATE.to_string().into(),
            output.into(),
        ]
    }

    async fn run(&self, input: &Path, output: &Path) -> Result<(), Error> {
        let result = Command::new(&self.program)
            .args(Self::args(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Failed {
                code: result.status.code(),
                stderr: tail(&stderr, STDERR_TAIL_BYTES).trim().to_string(),
            });
        }

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            "audio_extracted"
        );
        Ok(())
    }
}

impl AudioExtractor for FfmpegExtractor {
    fn extract<'a>(&'a self, input: &'a Path, output: &'a Path) -> BoxFuture<'a, Result<(), Error>> {
        self.run(input, output).boxed()
    }
}

/// Last `max` bytes of `s`, cut on a char boundary. ffmpeg prints its banner
/// first and the actual error last.
fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
