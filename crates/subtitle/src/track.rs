use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::placeholder::Placeholder;
use crate::timestamp::format_timestamp;

const HEADER: &str = "WEBVTT";

/// A timestamped span of recognized speech, as returned by the transcriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    pub start: f64,
    pub end: f64,
    pub placeholder: Placeholder,
    pub text: String,
}

/// Accumulates cues into a WebVTT track.
///
/// Output is byte-for-byte reproducible: the `WEBVTT` header and a blank
/// line, then per cue a timing line, a `[label] text` line and a blank line.
/// Cues are written in push order with no numbering, merging or validation.
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    out: String,
}

impl Default for TrackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackBuilder {
    pub fn new() -> Self {
        let mut out = String::with_capacity(256);
        out.push_str(HEADER);
        out.push_str("\n\n");
        Self { out }
    }

    pub fn push(&mut self, cue: &SubtitleCue) {
        self.out.push_str(&format_timestamp(cue.start));
        self.out.push_str(" --> ");
        self.out.push_str(&format_timestamp(cue.end));
        self.out.push('\n');
        self.out.push_str(&format!("[{}] ", cue.placeholder));
        self.out.push_str(&cue_text(&cue.text));
        self.out.push_str("\n\n");
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Trims the payload and folds any interior line breaks into single spaces;
/// a blank line inside a payload would end the cue early.
fn cue_text(text: &str) -> String {
    let text = text.trim();
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A cue read back from a rendered track. After a rename the label is a
/// user-supplied name rather than a placeholder, hence the plain string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCue {
    pub start: f64,
    pub end: f64,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTrackError {
    #[error("track does not start with the WEBVTT header")]
    MissingHeader,
    #[error("invalid WebVTT: {0}")]
    Syntax(String),
    #[error("cue {index}: missing speaker label")]
    MissingLabel { index: usize },
}

/// Reads a rendered track back into cues, splitting each payload into its
/// leading `[label]` and the text after it.
pub fn parse_track(track: &str) -> Result<Vec<ParsedCue>, ParseTrackError> {
    if !track.starts_with(HEADER) {
        return Err(ParseTrackError::MissingHeader);
    }

    let webvtt =
        vtt::WebVtt::from_str(track).map_err(|e| ParseTrackError::Syntax(e.to_string()))?;

    webvtt
        .cues
        .into_iter()
        .enumerate()
        .map(|(index, cue)| {
            let (label, text) = cue
                .payload
                .strip_prefix('[')
                .and_then(|rest| rest.split_once(']'))
                .ok_or(ParseTrackError::MissingLabel { index })?;
            let text = text.strip_prefix(' ').unwrap_or(text);

            Ok(ParsedCue {
                start: cue.start.as_duration().as_secs_f64(),
                end: cue.end.as_duration().as_secs_f64(),
                label: label.to_string(),
                text: text.trim_end().to_string(),
            })
        })
        .collect()
}
