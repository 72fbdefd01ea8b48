/// A downloadable artifact of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Track,
    Transcript,
}

impl ArtifactKind {
    /// Parses the `type` query value used by download links.
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "vtt" => Some(Self::Track),
            "transcript" => Some(Self::Transcript),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Track => "subtitles.vtt",
            Self::Transcript => "transcript.txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Track => "text/vtt; charset=utf-8",
            Self::Transcript => "text/plain; charset=utf-8",
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name())
    }
}
