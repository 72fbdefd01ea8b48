use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_upload_bytes() -> usize {
    1024 * 1024 * 1024
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_whisper_api_base() -> String {
    "http://127.0.0.1:8080/v1".to_string()
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_diarization_api_base() -> String {
    "http://127.0.0.1:8090".to_string()
}

fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
pub struct Env {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default, deserialize_with = "filter_empty")]
    pub sentry_dsn: Option<String>,

    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    #[serde(default = "default_whisper_api_base")]
    pub whisper_api_base: String,
    #[serde(default, deserialize_with = "filter_empty")]
    pub whisper_api_key: Option<String>,
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    #[serde(default = "default_diarization_api_base")]
    pub diarization_api_base: String,
    /// Required at startup; see `main`.
    #[serde(default, deserialize_with = "filter_empty")]
    pub huggingface_token: Option<String>,
}

impl Env {
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

static ENV: OnceLock<Env> = OnceLock::new();

pub fn env() -> &'static Env {
    ENV.get_or_init(|| {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_path(manifest_dir.join(".env"));
        envy::from_env().expect("Failed to load environment")
    })
}
