use crate::job::JobId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("job not found: {0}")]
    NotFound(JobId),
}
