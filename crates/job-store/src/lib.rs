mod error;
mod job;
mod store;

pub use error::{Error, Result};
pub use job::{Job, JobId, JobState, MediaRef, NewJob};
pub use store::JobStore;
