use std::collections::HashMap;
use std::sync::Arc;

use hypr_subtitle::{RenameRequest, apply_renames, display_name};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::job::{Job, JobId, JobState, NewJob};

/// Process-wide registry of finished jobs.
///
/// Cloning is cheap and every clone shares the same table. Each operation
/// takes the lock once, so `create`, `get`, `replace_track` and `rename` are
/// atomic with respect to each other. Only the track and the state of a job
/// change after creation.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, new: NewJob) -> JobId {
        let mut jobs = self.jobs.write().await;

        let mut id = JobId::new_random();
        while jobs.contains_key(&id) {
            id = JobId::new_random();
        }

        jobs.insert(
            id,
            Job {
                id,
                state: JobState::Labeled,
                track: new.track,
                transcript: new.transcript,
                mapping: new.mapping,
                media: new.media,
            },
        );

        tracing::info!(job_id = %id, job_count = jobs.len(), "job_created");
        id
    }

    pub async fn get(&self, id: &JobId) -> Result<Job> {
        self.jobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(Error::NotFound(*id))
    }

    /// Overwrites the track of an existing job. Nothing else is touched.
    pub async fn replace_track(&self, id: &JobId, track: String) -> Result<()> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id).ok_or(Error::NotFound(*id))?;
        job.track = track;
        Ok(())
    }

    /// Applies `renames` to the current track and marks the job finalized.
    ///
    /// Placeholders that were never assigned to this job are dropped from the
    /// request. Read, substitution and write happen under one write lock, so
    /// concurrent renames of the same job compose instead of overwriting each
    /// other.
    pub async fn rename(&self, id: &JobId, renames: &RenameRequest) -> Result<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id).ok_or(Error::NotFound(*id))?;

        let applicable: RenameRequest = renames
            .iter()
            .filter(|(placeholder, _)| job.mapping.contains(**placeholder))
            .map(|(placeholder, name)| (*placeholder, name.clone()))
            .collect();

        if applicable.len() < renames.len() {
            tracing::warn!(
                job_id = %id,
                ignored = renames.len() - applicable.len(),
                "rename_unassigned_placeholders_ignored"
            );
        }

        for (placeholder, name) in &applicable {
            if !name.trim().is_empty() && display_name(name).is_none() {
                tracing::warn!(
                    job_id = %id,
                    placeholder = %placeholder,
                    name = %name,
                    "rename_placeholder_name_ignored"
                );
            }
        }

        job.track = apply_renames(&job.track, &applicable);
        job.state = JobState::Finalized;

        tracing::info!(job_id = %id, renamed = applicable.len(), "job_renamed");
        Ok(job.clone())
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}
