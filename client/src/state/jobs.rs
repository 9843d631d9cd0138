//! Job listings for the doctor job board and the business job pages.

#[cfg(test)]
#[path = "jobs_test.rs"]
mod jobs_test;

use crate::net::types::{Job, JobStatus};
use crate::state::collection::Collection;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobsState {
    pub jobs: Collection<Job>,
    /// Id of a job whose accept request is in flight.
    pub accepting: Option<String>,
}

impl JobsState {
    #[must_use]
    pub fn open_jobs(&self) -> Vec<&Job> {
        self.with_status(JobStatus::Open)
    }

    #[must_use]
    pub fn with_status(&self, status: JobStatus) -> Vec<&Job> {
        self.jobs.items().iter().filter(|j| j.status == status).collect()
    }

    /// Jobs posted by `user`, newest arrival last.
    #[must_use]
    pub fn posted_by(&self, user: &str) -> Vec<&Job> {
        self.jobs
            .items()
            .iter()
            .filter(|j| j.posted_by.as_deref() == Some(user))
            .collect()
    }

    /// Start accepting `id`. Refused while another accept is pending or the
    /// job is no longer open.
    pub fn begin_accept(&mut self, id: &str) -> bool {
        let open = self.jobs.get(id).is_some_and(|j| j.status == JobStatus::Open);
        if self.accepting.is_some() || !open {
            return false;
        }
        self.accepting = Some(id.to_owned());
        true
    }

    /// Settle an accept request. On success the backend's copy replaces ours.
    pub fn finish_accept(&mut self, result: Option<Job>) {
        let Some(id) = self.accepting.take() else {
            return;
        };
        match result {
            Some(job) => self.jobs.upsert(job),
            None => log::debug!("accept for job {id} did not complete"),
        }
    }
}
