//! Unit tests for the job queue context.


use crate::queue::domain::{Job, JobFunction, JobId, JobPayload, PersistedJobData};
use crate::tag::Tag;
use chrono::{DateTime, Utc};

pub(super) fn persisted_job(
    id: i64,
    tag: &str,
    assigned: bool,
    updated_at: DateTime<Utc>,
) -> Job {
    let parsed = Tag::parse(tag).expect("valid tag");
    Job::from_persisted(PersistedJobData {
        id: JobId::new(id),
        function: JobFunction::Build,
        payload: JobPayload::from(&parsed),
        assigned,
        finished: false,
        failed: false,
        created_at: updated_at,
        updated_at,
    })
}
