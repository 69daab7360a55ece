use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Job, NewJob};
use super::query::{run_query, unique_values, JobField, JobFilter, JobPage, PageRequest, QueryError};
use crate::ids::JobId;
use crate::latency::SimulatedLatency;
use crate::store::{CollectionKey, Record, Store, StoreBackend, StoreError};
use crate::validation::ValidationFailure;

impl Record for Job {
    const KEY: CollectionKey = CollectionKey::Jobs;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Listing, lookup and admin maintenance of job postings.
pub struct JobService<B> {
    store: Arc<Store<B>>,
    latency: SimulatedLatency,
}

impl<B: StoreBackend> JobService<B> {
    pub fn new(store: Arc<Store<B>>, latency: SimulatedLatency) -> Self {
        Self { store, latency }
    }

    /// One page of jobs matching `filter`, newest first.
    pub async fn list(
        &self,
        filter: &JobFilter,
        window: PageRequest,
    ) -> Result<JobPage, JobServiceError> {
        let outcome = self
            .store
            .load::<Job>()
            .await
            .map(|jobs| run_query(jobs, filter, window))
            .map_err(JobServiceError::from);

        if let Ok(page) = &outcome {
            debug!(
                total = page.total_count,
                returned = page.items.len(),
                page = window.page(),
                "listed jobs"
            );
        }
        self.latency.settle(outcome).await
    }

    pub async fn get(&self, id: &JobId) -> Result<Job, JobServiceError> {
        let outcome = match self.store.load::<Job>().await {
            Ok(jobs) => jobs
                .into_iter()
                .find(|job| &job.id == id)
                .ok_or_else(|| JobServiceError::NotFound(id.clone())),
            Err(err) => Err(err.into()),
        };
        self.latency.settle(outcome).await
    }

    /// Distinct values of `field` for populating filter choices.
    pub async fn unique_values(&self, field: JobField) -> Result<Vec<String>, JobServiceError> {
        let outcome = self
            .store
            .load::<Job>()
            .await
            .map(|jobs| unique_values(&jobs, field))
            .map_err(JobServiceError::from);
        self.latency.settle(outcome).await
    }

    /// Assigns a fresh id and posted date and puts the job at the front of
    /// the collection.
    pub async fn create(&self, draft: NewJob) -> Result<Job, JobServiceError> {
        let outcome = match draft.check() {
            Ok(()) => {
                let job = draft.into_job(JobId::generate(), Utc::now());
                self.store
                    .modify(|jobs: &mut Vec<Job>| {
                        jobs.insert(0, job.clone());
                        Ok::<_, JobServiceError>(job)
                    })
                    .await
            }
            Err(failure) => Err(failure.into()),
        };

        if let Ok(job) = &outcome {
            info!(job_id = %job.id, title = %job.title, "job created");
        }
        self.latency.settle(outcome).await
    }

    /// Replaces the job stored under `id`. The original posted date is kept.
    pub async fn update(&self, id: &JobId, draft: NewJob) -> Result<Job, JobServiceError> {
        let outcome = match draft.check() {
            Ok(()) => {
                self.store
                    .modify(|jobs: &mut Vec<Job>| -> Result<Job, JobServiceError> {
                        let slot = jobs
                            .iter_mut()
                            .find(|job| &job.id == id)
                            .ok_or_else(|| JobServiceError::NotFound(id.clone()))?;
                        let updated = draft.into_job(id.clone(), slot.posted_date);
                        *slot = updated.clone();
                        Ok(updated)
                    })
                    .await
            }
            Err(failure) => Err(failure.into()),
        };

        if outcome.is_ok() {
            info!(job_id = %id, "job updated");
        }
        self.latency.settle(outcome).await
    }

    /// Removes the job if present; unknown ids are not an error.
    pub async fn delete(&self, id: &JobId) -> Result<(), JobServiceError> {
        let outcome = self
            .store
            .modify(|jobs: &mut Vec<Job>| {
                let before = jobs.len();
                jobs.retain(|job| &job.id != id);
                Ok::<_, JobServiceError>(before != jobs.len())
            })
            .await;

        if let Ok(removed) = &outcome {
            info!(job_id = %id, removed = *removed, "job delete requested");
        }
        self.latency.settle(outcome.map(|_| ())).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
