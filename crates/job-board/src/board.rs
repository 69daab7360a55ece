use std::sync::Arc;

use axum::Router;

use crate::applications::{application_router, ApplicationService};
use crate::dataset::dataset_router;
use crate::inquiries::{inquiry_router, InquiryService};
use crate::jobs::{job_router, JobService};
use crate::latency::SimulatedLatency;
use crate::store::{Store, StoreBackend};

/// One store shared by the job, application and inquiry services.
pub struct JobBoard<B> {
    store: Arc<Store<B>>,
    jobs: Arc<JobService<B>>,
    applications: Arc<ApplicationService<B>>,
    inquiries: Arc<InquiryService<B>>,
}

impl<B> Clone for JobBoard<B> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            jobs: self.jobs.clone(),
            applications: self.applications.clone(),
            inquiries: self.inquiries.clone(),
        }
    }
}

impl<B> JobBoard<B>
where
    B: StoreBackend + 'static,
{
    pub fn new(backend: B, latency: SimulatedLatency) -> Self {
        let store = Arc::new(Store::new(backend));
        Self {
            jobs: Arc::new(JobService::new(store.clone(), latency)),
            applications: Arc::new(ApplicationService::new(store.clone(), latency)),
            inquiries: Arc::new(InquiryService::new(store.clone(), latency)),
            store,
        }
    }

    pub fn store(&self) -> &Arc<Store<B>> {
        &self.store
    }

    pub fn jobs(&self) -> &JobService<B> {
        &self.jobs
    }

    pub fn applications(&self) -> &ApplicationService<B> {
        &self.applications
    }

    pub fn inquiries(&self) -> &InquiryService<B> {
        &self.inquiries
    }

    /// Every data endpoint: jobs, applications, inquiries and the snapshot.
    pub fn router(&self) -> Router {
        job_router(self.jobs.clone())
            .merge(application_router(self.applications.clone()))
            .merge(inquiry_router(self.inquiries.clone()))
            .merge(dataset_router(self.store.clone()))
    }
}
