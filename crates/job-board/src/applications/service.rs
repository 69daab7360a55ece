use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{ApplicationSubmission, EmployeeApplication};
use crate::ids::ApplicationId;
use crate::latency::SimulatedLatency;
use crate::store::{CollectionKey, Record, Store, StoreBackend, StoreError};
use crate::validation::ValidationFailure;

impl Record for EmployeeApplication {
    const KEY: CollectionKey = CollectionKey::EmployeeApplications;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Intake and review of employee applications. Records are append-only.
pub struct ApplicationService<B> {
    store: Arc<Store<B>>,
    latency: SimulatedLatency,
}

impl<B: StoreBackend> ApplicationService<B> {
    pub fn new(store: Arc<Store<B>>, latency: SimulatedLatency) -> Self {
        Self { store, latency }
    }

    /// All applications, most recently submitted first.
    pub async fn list(&self) -> Result<Vec<EmployeeApplication>, ApplicationServiceError> {
        let outcome = self
            .store
            .load::<EmployeeApplication>()
            .await
            .map(|mut applications| {
                applications.sort_by_key(|application| Reverse(application.submitted_at));
                applications
            })
            .map_err(ApplicationServiceError::from);
        self.latency.settle(outcome).await
    }

    pub async fn create(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<EmployeeApplication, ApplicationServiceError> {
        let outcome = match submission.check() {
            Ok(()) => {
                let application = EmployeeApplication {
                    id: ApplicationId::generate(),
                    details: submission,
                    submitted_at: Utc::now(),
                };
                self.store
                    .modify(|applications: &mut Vec<EmployeeApplication>| {
                        applications.push(application.clone());
                        Ok::<_, ApplicationServiceError>(application)
                    })
                    .await
            }
            Err(failure) => Err(failure.into()),
        };

        if let Ok(application) = &outcome {
            info!(
                application_id = %application.id,
                job_title = %application.details.job_title,
                "application received"
            );
        }
        self.latency.settle(outcome).await
    }

    /// Removes the application if present; unknown ids are not an error.
    pub async fn delete(&self, id: &ApplicationId) -> Result<(), ApplicationServiceError> {
        let outcome = self
            .store
            .modify(|applications: &mut Vec<EmployeeApplication>| {
                applications.retain(|application| &application.id != id);
                Ok::<_, ApplicationServiceError>(())
            })
            .await;

        if outcome.is_ok() {
            info!(application_id = %id, "application delete requested");
        }
        self.latency.settle(outcome).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Store(#[from] StoreError),
}
