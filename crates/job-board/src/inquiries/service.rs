use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{EmployerInquiry, InquirySubmission};
use crate::ids::InquiryId;
use crate::latency::SimulatedLatency;
use crate::store::{CollectionKey, Record, Store, StoreBackend, StoreError};
use crate::validation::ValidationFailure;

impl Record for EmployerInquiry {
    const KEY: CollectionKey = CollectionKey::EmployerInquiries;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Employer staffing inquiries. Append-only apart from deletion.
pub struct InquiryService<B> {
    store: Arc<Store<B>>,
    latency: SimulatedLatency,
}

impl<B: StoreBackend> InquiryService<B> {
    pub fn new(store: Arc<Store<B>>, latency: SimulatedLatency) -> Self {
        Self { store, latency }
    }

    /// All inquiries, most recently submitted first.
    pub async fn list(&self) -> Result<Vec<EmployerInquiry>, InquiryServiceError> {
        let outcome = match self.store.load::<EmployerInquiry>().await {
            Ok(mut inquiries) => {
                inquiries.sort_by_key(|inquiry| Reverse(inquiry.submitted_at));
                Ok(inquiries)
            }
            Err(err) => Err(err.into()),
        };
        self.latency.settle(outcome).await
    }

    pub async fn create(
        &self,
        submission: InquirySubmission,
    ) -> Result<EmployerInquiry, InquiryServiceError> {
        if let Err(failure) = submission.check() {
            return self.latency.settle(Err(failure.into())).await;
        }

        let inquiry = EmployerInquiry {
            id: InquiryId::generate(),
            details: submission,
            submitted_at: Utc::now(),
        };
        let outcome = self
            .store
            .modify(|inquiries: &mut Vec<EmployerInquiry>| {
                inquiries.push(inquiry.clone());
                Ok::<_, InquiryServiceError>(inquiry)
            })
            .await;

        if let Ok(inquiry) = &outcome {
            info!(
                inquiry_id = %inquiry.id,
                company = %inquiry.details.company_name,
                "employer inquiry received"
            );
        }
        self.latency.settle(outcome).await
    }

    /// Removes the inquiry if present; unknown ids are not an error.
    pub async fn delete(&self, id: &InquiryId) -> Result<(), InquiryServiceError> {
        let outcome = self
            .store
            .modify(|inquiries: &mut Vec<EmployerInquiry>| {
                inquiries.retain(|inquiry| &inquiry.id != id);
                Ok::<_, InquiryServiceError>(())
            })
            .await;
        self.latency.settle(outcome).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Store(#[from] StoreError),
}
