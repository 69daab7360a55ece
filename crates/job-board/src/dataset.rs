use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::applications::EmployeeApplication;
use crate::inquiries::EmployerInquiry;
use crate::jobs::Job;
use crate::store::{Store, StoreBackend};

/// The whole persisted dataset, keyed the same way as the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSnapshot {
    pub jobs: Vec<Job>,
    pub employee_applications: Vec<EmployeeApplication>,
    pub employer_inquiries: Vec<EmployerInquiry>,
}

/// Read-only export of every collection, open to any origin.
pub fn dataset_router<B>(store: Arc<Store<B>>) -> Router
where
    B: StoreBackend + 'static,
{
    Router::new()
        .route("/api/data", get(snapshot_handler::<B>))
        .with_state(store)
}

pub(crate) async fn snapshot_handler<B>(State(store): State<Arc<Store<B>>>) -> Response
where
    B: StoreBackend + 'static,
{
    let cors = [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")];
    match store.snapshot().await {
        Ok(snapshot) => (StatusCode::OK, cors, Json(snapshot)).into_response(),
        Err(err) => {
            error!(error = %err, "dataset snapshot failed");
            let payload = json!({ "error": "failed to read dataset" });
            (StatusCode::INTERNAL_SERVER_ERROR, cors, Json(payload)).into_response()
        }
    }
}
