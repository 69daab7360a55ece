use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use super::domain::{EmploymentType, NewJob};
use super::query::{JobField, JobFilter, PageRequest, QueryError, DEFAULT_PAGE_SIZE};
use super::service::{JobService, JobServiceError};
use crate::error::{error_response, json_rejection, query_rejection};
use crate::ids::JobId;
use crate::store::StoreBackend;

/// Query string accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct JobListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl JobListParams {
    pub fn into_query(self) -> Result<(JobFilter, PageRequest), QueryError> {
        let filter =
            JobFilter::from_parts(self.search, self.employment_type, self.location, self.remote_only)?;
        let window = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;
        Ok((filter, window))
    }
}

/// Public listing/detail endpoints plus admin maintenance of postings.
pub fn job_router<B>(service: Arc<JobService<B>>) -> Router
where
    B: StoreBackend + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(list_handler::<B>).post(create_handler::<B>),
        )
        .route("/api/v1/jobs/filters/:field", get(values_handler::<B>))
        .route(
            "/api/v1/jobs/:job_id",
            get(get_handler::<B>)
                .put(update_handler::<B>)
                .delete(delete_handler::<B>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<B>(
    State(service): State<Arc<JobService<B>>>,
    params: Result<Query<JobListParams>, QueryRejection>,
) -> Response
where
    B: StoreBackend + 'static,
{
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return query_rejection(rejection),
    };
    let (filter, window) = match params.into_query() {
        Ok(query) => query,
        Err(err) => return failure_response(err.into()),
    };

    match service.list(&filter, window).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn values_handler<B>(
    State(service): State<Arc<JobService<B>>>,
    Path(field): Path<String>,
) -> Response
where
    B: StoreBackend + 'static,
{
    let Some(field) = JobField::parse(&field) else {
        return failure_response(QueryError::UnknownField(field).into());
    };

    match service.unique_values(field).await {
        Ok(values) => (StatusCode::OK, Json(values)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn get_handler<B>(
    State(service): State<Arc<JobService<B>>>,
    Path(job_id): Path<String>,
) -> Response
where
    B: StoreBackend + 'static,
{
    match service.get(&JobId(job_id)).await {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn create_handler<B>(
    State(service): State<Arc<JobService<B>>>,
    draft: Result<Json<NewJob>, JsonRejection>,
) -> Response
where
    B: StoreBackend + 'static,
{
    let Json(draft) = match draft {
        Ok(draft) => draft,
        Err(rejection) => return json_rejection(rejection),
    };
    match service.create(draft).await {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn update_handler<B>(
    State(service): State<Arc<JobService<B>>>,
    Path(job_id): Path<String>,
    draft: Result<Json<NewJob>, JsonRejection>,
) -> Response
where
    B: StoreBackend + 'static,
{
    let Json(draft) = match draft {
        Ok(draft) => draft,
        Err(rejection) => return json_rejection(rejection),
    };
    match service.update(&JobId(job_id), draft).await {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn delete_handler<B>(
    State(service): State<Arc<JobService<B>>>,
    Path(job_id): Path<String>,
) -> Response
where
    B: StoreBackend + 'static,
{
    match service.delete(&JobId(job_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => failure_response(err),
    }
}

fn failure_response(err: JobServiceError) -> Response {
    match err {
        JobServiceError::NotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
        JobServiceError::Validation(_) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        JobServiceError::Query(_) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        JobServiceError::Store(store_err) => {
            error!(error = %store_err, "job store failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, store_err.to_string())
        }
    }
}
