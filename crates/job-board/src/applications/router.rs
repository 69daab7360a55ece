use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use tracing::error;

use super::domain::ApplicationSubmission;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::error::{error_response, json_rejection};
use crate::ids::ApplicationId;
use crate::store::StoreBackend;

/// Public intake plus the admin listing and removal of applications.
pub fn application_router<B>(service: Arc<ApplicationService<B>>) -> Router
where
    B: StoreBackend + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            get(list_handler::<B>).post(submit_handler::<B>),
        )
        .route(
            "/api/v1/applications/:application_id",
            delete(delete_handler::<B>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<B>(State(service): State<Arc<ApplicationService<B>>>) -> Response
where
    B: StoreBackend + 'static,
{
    match service.list().await {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn submit_handler<B>(
    State(service): State<Arc<ApplicationService<B>>>,
    submission: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    B: StoreBackend + 'static,
{
    let Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => return json_rejection(rejection),
    };
    match service.create(submission).await {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn delete_handler<B>(
    State(service): State<Arc<ApplicationService<B>>>,
    Path(application_id): Path<String>,
) -> Response
where
    B: StoreBackend + 'static,
{
    match service.delete(&ApplicationId(application_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => failure_response(err),
    }
}

fn failure_response(err: ApplicationServiceError) -> Response {
    match err {
        ApplicationServiceError::Validation(failure) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, failure.to_string())
        }
        ApplicationServiceError::Store(store_err) => {
            error!(error = %store_err, "application store failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, store_err.to_string())
        }
    }
}
