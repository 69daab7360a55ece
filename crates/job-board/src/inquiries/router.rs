use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use tracing::error;

use super::domain::InquirySubmission;
use super::service::{InquiryService, InquiryServiceError};
use crate::error::{error_response, json_rejection};
use crate::ids::InquiryId;
use crate::store::StoreBackend;

pub fn inquiry_router<B>(service: Arc<InquiryService<B>>) -> Router
where
    B: StoreBackend + 'static,
{
    Router::new()
        .route(
            "/api/v1/inquiries",
            get(list_handler::<B>).post(submit_handler::<B>),
        )
        .route("/api/v1/inquiries/:inquiry_id", delete(delete_handler::<B>))
        .with_state(service)
}

pub(crate) async fn list_handler<B>(State(service): State<Arc<InquiryService<B>>>) -> Response
where
    B: StoreBackend + 'static,
{
    match service.list().await {
        Ok(inquiries) => (StatusCode::OK, Json(inquiries)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn submit_handler<B>(
    State(service): State<Arc<InquiryService<B>>>,
    submission: Result<Json<InquirySubmission>, JsonRejection>,
) -> Response
where
    B: StoreBackend + 'static,
{
    let Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => return json_rejection(rejection),
    };
    match service.create(submission).await {
        Ok(inquiry) => (StatusCode::CREATED, Json(inquiry)).into_response(),
        Err(err) => failure_response(err),
    }
}

pub(crate) async fn delete_handler<B>(
    State(service): State<Arc<InquiryService<B>>>,
    Path(inquiry_id): Path<String>,
) -> Response
where
    B: StoreBackend + 'static,
{
    match service.delete(&InquiryId(inquiry_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => failure_response(err),
    }
}

fn failure_response(err: InquiryServiceError) -> Response {
    match err {
        InquiryServiceError::Validation(failure) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, failure.to_string())
        }
        InquiryServiceError::Store(store_err) => {
            error!(error = %store_err, "inquiry store failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, store_err.to_string())
        }
    }
}
