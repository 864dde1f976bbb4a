use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use crate::actors::Actor;
use crate::workflows::projects::repository::ProjectStore;
use crate::workflows::registrations::repository::RegistrationStore;

use super::booking::BookingError;
use super::domain::{ApplicationId, ApplicationStatusView};
use super::eligibility::EligibilityError;
use super::repository::ApplicationStore;
use super::service::{ApplicationError, ApplicationService, ApplicationServiceError};

/// Router builder exposing application intake and transitions over HTTP.
pub fn application_router<A, R, P>(service: Arc<ApplicationService<A, R, P>>) -> Router
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(apply_handler::<A, R, P>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<A, R, P>),
        )
        .route(
            "/api/v1/applications/:application_id/withdrawal-requests",
            post(withdrawal_request_handler::<A, R, P>),
        )
        .route(
            "/api/v1/applications/:application_id/review",
            post(review_handler::<A, R, P>),
        )
        .route(
            "/api/v1/applications/:application_id/withdrawal-review",
            post(withdrawal_review_handler::<A, R, P>),
        )
        .route(
            "/api/v1/applications/:application_id/booking",
            post(booking_handler::<A, R, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    actor: Actor,
    project: String,
    flat_type: crate::workflows::projects::domain::FlatType,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReviewDecision {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    owner: Actor,
    decision: ReviewDecision,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookingRequest {
    officer: Actor,
}

pub(crate) async fn apply_handler<A, R, P>(
    State(service): State<Arc<ApplicationService<A, R, P>>>,
    axum::Json(request): axum::Json<ApplyRequest>,
) -> Response
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    match service.apply(
        &request.actor,
        &request.project,
        request.flat_type,
        Local::now().date_naive(),
    ) {
        Ok(application) => {
            (StatusCode::ACCEPTED, axum::Json(application.status_view())).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn status_handler<A, R, P>(
    State(service): State<Arc<ApplicationService<A, R, P>>>,
    Path(application_id): Path<String>,
) -> Response
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(application) => view_response(StatusCode::OK, application.status_view()),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn withdrawal_request_handler<A, R, P>(
    State(service): State<Arc<ApplicationService<A, R, P>>>,
    Path(application_id): Path<String>,
) -> Response
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.request_withdrawal(&id) {
        Ok(application) => view_response(StatusCode::OK, application.status_view()),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn review_handler<A, R, P>(
    State(service): State<Arc<ApplicationService<A, R, P>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    let id = ApplicationId(application_id);
    match request.decision {
        ReviewDecision::Approve => match service.staff_approve(&request.owner, &id) {
            Ok(outcome) => {
                let payload = json!({
                    "summary": outcome.summary(),
                    "application": outcome.application().status_view(),
                });
                (StatusCode::OK, axum::Json(payload)).into_response()
            }
            Err(err) => error_response(&err),
        },
        ReviewDecision::Reject => match service.staff_reject(&request.owner, &id) {
            Ok(application) => view_response(StatusCode::OK, application.status_view()),
            Err(err) => error_response(&err),
        },
    }
}

pub(crate) async fn withdrawal_review_handler<A, R, P>(
    State(service): State<Arc<ApplicationService<A, R, P>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    let id = ApplicationId(application_id);
    let result = match request.decision {
        ReviewDecision::Approve => service.staff_approve_withdrawal(&request.owner, &id),
        ReviewDecision::Reject => service.staff_reject_withdrawal(&request.owner, &id),
    };
    match result {
        Ok(application) => view_response(StatusCode::OK, application.status_view()),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn booking_handler<A, R, P>(
    State(service): State<Arc<ApplicationService<A, R, P>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<BookingRequest>,
) -> Response
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.book(&request.officer, &id) {
        Ok(outcome) => {
            let payload = json!({
                "summary": outcome.summary(),
                "application": outcome.application().status_view(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

fn view_response(status: StatusCode, view: ApplicationStatusView) -> Response {
    (status, axum::Json(view)).into_response()
}

pub(crate) fn error_response(err: &ApplicationServiceError) -> Response {
    let status = match err {
        ApplicationServiceError::Eligibility(eligibility) => match eligibility {
            EligibilityError::RoleConflict => StatusCode::FORBIDDEN,
            EligibilityError::DuplicateActive { .. } => StatusCode::CONFLICT,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        },
        ApplicationServiceError::State(state) => match state {
            ApplicationError::NotOwner { .. } => StatusCode::FORBIDDEN,
            ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::CONFLICT,
        },
        ApplicationServiceError::Booking(booking) => match booking {
            BookingError::NotHandler { .. } => StatusCode::FORBIDDEN,
            BookingError::WrongState { .. } => StatusCode::CONFLICT,
            BookingError::Project(project) => {
                return crate::workflows::projects::router::error_response(project)
            }
            BookingError::PersistenceFailed(_) | BookingError::PartialFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        ApplicationServiceError::Project(project) => {
            return crate::workflows::projects::router::error_response(project)
        }
        ApplicationServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
