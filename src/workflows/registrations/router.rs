use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::actors::{Actor, ActorId};
use crate::workflows::applications::repository::ApplicationStore;
use crate::workflows::projects::repository::ProjectStore;

use super::repository::RegistrationStore;
use super::service::{RegistrationError, RegistrationService, RegistrationServiceError};

/// Router builder exposing officer registration over HTTP.
pub fn registration_router<R, A, P>(service: Arc<RegistrationService<R, A, P>>) -> Router
where
    R: RegistrationStore + 'static,
    A: ApplicationStore + 'static,
    P: ProjectStore + 'static,
{
    Router::new()
        .route("/api/v1/registrations", post(register_handler::<R, A, P>))
        .route(
            "/api/v1/registrations/review",
            post(review_handler::<R, A, P>),
        )
        .route(
            "/api/v1/registrations/:project",
            get(list_handler::<R, A, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    officer: Actor,
    project: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RegistrationDecision {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationReviewRequest {
    owner: Actor,
    officer_id: String,
    project: String,
    decision: RegistrationDecision,
}

pub(crate) async fn register_handler<R, A, P>(
    State(service): State<Arc<RegistrationService<R, A, P>>>,
    axum::Json(request): axum::Json<RegisterRequest>,
) -> Response
where
    R: RegistrationStore + 'static,
    A: ApplicationStore + 'static,
    P: ProjectStore + 'static,
{
    match service.register(&request.officer, &request.project) {
        Ok(registration) => {
            (StatusCode::ACCEPTED, axum::Json(registration.status_view())).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn review_handler<R, A, P>(
    State(service): State<Arc<RegistrationService<R, A, P>>>,
    axum::Json(request): axum::Json<RegistrationReviewRequest>,
) -> Response
where
    R: RegistrationStore + 'static,
    A: ApplicationStore + 'static,
    P: ProjectStore + 'static,
{
    let officer = ActorId(request.officer_id.clone());
    let result = match request.decision {
        RegistrationDecision::Approve => {
            service.staff_approve(&request.owner, &officer, &request.project)
        }
        RegistrationDecision::Reject => {
            service.staff_reject(&request.owner, &officer, &request.project)
        }
    };
    match result {
        Ok(registration) => (StatusCode::OK, axum::Json(registration.status_view())).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn list_handler<R, A, P>(
    State(service): State<Arc<RegistrationService<R, A, P>>>,
    Path(project): Path<String>,
) -> Response
where
    R: RegistrationStore + 'static,
    A: ApplicationStore + 'static,
    P: ProjectStore + 'static,
{
    match service.for_project(&project) {
        Ok(registrations) => {
            let views: Vec<_> = registrations
                .iter()
                .map(|registration| registration.status_view())
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub(crate) fn error_response(err: &RegistrationServiceError) -> Response {
    let status = match err {
        RegistrationServiceError::Registration(registration) => match registration {
            RegistrationError::RoleConflict
            | RegistrationError::SelfManaged { .. }
            | RegistrationError::NotOwner { .. } => StatusCode::FORBIDDEN,
            RegistrationError::DuplicateRegistration { .. }
            | RegistrationError::WrongState { .. }
            | RegistrationError::NoSlots { .. } => StatusCode::CONFLICT,
            RegistrationError::ApplicantConflict { .. }
            | RegistrationError::OverlapWithApproved { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RegistrationError::NotFound { .. } => StatusCode::NOT_FOUND,
        },
        RegistrationServiceError::Project(project) => {
            return crate::workflows::projects::router::error_response(project)
        }
        RegistrationServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
