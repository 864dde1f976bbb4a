use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::actors::Actor;
use crate::temporal::{deserialize_date, DateWindow};

use super::directory::ProjectDirectory;
use super::domain::{ProjectDraft, ProjectError, ProjectUpdate, UnitTrack};
use super::repository::ProjectStore;

/// Router builder exposing the project directory over HTTP.
pub fn project_router<P>(directory: Arc<ProjectDirectory<P>>) -> Router
where
    P: ProjectStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects",
            get(list_handler::<P>).post(create_handler::<P>),
        )
        .route("/api/v1/projects/viewable", post(viewable_handler::<P>))
        .route(
            "/api/v1/projects/:name",
            patch(edit_handler::<P>).delete(delete_handler::<P>),
        )
        .route(
            "/api/v1/projects/:name/visibility",
            post(visibility_handler::<P>),
        )
        .with_state(directory)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackRequest {
    units: i64,
    price: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateProjectRequest {
    owner: Actor,
    name: String,
    neighbourhood: String,
    two_room: TrackRequest,
    three_room: TrackRequest,
    #[serde(deserialize_with = "deserialize_date")]
    opens_on: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    closes_on: NaiveDate,
    officer_capacity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EditProjectRequest {
    owner: Actor,
    rename: Option<String>,
    neighbourhood: Option<String>,
    two_room: Option<TrackRequest>,
    three_room: Option<TrackRequest>,
    #[serde(default, deserialize_with = "crate::temporal::deserialize_optional_date")]
    opens_on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::temporal::deserialize_optional_date")]
    closes_on: Option<NaiveDate>,
    officer_capacity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerRequest {
    owner: Actor,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewableRequest {
    actor: Actor,
    active_project: Option<String>,
}

pub(crate) async fn create_handler<P>(
    State(directory): State<Arc<ProjectDirectory<P>>>,
    axum::Json(request): axum::Json<CreateProjectRequest>,
) -> Response
where
    P: ProjectStore + 'static,
{
    let draft = match build_draft(&request) {
        Ok(draft) => draft,
        Err(err) => return error_response(&err),
    };
    match directory.create(&request.owner, draft, Local::now().date_naive()) {
        Ok(project) => (StatusCode::CREATED, axum::Json(project.view())).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn list_handler<P>(
    State(directory): State<Arc<ProjectDirectory<P>>>,
) -> Response
where
    P: ProjectStore + 'static,
{
    match directory.all() {
        Ok(projects) => {
            let views: Vec<_> = projects.iter().map(|project| project.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn viewable_handler<P>(
    State(directory): State<Arc<ProjectDirectory<P>>>,
    axum::Json(request): axum::Json<ViewableRequest>,
) -> Response
where
    P: ProjectStore + 'static,
{
    match directory.viewable_projects(
        &request.actor,
        request.active_project.as_deref(),
        Local::now().date_naive(),
    ) {
        Ok(projects) => {
            let views: Vec<_> = projects.iter().map(|project| project.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn edit_handler<P>(
    State(directory): State<Arc<ProjectDirectory<P>>>,
    Path(name): Path<String>,
    axum::Json(request): axum::Json<EditProjectRequest>,
) -> Response
where
    P: ProjectStore + 'static,
{
    let update = match build_update(&request) {
        Ok(update) => update,
        Err(err) => return error_response(&err),
    };
    match directory.edit(&request.owner, &name, update, Local::now().date_naive()) {
        Ok(project) => (StatusCode::OK, axum::Json(project.view())).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn delete_handler<P>(
    State(directory): State<Arc<ProjectDirectory<P>>>,
    Path(name): Path<String>,
    axum::Json(request): axum::Json<OwnerRequest>,
) -> Response
where
    P: ProjectStore + 'static,
{
    match directory.delete(&request.owner, &name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn visibility_handler<P>(
    State(directory): State<Arc<ProjectDirectory<P>>>,
    Path(name): Path<String>,
    axum::Json(request): axum::Json<OwnerRequest>,
) -> Response
where
    P: ProjectStore + 'static,
{
    match directory.toggle_visibility(&request.owner, &name) {
        Ok(project) => (StatusCode::OK, axum::Json(project.view())).into_response(),
        Err(err) => error_response(&err),
    }
}

fn build_draft(request: &CreateProjectRequest) -> Result<ProjectDraft, ProjectError> {
    Ok(ProjectDraft {
        name: request.name.clone(),
        neighbourhood: request.neighbourhood.clone(),
        two_room: UnitTrack::new(request.two_room.units, request.two_room.price)?,
        three_room: UnitTrack::new(request.three_room.units, request.three_room.price)?,
        window: DateWindow::new(request.opens_on, request.closes_on),
        officer_capacity: request.officer_capacity,
    })
}

fn build_update(request: &EditProjectRequest) -> Result<ProjectUpdate, ProjectError> {
    let window = match (request.opens_on, request.closes_on) {
        (Some(opens_on), Some(closes_on)) => Some(DateWindow::new(opens_on, closes_on)),
        (None, None) => None,
        // Moving only one edge of the window is not supported over the wire.
        _ => return Err(ProjectError::InvalidRange),
    };
    Ok(ProjectUpdate {
        rename: request.rename.clone(),
        neighbourhood: request.neighbourhood.clone(),
        two_room: request
            .two_room
            .as_ref()
            .map(|track| UnitTrack::new(track.units, track.price))
            .transpose()?,
        three_room: request
            .three_room
            .as_ref()
            .map(|track| UnitTrack::new(track.units, track.price))
            .transpose()?,
        window,
        officer_capacity: request.officer_capacity,
    })
}

pub(crate) fn error_response(err: &ProjectError) -> Response {
    let status = match err {
        ProjectError::NotFound { .. } => StatusCode::NOT_FOUND,
        ProjectError::NotOwner { .. } => StatusCode::FORBIDDEN,
        ProjectError::NameConflict { .. } | ProjectError::OwnerOverlap { .. } => {
            StatusCode::CONFLICT
        }
        ProjectError::InvalidRange
        | ProjectError::CapacityOutOfRange { .. }
        | ProjectError::NegativeValue { .. }
        | ProjectError::CapacityTooSmall { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ProjectError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
