//! The booking transaction: the only operation that mutates two entities.
//!
//! No transactional storage exists, so the write order is the contract:
//! the project (unit count) is persisted before the application row, and a
//! failed application write is undone by incrementing the unit back and
//! re-persisting the project. Swapping the order would change which entity
//! can be left wrong after a partial failure.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::actors::Actor;
use crate::store::StoreError;
use crate::workflows::projects::directory::ProjectDirectory;
use crate::workflows::projects::domain::ProjectError;
use crate::workflows::projects::repository::ProjectStore;

use super::domain::{Application, ApplicationStatus};
use super::repository::ApplicationStore;

/// Booking result. Running out of units is a reported business outcome; the
/// application is marked unsuccessful and nothing needs rolling back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    Booked { application: Application },
    NoUnitsLeft { application: Application },
}

impl BookingOutcome {
    pub fn application(&self) -> &Application {
        match self {
            Self::Booked { application } | Self::NoUnitsLeft { application } => application,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Booked { application } => format!(
                "booked one {} unit in '{}'",
                application.flat_type.label(),
                application.project
            ),
            Self::NoUnitsLeft { application } => format!(
                "booking failed: no {} units left in '{}'; application marked unsuccessful",
                application.flat_type.label(),
                application.project
            ),
        }
    }
}

/// Failures raised by the booking transaction.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("only a roster officer of project '{project}' may book this application")]
    NotHandler { project: String },
    #[error("application must be in the {required} state to book (found {found})")]
    WrongState {
        required: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error("persistence failed before the booking was recorded: {0}")]
    PersistenceFailed(StoreError),
    #[error("booking partially failed: the unit was taken but the application write failed; {}",
        if *compensated {
            "the unit count was restored"
        } else {
            "compensation also failed and the project and application stores now disagree"
        })]
    PartialFailure { compensated: bool },
}

pub(crate) fn execute<A, P>(
    directory: &ProjectDirectory<P>,
    applications: &A,
    officer: &Actor,
    mut application: Application,
) -> Result<BookingOutcome, BookingError>
where
    A: ApplicationStore + 'static,
    P: ProjectStore + 'static,
{
    let mut project = directory.find(&application.project)?;

    if !project.is_handled_by(&officer.id) {
        return Err(BookingError::NotHandler {
            project: application.project,
        });
    }
    if application.status != ApplicationStatus::Successful {
        return Err(BookingError::WrongState {
            required: ApplicationStatus::Successful.label(),
            found: application.status.label(),
        });
    }

    let flat_type = application.flat_type;
    if project.remaining(flat_type) == 0 {
        application.status = ApplicationStatus::Unsuccessful;
        applications
            .update(application.clone())
            .map_err(BookingError::PersistenceFailed)?;
        info!(application = %application.id, "booking refused: track exhausted");
        return Ok(BookingOutcome::NoUnitsLeft { application });
    }

    project.track_mut(flat_type).units -= 1;
    application.status = ApplicationStatus::Booked;

    directory
        .persist(project.clone())
        .map_err(BookingError::PersistenceFailed)?;

    if let Err(err) = applications.update(application.clone()) {
        project.track_mut(flat_type).units += 1;
        match directory.persist(project) {
            Ok(()) => {
                warn!(application = %application.id, %err, "application write failed; unit restored");
                return Err(BookingError::PartialFailure { compensated: true });
            }
            Err(compensation_err) => {
                error!(
                    application = %application.id,
                    %err,
                    %compensation_err,
                    "compensation failed: project and application stores disagree"
                );
                return Err(BookingError::PartialFailure { compensated: false });
            }
        }
    }

    info!(
        application = %application.id,
        project = %application.project,
        flat_type = flat_type.label(),
        "unit booked"
    );
    Ok(BookingOutcome::Booked { application })
}
