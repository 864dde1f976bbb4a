use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::actors::Actor;
use crate::store::StoreError;
use crate::workflows::projects::directory::ProjectDirectory;
use crate::workflows::projects::domain::{FlatType, Project, ProjectError};
use crate::workflows::projects::repository::ProjectStore;
use crate::workflows::registrations::repository::RegistrationStore;

use super::booking::{self, BookingError, BookingOutcome};
use super::domain::{Application, ApplicationId, ApplicationStatus};
use super::eligibility::EligibilityError;
use super::repository::ApplicationStore;

/// Engine executing the application state machine on top of the project
/// directory and the store contracts.
pub struct ApplicationService<A, R, P> {
    applications: Arc<A>,
    registrations: Arc<R>,
    directory: Arc<ProjectDirectory<P>>,
}

/// State and ownership failures raised by application transitions.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("application must be {expected} for this action (found {found})")]
    WrongState {
        expected: &'static str,
        found: &'static str,
    },
    #[error("withdrawal already requested for this application")]
    AlreadyRequested,
    #[error("no withdrawal request is pending on this application")]
    NoWithdrawalPending,
    #[error("a withdrawal request is pending; resolve it before review")]
    WithdrawalPending,
    #[error("only the owning manager of project '{project}' may review this application")]
    NotOwner { project: String },
    #[error("application {id} not found")]
    NotFound { id: ApplicationId },
}

/// Error raised by the application engine.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    State(#[from] ApplicationError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Review result: approval, or the reported auto-rejection taken when the
/// requested track ran out before review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReviewOutcome {
    Approved { application: Application },
    AutoRejected { application: Application },
}

impl ReviewOutcome {
    pub fn application(&self) -> &Application {
        match self {
            Self::Approved { application } | Self::AutoRejected { application } => application,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Approved { .. } => "application approved".to_string(),
            Self::AutoRejected { application } => format!(
                "auto-rejected: no {} units remained at review time",
                application.flat_type.label()
            ),
        }
    }
}

impl<A, R, P> ApplicationService<A, R, P>
where
    A: ApplicationStore + 'static,
    R: RegistrationStore + 'static,
    P: ProjectStore + 'static,
{
    pub fn new(
        applications: Arc<A>,
        registrations: Arc<R>,
        directory: Arc<ProjectDirectory<P>>,
    ) -> Self {
        Self {
            applications,
            registrations,
            directory,
        }
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.fetch(id)
    }

    /// Submit a new application after running the eligibility predicates.
    pub fn apply(
        &self,
        actor: &Actor,
        project_name: &str,
        flat_type: FlatType,
        today: NaiveDate,
    ) -> Result<Application, ApplicationServiceError> {
        if !actor.can_apply() {
            return Err(EligibilityError::RoleConflict.into());
        }

        let project = self.directory.find(project_name)?;
        if !project.is_active(today) {
            return Err(EligibilityError::WindowClosed {
                project: project_name.to_string(),
            }
            .into());
        }

        if let Some(existing) = self.applications.active_for(&actor.id)? {
            return Err(EligibilityError::DuplicateActive {
                application_id: existing.id,
            }
            .into());
        }

        self.directory.policy().check_track(actor, flat_type)?;

        if project.remaining(flat_type) == 0 {
            return Err(EligibilityError::NoUnits { flat_type }.into());
        }

        if self
            .registrations
            .fetch(&actor.id, project_name)?
            .is_some()
        {
            return Err(EligibilityError::OfficerConflict {
                project: project_name.to_string(),
            }
            .into());
        }

        let application = Application {
            id: self.applications.next_id(),
            applicant: actor.id.clone(),
            project: project_name.to_string(),
            flat_type,
            status: ApplicationStatus::Pending,
            withdrawal_requested: false,
        };
        self.applications.insert(application.clone())?;
        info!(application = %application.id, project = project_name, "application submitted");
        Ok(application)
    }

    /// Flag an application for withdrawal; the status is untouched until a
    /// manager rules on the request.
    pub fn request_withdrawal(
        &self,
        id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self.fetch(id)?;
        if application.status.is_terminal() {
            return Err(ApplicationError::WrongState {
                expected: "pending, successful, or booked",
                found: application.status.label(),
            }
            .into());
        }
        if application.withdrawal_requested {
            return Err(ApplicationError::AlreadyRequested.into());
        }
        application.withdrawal_requested = true;
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// Manager review of a pending application. Running out of units before
    /// review is an auto-rejection outcome, not an error.
    pub fn staff_approve(
        &self,
        owner: &Actor,
        id: &ApplicationId,
    ) -> Result<ReviewOutcome, ApplicationServiceError> {
        let (mut application, project) = self.fetch_for_owner(owner, id)?;
        if application.status != ApplicationStatus::Pending {
            return Err(ApplicationError::WrongState {
                expected: "pending",
                found: application.status.label(),
            }
            .into());
        }
        if application.withdrawal_requested {
            return Err(ApplicationError::WithdrawalPending.into());
        }

        if project.remaining(application.flat_type) == 0 {
            application.status = ApplicationStatus::Unsuccessful;
            self.applications.update(application.clone())?;
            info!(application = %application.id, "application auto-rejected: track exhausted");
            return Ok(ReviewOutcome::AutoRejected { application });
        }

        application.status = ApplicationStatus::Successful;
        self.applications.update(application.clone())?;
        Ok(ReviewOutcome::Approved { application })
    }

    pub fn staff_reject(
        &self,
        owner: &Actor,
        id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        let (mut application, _) = self.fetch_for_owner(owner, id)?;
        if application.status != ApplicationStatus::Pending {
            return Err(ApplicationError::WrongState {
                expected: "pending",
                found: application.status.label(),
            }
            .into());
        }
        application.status = ApplicationStatus::Unsuccessful;
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// Grant a withdrawal: terminal from any state, and a booked unit goes
    /// back to its track before the application row is rewritten.
    pub fn staff_approve_withdrawal(
        &self,
        owner: &Actor,
        id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        let (mut application, mut project) = self.fetch_for_owner(owner, id)?;
        if !application.withdrawal_requested {
            return Err(ApplicationError::NoWithdrawalPending.into());
        }

        let was_booked = application.status == ApplicationStatus::Booked;
        application.status = ApplicationStatus::Unsuccessful;
        application.withdrawal_requested = false;

        if was_booked {
            project.track_mut(application.flat_type).units += 1;
            self.directory.persist(project)?;
        }
        self.applications.update(application.clone())?;
        info!(application = %application.id, restored_unit = was_booked, "withdrawal approved");
        Ok(application)
    }

    pub fn staff_reject_withdrawal(
        &self,
        owner: &Actor,
        id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        let (mut application, _) = self.fetch_for_owner(owner, id)?;
        if !application.withdrawal_requested {
            return Err(ApplicationError::NoWithdrawalPending.into());
        }
        application.withdrawal_requested = false;
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// Convert a successful application into a unit booking. See the booking
    /// module for the write-ordering contract.
    pub fn book(
        &self,
        officer: &Actor,
        id: &ApplicationId,
    ) -> Result<BookingOutcome, ApplicationServiceError> {
        let application = self.fetch(id)?;
        booking::execute(
            self.directory.as_ref(),
            self.applications.as_ref(),
            officer,
            application,
        )
        .map_err(Into::into)
    }

    /// Directory listing scoped to this actor, resolving their current
    /// application first so its project stays visible to them.
    pub fn viewable_projects(
        &self,
        actor: &Actor,
        today: NaiveDate,
    ) -> Result<Vec<Project>, ApplicationServiceError> {
        let active = self.applications.active_for(&actor.id)?;
        let active_project = active.as_ref().map(|application| application.project.as_str());
        self.directory
            .viewable_projects(actor, active_project, today)
            .map_err(Into::into)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.applications
            .fetch(id)?
            .ok_or_else(|| ApplicationError::NotFound { id: id.clone() }.into())
    }

    fn fetch_for_owner(
        &self,
        owner: &Actor,
        id: &ApplicationId,
    ) -> Result<(Application, Project), ApplicationServiceError> {
        let application = self.fetch(id)?;
        let project = self.directory.find(&application.project)?;
        if !project.is_owned_by(&owner.id) {
            return Err(ApplicationError::NotOwner {
                project: application.project,
            }
            .into());
        }
        Ok((application, project))
    }
}
