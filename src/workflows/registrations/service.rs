use std::sync::Arc;

use tracing::info;

use crate::actors::{Actor, ActorId};
use crate::store::StoreError;
use crate::temporal::windows_overlap;
use crate::workflows::applications::repository::ApplicationStore;
use crate::workflows::projects::directory::ProjectDirectory;
use crate::workflows::projects::domain::{Project, ProjectError};
use crate::workflows::projects::repository::ProjectStore;

use super::domain::{Registration, RegistrationStatus};
use super::repository::RegistrationStore;

/// Engine executing the registration state machine and keeping the project
/// roster in step with approvals.
pub struct RegistrationService<R, A, P> {
    registrations: Arc<R>,
    applications: Arc<A>,
    directory: Arc<ProjectDirectory<P>>,
}

/// Failures raised by registration submission and review.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("only officers may register to handle projects")]
    RoleConflict,
    #[error("a registration for this officer on project '{project}' already exists")]
    DuplicateRegistration { project: String },
    #[error("officers cannot register for project '{project}' they own")]
    SelfManaged { project: String },
    #[error("officer holds an active flat application for project '{project}'")]
    ApplicantConflict { project: String },
    #[error("officer already handles project '{existing}' over an overlapping window")]
    OverlapWithApproved { existing: String },
    #[error("project '{project}' has no officer slots remaining")]
    NoSlots { project: String },
    #[error("registration must be {expected} for this action (found {found})")]
    WrongState {
        expected: &'static str,
        found: &'static str,
    },
    #[error("only the owning manager of project '{project}' may review this registration")]
    NotOwner { project: String },
    #[error("no registration found for officer {officer} on project '{project}'")]
    NotFound { officer: ActorId, project: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationServiceError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<R, A, P> RegistrationService<R, A, P>
where
    R: RegistrationStore + 'static,
    A: ApplicationStore + 'static,
    P: ProjectStore + 'static,
{
    pub fn new(
        registrations: Arc<R>,
        applications: Arc<A>,
        directory: Arc<ProjectDirectory<P>>,
    ) -> Self {
        Self {
            registrations,
            applications,
            directory,
        }
    }

    pub fn for_project(&self, project: &str) -> Result<Vec<Registration>, RegistrationServiceError> {
        self.registrations.for_project(project).map_err(Into::into)
    }

    /// Submit a registration to help run a project.
    pub fn register(
        &self,
        officer: &Actor,
        project_name: &str,
    ) -> Result<Registration, RegistrationServiceError> {
        if !officer.can_register() {
            return Err(RegistrationError::RoleConflict.into());
        }

        let project = self.directory.find(project_name)?;

        if self
            .registrations
            .fetch(&officer.id, project_name)?
            .is_some()
        {
            return Err(RegistrationError::DuplicateRegistration {
                project: project_name.to_string(),
            }
            .into());
        }
        if project.is_owned_by(&officer.id) {
            return Err(RegistrationError::SelfManaged {
                project: project_name.to_string(),
            }
            .into());
        }
        if let Some(application) = self.applications.active_for(&officer.id)? {
            if application.project == project_name {
                return Err(RegistrationError::ApplicantConflict {
                    project: project_name.to_string(),
                }
                .into());
            }
        }
        self.check_approved_overlap(&officer.id, &project)?;

        let registration = Registration {
            officer: officer.id.clone(),
            project: project_name.to_string(),
            status: RegistrationStatus::Pending,
        };
        self.registrations.insert(registration.clone())?;
        info!(officer = %officer.id, project = project_name, "registration submitted");
        Ok(registration)
    }

    /// Approve a pending registration and place the officer on the roster.
    /// The roster write happens first; a full roster aborts the approval and
    /// the row stays pending.
    pub fn staff_approve(
        &self,
        owner: &Actor,
        officer: &ActorId,
        project_name: &str,
    ) -> Result<Registration, RegistrationServiceError> {
        let (mut registration, project) = self.fetch_for_owner(owner, officer, project_name)?;
        if registration.status != RegistrationStatus::Pending {
            return Err(RegistrationError::WrongState {
                expected: RegistrationStatus::Pending.label(),
                found: registration.status.label(),
            }
            .into());
        }
        if project.officers.len() >= usize::from(project.officer_capacity) {
            return Err(RegistrationError::NoSlots {
                project: project_name.to_string(),
            }
            .into());
        }
        self.check_approved_overlap(officer, &project)?;

        if !self.directory.add_officer(project_name, officer.clone())? {
            return Err(RegistrationError::NoSlots {
                project: project_name.to_string(),
            }
            .into());
        }

        registration.status = RegistrationStatus::Approved;
        if let Err(err) = self.registrations.update(registration.clone()) {
            self.directory.remove_officer(project_name, officer)?;
            return Err(err.into());
        }
        info!(officer = %officer, project = project_name, "registration approved");
        Ok(registration)
    }

    /// Reject a pending registration, scrubbing the officer from the roster
    /// if an earlier flow left them there.
    pub fn staff_reject(
        &self,
        owner: &Actor,
        officer: &ActorId,
        project_name: &str,
    ) -> Result<Registration, RegistrationServiceError> {
        let (mut registration, project) = self.fetch_for_owner(owner, officer, project_name)?;
        if registration.status != RegistrationStatus::Pending {
            return Err(RegistrationError::WrongState {
                expected: RegistrationStatus::Pending.label(),
                found: registration.status.label(),
            }
            .into());
        }

        if project.is_handled_by(officer) {
            self.directory.remove_officer(project_name, officer)?;
        }
        registration.status = RegistrationStatus::Rejected;
        self.registrations.update(registration.clone())?;
        info!(officer = %officer, project = project_name, "registration rejected");
        Ok(registration)
    }

    /// A registration conflicts when the officer already has an approved row
    /// whose project window overlaps the target's. Projects deleted from
    /// under their registrations are skipped.
    fn check_approved_overlap(
        &self,
        officer: &ActorId,
        target: &Project,
    ) -> Result<(), RegistrationServiceError> {
        for registration in self.registrations.for_officer(officer)? {
            if registration.status != RegistrationStatus::Approved
                || registration.project == target.name
            {
                continue;
            }
            let other = match self.directory.find(&registration.project) {
                Ok(project) => project,
                Err(ProjectError::NotFound { .. }) => continue,
                Err(err) => return Err(err.into()),
            };
            if windows_overlap(Some(&other.window), Some(&target.window)) {
                return Err(RegistrationError::OverlapWithApproved {
                    existing: registration.project,
                }
                .into());
            }
        }
        Ok(())
    }

    fn fetch_for_owner(
        &self,
        owner: &Actor,
        officer: &ActorId,
        project_name: &str,
    ) -> Result<(Registration, Project), RegistrationServiceError> {
        let registration = self
            .registrations
            .fetch(officer, project_name)?
            .ok_or_else(|| RegistrationError::NotFound {
                officer: officer.clone(),
                project: project_name.to_string(),
            })?;
        let project = self.directory.find(project_name)?;
        if !project.is_owned_by(&owner.id) {
            return Err(RegistrationError::NotOwner {
                project: project_name.to_string(),
            }
            .into());
        }
        Ok((registration, project))
    }
}
