use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::actors::{Actor, ActorId};
use crate::store::StoreError;
use crate::workflows::applications::eligibility::IntakePolicy;

use super::domain::{Project, ProjectDraft, ProjectError, ProjectUpdate};
use super::repository::ProjectStore;

/// Owns the project set: name uniqueness, owner window non-overlap, roster
/// and unit-count mutation on behalf of the engines.
pub struct ProjectDirectory<P> {
    store: Arc<P>,
    policy: IntakePolicy,
}

impl<P> ProjectDirectory<P>
where
    P: ProjectStore + 'static,
{
    pub fn new(store: Arc<P>, policy: IntakePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    pub fn all(&self) -> Result<Vec<Project>, ProjectError> {
        self.store.all().map_err(Into::into)
    }

    pub fn find(&self, name: &str) -> Result<Project, ProjectError> {
        self.store
            .fetch(name)?
            .ok_or_else(|| ProjectError::NotFound {
                name: name.to_string(),
            })
    }

    /// Write an already-validated project row back to the store. The booking
    /// routine drives this directly to control write ordering.
    pub(crate) fn persist(&self, project: Project) -> Result<(), StoreError> {
        self.store.update(project)
    }

    pub fn create(
        &self,
        owner: &Actor,
        draft: ProjectDraft,
        today: NaiveDate,
    ) -> Result<Project, ProjectError> {
        if !owner.can_manage() {
            return Err(ProjectError::NotOwner {
                name: draft.name.clone(),
            });
        }
        if !draft.window.is_valid() || draft.window.closes_on < today {
            return Err(ProjectError::InvalidRange);
        }
        if draft.officer_capacity > self.policy.max_officer_slots {
            return Err(ProjectError::CapacityOutOfRange {
                capacity: draft.officer_capacity,
                max: self.policy.max_officer_slots,
            });
        }
        if self.store.fetch(&draft.name)?.is_some() {
            return Err(ProjectError::NameConflict { name: draft.name });
        }
        self.check_owner_overlap(&owner.id, &draft.window, None, today)?;

        let project = Project {
            name: draft.name,
            neighbourhood: draft.neighbourhood,
            two_room: draft.two_room,
            three_room: draft.three_room,
            window: draft.window,
            manager: owner.id.clone(),
            officer_capacity: draft.officer_capacity,
            officers: Default::default(),
            visible: true,
        };
        self.store.insert(project.clone())?;
        info!(project = %project.name, manager = %project.manager, "project created");
        Ok(project)
    }

    pub fn edit(
        &self,
        owner: &Actor,
        name: &str,
        update: ProjectUpdate,
        today: NaiveDate,
    ) -> Result<Project, ProjectError> {
        let mut project = self.find(name)?;
        if !project.is_owned_by(&owner.id) {
            return Err(ProjectError::NotOwner {
                name: name.to_string(),
            });
        }

        if let Some(new_name) = &update.rename {
            if new_name != name && self.store.fetch(new_name)?.is_some() {
                return Err(ProjectError::NameConflict {
                    name: new_name.clone(),
                });
            }
        }

        if let Some(capacity) = update.officer_capacity {
            if capacity > self.policy.max_officer_slots {
                return Err(ProjectError::CapacityOutOfRange {
                    capacity,
                    max: self.policy.max_officer_slots,
                });
            }
            if usize::from(capacity) < project.officers.len() {
                return Err(ProjectError::CapacityTooSmall {
                    capacity,
                    roster: project.officers.len(),
                });
            }
        }

        if let Some(window) = update.window {
            if !window.is_valid() || window.closes_on < today {
                return Err(ProjectError::InvalidRange);
            }
            self.check_owner_overlap(&owner.id, &window, Some(name), today)?;
        }

        if let Some(new_name) = update.rename {
            project.name = new_name;
        }
        if let Some(neighbourhood) = update.neighbourhood {
            project.neighbourhood = neighbourhood;
        }
        if let Some(two_room) = update.two_room {
            project.two_room = two_room;
        }
        if let Some(three_room) = update.three_room {
            project.three_room = three_room;
        }
        if let Some(window) = update.window {
            project.window = window;
        }
        if let Some(capacity) = update.officer_capacity {
            project.officer_capacity = capacity;
        }

        if project.name != name {
            self.store.delete(name)?;
            self.store.insert(project.clone())?;
        } else {
            self.store.update(project.clone())?;
        }
        Ok(project)
    }

    pub fn delete(&self, owner: &Actor, name: &str) -> Result<(), ProjectError> {
        let project = self.find(name)?;
        if !project.is_owned_by(&owner.id) {
            return Err(ProjectError::NotOwner {
                name: name.to_string(),
            });
        }
        self.store.delete(name)?;
        info!(project = name, "project deleted");
        Ok(())
    }

    pub fn toggle_visibility(&self, owner: &Actor, name: &str) -> Result<Project, ProjectError> {
        let mut project = self.find(name)?;
        if !project.is_owned_by(&owner.id) {
            return Err(ProjectError::NotOwner {
                name: name.to_string(),
            });
        }
        project.visible = !project.visible;
        self.store.update(project.clone())?;
        Ok(project)
    }

    /// Roster addition for the registration engine. `Ok(false)` means the
    /// roster was full and nothing was written; the caller must abort its
    /// own transition.
    pub fn add_officer(&self, name: &str, officer: ActorId) -> Result<bool, ProjectError> {
        let mut project = self.find(name)?;
        if !project.add_officer(officer) {
            return Ok(false);
        }
        self.store.update(project)?;
        Ok(true)
    }

    pub fn remove_officer(&self, name: &str, officer: &ActorId) -> Result<(), ProjectError> {
        let mut project = self.find(name)?;
        if project.is_handled_by(officer) {
            project.remove_officer(officer);
            self.store.update(project)?;
        }
        Ok(())
    }

    /// Projects the actor may see: the one backing their current application
    /// (regardless of visibility or window), plus every active project with a
    /// track they qualify for that still has units.
    pub fn viewable_projects(
        &self,
        actor: &Actor,
        active_project: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<Project>, ProjectError> {
        let projects = self.store.all()?;
        Ok(projects
            .into_iter()
            .filter(|project| {
                if active_project == Some(project.name.as_str()) {
                    return true;
                }
                project.is_active(today) && self.policy.qualifies_for_any_track(actor, project)
            })
            .collect())
    }

    fn check_owner_overlap(
        &self,
        owner: &ActorId,
        window: &crate::temporal::DateWindow,
        exclude: Option<&str>,
        today: NaiveDate,
    ) -> Result<(), ProjectError> {
        for project in self.store.all()? {
            if Some(project.name.as_str()) == exclude {
                continue;
            }
            if project.is_owned_by(owner)
                && project.is_active(today)
                && project.window.overlaps(window)
            {
                return Err(ProjectError::OwnerOverlap {
                    existing: project.name,
                });
            }
        }
        Ok(())
    }
}
