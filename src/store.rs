//! Store error contract and the reference in-memory stores.
//!
//! The engines only depend on the store traits in each workflow module; the
//! `Mutex`-guarded maps here back the server, the demo command, and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::actors::ActorId;
use crate::workflows::applications::domain::{Application, ApplicationId};
use crate::workflows::applications::repository::ApplicationStore;
use crate::workflows::projects::domain::Project;
use crate::workflows::projects::repository::ProjectStore;
use crate::workflows::registrations::domain::Registration;
use crate::workflows::registrations::repository::RegistrationStore;

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Default, Clone)]
pub struct MemoryProjectStore {
    records: Arc<Mutex<HashMap<String, Project>>>,
}

impl ProjectStore for MemoryProjectStore {
    fn insert(&self, project: Project) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("project store mutex poisoned");
        if guard.contains_key(&project.name) {
            return Err(StoreError::Conflict);
        }
        guard.insert(project.name.clone(), project);
        Ok(())
    }

    fn update(&self, project: Project) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("project store mutex poisoned");
        if !guard.contains_key(&project.name) {
            return Err(StoreError::NotFound);
        }
        guard.insert(project.name.clone(), project);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("project store mutex poisoned");
        guard.remove(name).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, name: &str) -> Result<Option<Project>, StoreError> {
        let guard = self.records.lock().expect("project store mutex poisoned");
        Ok(guard.get(name).cloned())
    }

    fn all(&self) -> Result<Vec<Project>, StoreError> {
        let guard = self.records.lock().expect("project store mutex poisoned");
        let mut projects: Vec<Project> = guard.values().cloned().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }
}

#[derive(Default)]
pub struct MemoryApplicationStore {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
    sequence: AtomicU64,
}

impl ApplicationStore for MemoryApplicationStore {
    fn next_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ApplicationId(format!("app-{id:06}"))
    }

    fn insert(&self, application: Application) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .expect("application store mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn update(&self, application: Application) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .expect("application store mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("application store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn active_for(&self, applicant: &ActorId) -> Result<Option<Application>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("application store mutex poisoned");
        Ok(guard
            .values()
            .find(|application| application.applicant == *applicant && application.is_active())
            .cloned())
    }
}

#[derive(Default, Clone)]
pub struct MemoryRegistrationStore {
    records: Arc<Mutex<HashMap<(ActorId, String), Registration>>>,
}

impl RegistrationStore for MemoryRegistrationStore {
    fn insert(&self, registration: Registration) -> Result<(), StoreError> {
        let key = (registration.officer.clone(), registration.project.clone());
        let mut guard = self
            .records
            .lock()
            .expect("registration store mutex poisoned");
        if guard.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        guard.insert(key, registration);
        Ok(())
    }

    fn update(&self, registration: Registration) -> Result<(), StoreError> {
        let key = (registration.officer.clone(), registration.project.clone());
        let mut guard = self
            .records
            .lock()
            .expect("registration store mutex poisoned");
        if !guard.contains_key(&key) {
            return Err(StoreError::NotFound);
        }
        guard.insert(key, registration);
        Ok(())
    }

    fn fetch(&self, officer: &ActorId, project: &str) -> Result<Option<Registration>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("registration store mutex poisoned");
        Ok(guard
            .get(&(officer.clone(), project.to_string()))
            .cloned())
    }

    fn for_officer(&self, officer: &ActorId) -> Result<Vec<Registration>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("registration store mutex poisoned");
        let mut rows: Vec<Registration> = guard
            .values()
            .filter(|registration| registration.officer == *officer)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.project.cmp(&b.project));
        Ok(rows)
    }

    fn for_project(&self, project: &str) -> Result<Vec<Registration>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("registration store mutex poisoned");
        let mut rows: Vec<Registration> = guard
            .values()
            .filter(|registration| registration.project == project)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.officer.cmp(&b.officer));
        Ok(rows)
    }
}
