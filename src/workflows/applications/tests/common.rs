use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::actors::{Actor, ActorId, ActorRole, MaritalStatus};
use crate::store::{
    MemoryApplicationStore, MemoryProjectStore, MemoryRegistrationStore, StoreError,
};
use crate::temporal::DateWindow;
use crate::workflows::applications::domain::{Application, ApplicationId, ApplicationStatus};
use crate::workflows::applications::eligibility::IntakePolicy;
use crate::workflows::applications::repository::ApplicationStore;
use crate::workflows::applications::service::ApplicationService;
use crate::workflows::projects::directory::ProjectDirectory;
use crate::workflows::projects::domain::{FlatType, Project, ProjectDraft, UnitTrack};
use crate::workflows::projects::repository::ProjectStore;
use crate::workflows::registrations::domain::{Registration, RegistrationStatus};
use crate::workflows::registrations::repository::RegistrationStore;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 15).expect("valid date")
}

pub(super) fn open_window() -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid"),
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid"),
    )
}

pub(super) fn manager() -> Actor {
    Actor {
        id: ActorId("T1234567H".to_string()),
        name: "Manager Lee".to_string(),
        age: 45,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Manager,
    }
}

pub(super) fn other_manager() -> Actor {
    Actor {
        id: ActorId("T7654321D".to_string()),
        name: "Manager Ong".to_string(),
        age: 50,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Manager,
    }
}

pub(super) fn officer() -> Actor {
    Actor {
        id: ActorId("S7654321B".to_string()),
        name: "Officer Tan".to_string(),
        age: 30,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Officer,
    }
}

pub(super) fn applicant(age: u8, marital_status: MaritalStatus) -> Actor {
    Actor {
        id: ActorId(format!("S900000{age}Z")),
        name: "Applicant Lim".to_string(),
        age,
        marital_status,
        role: ActorRole::Applicant,
    }
}

pub(super) fn draft(name: &str, two_room_units: u32, three_room_units: u32) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        neighbourhood: "Yishun".to_string(),
        two_room: UnitTrack {
            units: two_room_units,
            price: 110_000,
        },
        three_room: UnitTrack {
            units: three_room_units,
            price: 180_000,
        },
        window: open_window(),
        officer_capacity: 5,
    }
}

pub(super) struct World {
    pub(super) projects: Arc<MemoryProjectStore>,
    pub(super) applications: Arc<MemoryApplicationStore>,
    pub(super) registrations: Arc<MemoryRegistrationStore>,
    pub(super) directory: Arc<ProjectDirectory<MemoryProjectStore>>,
    pub(super) service:
        ApplicationService<MemoryApplicationStore, MemoryRegistrationStore, MemoryProjectStore>,
}

pub(super) fn world() -> World {
    let projects = Arc::new(MemoryProjectStore::default());
    let applications = Arc::new(MemoryApplicationStore::default());
    let registrations = Arc::new(MemoryRegistrationStore::default());
    let directory = Arc::new(ProjectDirectory::new(
        projects.clone(),
        IntakePolicy::default(),
    ));
    let service = ApplicationService::new(
        applications.clone(),
        registrations.clone(),
        directory.clone(),
    );
    World {
        projects,
        applications,
        registrations,
        directory,
        service,
    }
}

/// Seed a project owned by the default manager and return it.
pub(super) fn seed_project(world: &World, name: &str, two: u32, three: u32) -> Project {
    seed_project_owned(world, &manager(), name, two, three)
}

pub(super) fn seed_project_owned(
    world: &World,
    owner: &Actor,
    name: &str,
    two: u32,
    three: u32,
) -> Project {
    world
        .directory
        .create(owner, draft(name, two, three), today())
        .expect("project creates")
}

pub(super) fn seed_registration(world: &World, officer: &Actor, project: &str) {
    world
        .registrations
        .insert(Registration {
            officer: officer.id.clone(),
            project: project.to_string(),
            status: RegistrationStatus::Pending,
        })
        .expect("registration inserts");
}

/// Put an officer straight onto the roster so booking preconditions hold.
pub(super) fn rostered_officer(world: &World, project: &str) -> Actor {
    let officer = officer();
    world
        .directory
        .add_officer(project, officer.id.clone())
        .expect("roster mutation succeeds");
    officer
}

pub(super) fn stored_application(world: &World, id: &ApplicationId) -> Application {
    world
        .applications
        .fetch(id)
        .expect("fetch succeeds")
        .expect("application present")
}

pub(super) fn remaining(world: &World, project: &str, flat_type: FlatType) -> u32 {
    world
        .projects
        .fetch(project)
        .expect("fetch succeeds")
        .expect("project present")
        .remaining(flat_type)
}

/// Drive an application to the successful state, with the officer rostered.
pub(super) fn successful_application(
    world: &World,
    project: &str,
) -> (Application, Actor) {
    let handler = rostered_officer(world, project);
    let application = world
        .service
        .apply(
            &applicant(25, MaritalStatus::Married),
            project,
            FlatType::ThreeRoom,
            today(),
        )
        .expect("apply succeeds");
    world
        .service
        .staff_approve(&manager(), &application.id)
        .expect("approval succeeds");
    let application = stored_application(world, &application.id);
    assert_eq!(application.status, ApplicationStatus::Successful);
    (application, handler)
}

/// Project store double whose `update` starts failing once its budget is
/// spent. `usize::MAX` means never fail.
pub(super) struct FlakyProjectStore {
    inner: MemoryProjectStore,
    allowed_updates: AtomicUsize,
}

impl FlakyProjectStore {
    pub(super) fn unlimited() -> Self {
        Self {
            inner: MemoryProjectStore::default(),
            allowed_updates: AtomicUsize::new(usize::MAX),
        }
    }

    pub(super) fn allow_updates(&self, budget: usize) {
        self.allowed_updates.store(budget, Ordering::SeqCst);
    }
}

impl ProjectStore for FlakyProjectStore {
    fn insert(&self, project: Project) -> Result<(), StoreError> {
        self.inner.insert(project)
    }

    fn update(&self, project: Project) -> Result<(), StoreError> {
        let budget = self.allowed_updates.load(Ordering::SeqCst);
        if budget == 0 {
            return Err(StoreError::Unavailable("project store offline".to_string()));
        }
        if budget != usize::MAX {
            self.allowed_updates.store(budget - 1, Ordering::SeqCst);
        }
        self.inner.update(project)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.inner.delete(name)
    }

    fn fetch(&self, name: &str) -> Result<Option<Project>, StoreError> {
        self.inner.fetch(name)
    }

    fn all(&self) -> Result<Vec<Project>, StoreError> {
        self.inner.all()
    }
}

/// Application store double that can be told to refuse updates.
pub(super) struct FlakyApplicationStore {
    inner: MemoryApplicationStore,
    fail_updates: AtomicBool,
}

impl FlakyApplicationStore {
    pub(super) fn reliable() -> Self {
        Self {
            inner: MemoryApplicationStore::default(),
            fail_updates: AtomicBool::new(false),
        }
    }

    pub(super) fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

impl ApplicationStore for FlakyApplicationStore {
    fn next_id(&self) -> ApplicationId {
        self.inner.next_id()
    }

    fn insert(&self, application: Application) -> Result<(), StoreError> {
        self.inner.insert(application)
    }

    fn update(&self, application: Application) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "application store offline".to_string(),
            ));
        }
        self.inner.update(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        self.inner.fetch(id)
    }

    fn active_for(&self, applicant: &ActorId) -> Result<Option<Application>, StoreError> {
        self.inner.active_for(applicant)
    }
}

pub(super) struct FlakyWorld {
    pub(super) projects: Arc<FlakyProjectStore>,
    pub(super) applications: Arc<FlakyApplicationStore>,
    pub(super) directory: Arc<ProjectDirectory<FlakyProjectStore>>,
    pub(super) service:
        ApplicationService<FlakyApplicationStore, MemoryRegistrationStore, FlakyProjectStore>,
}

pub(super) fn flaky_world() -> FlakyWorld {
    let projects = Arc::new(FlakyProjectStore::unlimited());
    let applications = Arc::new(FlakyApplicationStore::reliable());
    let registrations = Arc::new(MemoryRegistrationStore::default());
    let directory = Arc::new(ProjectDirectory::new(
        projects.clone(),
        IntakePolicy::default(),
    ));
    let service = ApplicationService::new(applications.clone(), registrations, directory.clone());
    FlakyWorld {
        projects,
        applications,
        directory,
        service,
    }
}
