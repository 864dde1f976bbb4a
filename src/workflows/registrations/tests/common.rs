use std::sync::Arc;

use chrono::NaiveDate;

use crate::actors::{Actor, ActorId, ActorRole, MaritalStatus};
use crate::store::{MemoryApplicationStore, MemoryProjectStore, MemoryRegistrationStore};
use crate::temporal::DateWindow;
use crate::workflows::applications::eligibility::IntakePolicy;
use crate::workflows::projects::directory::ProjectDirectory;
use crate::workflows::projects::domain::{Project, ProjectDraft, UnitTrack};
use crate::workflows::registrations::service::RegistrationService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 15).expect("valid date")
}

pub(super) fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, day).expect("valid date")
}

pub(super) fn manager(id: &str) -> Actor {
    Actor {
        id: ActorId(id.to_string()),
        name: "Manager".to_string(),
        age: 45,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Manager,
    }
}

pub(super) fn officer(id: &str) -> Actor {
    Actor {
        id: ActorId(id.to_string()),
        name: "Officer".to_string(),
        age: 30,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Officer,
    }
}

pub(super) struct World {
    pub(super) applications: Arc<MemoryApplicationStore>,
    pub(super) directory: Arc<ProjectDirectory<MemoryProjectStore>>,
    pub(super) service:
        RegistrationService<MemoryRegistrationStore, MemoryApplicationStore, MemoryProjectStore>,
}

pub(super) fn world() -> World {
    let projects = Arc::new(MemoryProjectStore::default());
    let applications = Arc::new(MemoryApplicationStore::default());
    let registrations = Arc::new(MemoryRegistrationStore::default());
    let directory = Arc::new(ProjectDirectory::new(projects, IntakePolicy::default()));
    let service = RegistrationService::new(registrations, applications.clone(), directory.clone());
    World {
        applications,
        directory,
        service,
    }
}

pub(super) fn seed_project(
    world: &World,
    owner: &Actor,
    name: &str,
    window: DateWindow,
    officer_capacity: u8,
) -> Project {
    world
        .directory
        .create(
            owner,
            ProjectDraft {
                name: name.to_string(),
                neighbourhood: "Tampines".to_string(),
                two_room: UnitTrack {
                    units: 12,
                    price: 100_000,
                },
                three_room: UnitTrack {
                    units: 16,
                    price: 170_000,
                },
                window,
                officer_capacity,
            },
            today(),
        )
        .expect("project creates")
}
