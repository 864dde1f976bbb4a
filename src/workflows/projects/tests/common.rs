use std::sync::Arc;

use chrono::NaiveDate;

use crate::actors::{Actor, ActorId, ActorRole, MaritalStatus};
use crate::store::MemoryProjectStore;
use crate::temporal::DateWindow;
use crate::workflows::applications::eligibility::IntakePolicy;
use crate::workflows::projects::directory::ProjectDirectory;
use crate::workflows::projects::domain::{ProjectDraft, UnitTrack};

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

pub(super) fn applicant(age: u8, marital_status: MaritalStatus) -> Actor {
    Actor {
        id: ActorId(format!("S80000{age}Q")),
        name: "Applicant".to_string(),
        age,
        marital_status,
        role: ActorRole::Applicant,
    }
}

pub(super) fn draft(name: &str, window: DateWindow) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        neighbourhood: "Boon Lay".to_string(),
        two_room: UnitTrack {
            units: 10,
            price: 95_000,
        },
        three_room: UnitTrack {
            units: 15,
            price: 160_000,
        },
        window,
        officer_capacity: 5,
    }
}

pub(super) fn directory() -> (Arc<MemoryProjectStore>, ProjectDirectory<MemoryProjectStore>) {
    let store = Arc::new(MemoryProjectStore::default());
    let directory = ProjectDirectory::new(store.clone(), IntakePolicy::default());
    (store, directory)
}
