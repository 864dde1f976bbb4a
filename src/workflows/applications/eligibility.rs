//! Eligibility predicates for flat applications.
//!
//! The policy dials are data so deployments can tune thresholds through
//! configuration; the defaults match the published scheme: singles from 35
//! restricted to 2-room flats, married couples from 21 on either track.

use serde::{Deserialize, Serialize};

use crate::actors::{Actor, MaritalStatus};
use crate::workflows::applications::domain::ApplicationId;
use crate::workflows::projects::domain::{FlatType, Project};

/// Threshold configuration consumed by the application and project engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakePolicy {
    pub single_min_age: u8,
    pub married_min_age: u8,
    pub max_officer_slots: u8,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            single_min_age: 35,
            married_min_age: 21,
            max_officer_slots: 10,
        }
    }
}

impl IntakePolicy {
    pub fn minimum_age(&self, status: MaritalStatus) -> u8 {
        match status {
            MaritalStatus::Single => self.single_min_age,
            MaritalStatus::Married => self.married_min_age,
        }
    }

    pub fn permitted_tracks(&self, status: MaritalStatus) -> &'static [FlatType] {
        match status {
            MaritalStatus::Single => &[FlatType::TwoRoom],
            MaritalStatus::Married => &[FlatType::TwoRoom, FlatType::ThreeRoom],
        }
    }

    /// Age and marital checks for one requested track.
    pub fn check_track(&self, actor: &Actor, flat_type: FlatType) -> Result<(), EligibilityError> {
        let minimum = self.minimum_age(actor.marital_status);
        if actor.age < minimum {
            return Err(EligibilityError::AgeIneligible {
                minimum,
                status: actor.marital_status,
            });
        }

        let permitted = self.permitted_tracks(actor.marital_status);
        if permitted.is_empty() {
            return Err(EligibilityError::MaritalIneligible {
                status: actor.marital_status,
            });
        }
        if !permitted.contains(&flat_type) {
            return Err(EligibilityError::FlatTypeIneligible { flat_type });
        }

        Ok(())
    }

    /// True when at least one permitted track still has units. Drives the
    /// viewable-project listing.
    pub fn qualifies_for_any_track(&self, actor: &Actor, project: &Project) -> bool {
        if actor.age < self.minimum_age(actor.marital_status) {
            return false;
        }
        self.permitted_tracks(actor.marital_status)
            .iter()
            .any(|flat_type| project.remaining(*flat_type) > 0)
    }
}

/// Reasons an actor does not qualify for a submission.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("managers cannot apply for flats")]
    RoleConflict,
    #[error("project '{project}' is not currently accepting applications")]
    WindowClosed { project: String },
    #[error("applicant already holds active application {application_id}")]
    DuplicateActive { application_id: ApplicationId },
    #[error("applicant must be at least {minimum} to apply as {}", status.label())]
    AgeIneligible { minimum: u8, status: MaritalStatus },
    #[error("no flat track is open to {} applicants", status.label())]
    MaritalIneligible { status: MaritalStatus },
    #[error("single applicants cannot request the {} track", flat_type.label())]
    FlatTypeIneligible { flat_type: FlatType },
    #[error("no {} units remain in this project", flat_type.label())]
    NoUnits { flat_type: FlatType },
    #[error("applicant holds an officer registration for project '{project}'")]
    OfficerConflict { project: String },
}
