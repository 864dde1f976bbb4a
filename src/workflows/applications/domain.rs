use serde::{Deserialize, Serialize};

use crate::actors::ActorId;
use crate::workflows::projects::domain::FlatType;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application lifecycle. `Unsuccessful` is terminal and reachable from every
/// other state; `Booked` is only reachable from `Successful`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Successful,
    Unsuccessful,
    Booked,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Successful => "successful",
            Self::Unsuccessful => "unsuccessful",
            Self::Booked => "booked",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Unsuccessful)
    }
}

/// A flat application tied to one project track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant: ActorId,
    pub project: String,
    pub flat_type: FlatType,
    pub status: ApplicationStatus,
    pub withdrawal_requested: bool,
}

impl Application {
    /// An application counts against the one-per-applicant rule until it
    /// reaches the terminal state.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            applicant: self.applicant.0.clone(),
            project: self.project.clone(),
            flat_type: self.flat_type,
            status: self.status.label(),
            withdrawal_requested: self.withdrawal_requested,
        }
    }
}

/// Sanitized representation of an application's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub applicant: String,
    pub project: String,
    pub flat_type: FlatType,
    pub status: &'static str,
    pub withdrawal_requested: bool,
}
