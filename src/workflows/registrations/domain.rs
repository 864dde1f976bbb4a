use serde::{Deserialize, Serialize};

use crate::actors::ActorId;

/// Registration lifecycle. `Rejected` is terminal; `Approved` is only
/// reachable from `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// An officer's request to help run one project. At most one row exists per
/// (officer, project) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub officer: ActorId,
    pub project: String,
    pub status: RegistrationStatus,
}

impl Registration {
    pub fn status_view(&self) -> RegistrationStatusView {
        RegistrationStatusView {
            officer: self.officer.0.clone(),
            project: self.project.clone(),
            status: self.status.label(),
        }
    }
}

/// Serializable registration row for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStatusView {
    pub officer: String,
    pub project: String,
    pub status: &'static str,
}
