//! Role-tagged actor records.
//!
//! All engine operations take an already-authenticated [`Actor`]; the engines
//! only enforce ownership and role capability, never login.

use serde::{Deserialize, Serialize};

/// Identifier wrapper for actors (applicants, officers, managers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Applicant,
    Officer,
    Manager,
}

impl ActorRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::Officer => "officer",
            Self::Manager => "manager",
        }
    }
}

/// Flat actor record with capability checks instead of a role hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub age: u8,
    pub marital_status: MaritalStatus,
    pub role: ActorRole,
}

impl Actor {
    /// Managers run projects; they never apply for flats in them.
    pub fn can_apply(&self) -> bool {
        !matches!(self.role, ActorRole::Manager)
    }

    /// Only managers create, edit, and adjudicate projects.
    pub fn can_manage(&self) -> bool {
        matches!(self.role, ActorRole::Manager)
    }

    /// Officers may register to help run projects they do not own.
    pub fn can_register(&self) -> bool {
        matches!(self.role, ActorRole::Officer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: ActorRole) -> Actor {
        Actor {
            id: ActorId("S1234567A".to_string()),
            name: "Test Actor".to_string(),
            age: 36,
            marital_status: MaritalStatus::Single,
            role,
        }
    }

    #[test]
    fn capability_checks_follow_role() {
        assert!(actor(ActorRole::Applicant).can_apply());
        assert!(actor(ActorRole::Officer).can_apply());
        assert!(!actor(ActorRole::Manager).can_apply());

        assert!(actor(ActorRole::Manager).can_manage());
        assert!(!actor(ActorRole::Officer).can_manage());

        assert!(actor(ActorRole::Officer).can_register());
        assert!(!actor(ActorRole::Applicant).can_register());
    }
}
