use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::actors::ActorId;
use crate::store::StoreError;
use crate::temporal::DateWindow;

/// The two flat inventories every project carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatType {
    TwoRoom,
    ThreeRoom,
}

impl FlatType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TwoRoom => "2-room",
            Self::ThreeRoom => "3-room",
        }
    }
}

/// One flat-type inventory: remaining units and the listed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTrack {
    pub units: u32,
    pub price: u32,
}

impl UnitTrack {
    /// Validating constructor for wire-level inputs, which arrive signed.
    pub fn new(units: i64, price: i64) -> Result<Self, ProjectError> {
        if units < 0 {
            return Err(ProjectError::NegativeValue { field: "units" });
        }
        if price < 0 {
            return Err(ProjectError::NegativeValue { field: "price" });
        }
        Ok(Self {
            units: units as u32,
            price: price as u32,
        })
    }
}

/// A time-boxed housing project offering two flat-type tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub neighbourhood: String,
    pub two_room: UnitTrack,
    pub three_room: UnitTrack,
    pub window: DateWindow,
    pub manager: ActorId,
    pub officer_capacity: u8,
    pub officers: BTreeSet<ActorId>,
    pub visible: bool,
}

impl Project {
    /// Accepting applications: visible and today inside the window.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.visible && self.window.contains(today)
    }

    pub fn track(&self, flat_type: FlatType) -> &UnitTrack {
        match flat_type {
            FlatType::TwoRoom => &self.two_room,
            FlatType::ThreeRoom => &self.three_room,
        }
    }

    pub fn track_mut(&mut self, flat_type: FlatType) -> &mut UnitTrack {
        match flat_type {
            FlatType::TwoRoom => &mut self.two_room,
            FlatType::ThreeRoom => &mut self.three_room,
        }
    }

    pub fn remaining(&self, flat_type: FlatType) -> u32 {
        self.track(flat_type).units
    }

    pub fn is_handled_by(&self, officer: &ActorId) -> bool {
        self.officers.contains(officer)
    }

    pub fn is_owned_by(&self, manager: &ActorId) -> bool {
        self.manager == *manager
    }

    /// Roster addition; `false` means the roster is already full. Re-adding a
    /// listed officer is a no-op success.
    pub fn add_officer(&mut self, officer: ActorId) -> bool {
        if self.officers.contains(&officer) {
            return true;
        }
        if self.officers.len() >= usize::from(self.officer_capacity) {
            return false;
        }
        self.officers.insert(officer)
    }

    /// Roster removal; no-op when the officer is not listed.
    pub fn remove_officer(&mut self, officer: &ActorId) {
        self.officers.remove(officer);
    }
}

/// Validated inputs for project creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub neighbourhood: String,
    pub two_room: UnitTrack,
    pub three_room: UnitTrack,
    pub window: DateWindow,
    pub officer_capacity: u8,
}

/// Partial update applied by the owning manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub rename: Option<String>,
    pub neighbourhood: Option<String>,
    pub two_room: Option<UnitTrack>,
    pub three_room: Option<UnitTrack>,
    pub window: Option<DateWindow>,
    pub officer_capacity: Option<u8>,
}

/// Failures raised by the project directory.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project name '{name}' is already taken")]
    NameConflict { name: String },
    #[error("application window must close on or after it opens, and not in the past")]
    InvalidRange,
    #[error("officer capacity {capacity} outside the permitted range 0..={max}")]
    CapacityOutOfRange { capacity: u8, max: u8 },
    #[error("{field} must not be negative")]
    NegativeValue { field: &'static str },
    #[error("manager already runs active project '{existing}' with an overlapping window")]
    OwnerOverlap { existing: String },
    #[error("officer capacity {capacity} is below the current roster size {roster}")]
    CapacityTooSmall { capacity: u8, roster: usize },
    #[error("only the owning manager may modify project '{name}'")]
    NotOwner { name: String },
    #[error("project '{name}' not found")]
    NotFound { name: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializable listing row for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub neighbourhood: String,
    pub two_room: UnitTrack,
    pub three_room: UnitTrack,
    pub opens_on: NaiveDate,
    pub closes_on: NaiveDate,
    pub officer_capacity: u8,
    pub officers: Vec<String>,
    pub visible: bool,
}

impl Project {
    pub fn view(&self) -> ProjectView {
        ProjectView {
            name: self.name.clone(),
            neighbourhood: self.neighbourhood.clone(),
            two_room: self.two_room,
            three_room: self.three_room,
            opens_on: self.window.opens_on,
            closes_on: self.window.closes_on,
            officer_capacity: self.officer_capacity,
            officers: self.officers.iter().map(|id| id.0.clone()).collect(),
            visible: self.visible,
        }
    }
}
