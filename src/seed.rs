//! CSV project seeding for demos and local runs.
//!
//! Reads a project export (one row per project, manager columns inline) and
//! produces drafts ready to feed through the project directory.

use std::io::Read;

use serde::Deserialize;

use crate::actors::{Actor, ActorId, ActorRole, MaritalStatus};
use crate::temporal::DateWindow;
use crate::workflows::projects::domain::{ProjectDraft, ProjectError, UnitTrack};

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, source: ProjectError },
    BadDate { line: u64, detail: String },
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Io(err) => write!(f, "failed to read seed export: {}", err),
            SeedError::Csv(err) => write!(f, "invalid seed CSV data: {}", err),
            SeedError::Row { line, source } => write!(f, "seed row {} rejected: {}", line, source),
            SeedError::BadDate { line, detail } => {
                write!(f, "seed row {} has a bad date: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io(err) => Some(err),
            SeedError::Csv(err) => Some(err),
            SeedError::Row { source, .. } => Some(source),
            SeedError::BadDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SeedError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    name: String,
    neighbourhood: String,
    two_room_units: i64,
    two_room_price: i64,
    three_room_units: i64,
    three_room_price: i64,
    opens_on: String,
    closes_on: String,
    officer_capacity: u8,
    manager_id: String,
    manager_name: String,
    manager_age: u8,
}

/// A project draft paired with the manager who owns it.
#[derive(Debug, Clone)]
pub struct SeedProject {
    pub manager: Actor,
    pub draft: ProjectDraft,
}

pub fn load_projects<R: Read>(reader: R) -> Result<Vec<SeedProject>, SeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut projects = Vec::new();

    for (index, record) in csv_reader.deserialize::<SeedRow>().enumerate() {
        let line = index as u64 + 2;
        let row = record?;

        let date = |raw: &str| {
            crate::temporal::parse_date(raw).map_err(|detail| SeedError::BadDate { line, detail })
        };
        let window = DateWindow::new(date(&row.opens_on)?, date(&row.closes_on)?);

        let track = |units, price| {
            UnitTrack::new(units, price).map_err(|source| SeedError::Row { line, source })
        };

        projects.push(SeedProject {
            manager: Actor {
                id: ActorId(row.manager_id),
                name: row.manager_name,
                age: row.manager_age,
                marital_status: MaritalStatus::Married,
                role: ActorRole::Manager,
            },
            draft: ProjectDraft {
                name: row.name,
                neighbourhood: row.neighbourhood,
                two_room: track(row.two_room_units, row.two_room_price)?,
                three_room: track(row.three_room_units, row.three_room_price)?,
                window,
                officer_capacity: row.officer_capacity,
            },
        });
    }

    Ok(projects)
}
