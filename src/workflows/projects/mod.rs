//! Project entities and the directory that owns them.

pub mod directory;
pub mod domain;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use directory::ProjectDirectory;
pub use domain::{
    FlatType, Project, ProjectDraft, ProjectError, ProjectUpdate, ProjectView, UnitTrack,
};
pub use repository::ProjectStore;
pub use router::project_router;
