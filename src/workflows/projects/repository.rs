use crate::store::StoreError;

use super::domain::Project;

/// Storage abstraction for projects, keyed by project name. Writes must be
/// visible to subsequent reads; the booking compensation path depends on it.
pub trait ProjectStore: Send + Sync {
    fn insert(&self, project: Project) -> Result<(), StoreError>;
    fn update(&self, project: Project) -> Result<(), StoreError>;
    fn delete(&self, name: &str) -> Result<(), StoreError>;
    fn fetch(&self, name: &str) -> Result<Option<Project>, StoreError>;
    fn all(&self) -> Result<Vec<Project>, StoreError>;
}
