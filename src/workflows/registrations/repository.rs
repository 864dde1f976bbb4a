use crate::actors::ActorId;
use crate::store::StoreError;

use super::domain::Registration;

/// Storage abstraction for officer registrations, keyed by the
/// (officer, project) pair.
pub trait RegistrationStore: Send + Sync {
    fn insert(&self, registration: Registration) -> Result<(), StoreError>;
    fn update(&self, registration: Registration) -> Result<(), StoreError>;
    fn fetch(&self, officer: &ActorId, project: &str) -> Result<Option<Registration>, StoreError>;
    fn for_officer(&self, officer: &ActorId) -> Result<Vec<Registration>, StoreError>;
    fn for_project(&self, project: &str) -> Result<Vec<Registration>, StoreError>;
}
