use crate::actors::ActorId;
use crate::store::StoreError;

use super::domain::{Application, ApplicationId};

/// Storage abstraction for applications, keyed by application id.
///
/// Ids come from the store's own monotonic sequence rather than a global
/// counter, so alternative backends can issue their own.
pub trait ApplicationStore: Send + Sync {
    fn next_id(&self) -> ApplicationId;
    fn insert(&self, application: Application) -> Result<(), StoreError>;
    fn update(&self, application: Application) -> Result<(), StoreError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError>;
    /// The applicant's current non-terminal application, if any. At most one
    /// exists by construction.
    fn active_for(&self, applicant: &ActorId) -> Result<Option<Application>, StoreError>;
}
