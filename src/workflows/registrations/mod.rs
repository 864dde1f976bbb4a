//! Officer registrations and roster synchronization.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Registration, RegistrationStatus, RegistrationStatusView};
pub use repository::RegistrationStore;
pub use router::registration_router;
pub use service::{RegistrationError, RegistrationService, RegistrationServiceError};
