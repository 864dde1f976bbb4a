//! Flat application intake, review, withdrawal, and booking.

pub mod booking;
pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use booking::{BookingError, BookingOutcome};
pub use domain::{Application, ApplicationId, ApplicationStatus, ApplicationStatusView};
pub use eligibility::{EligibilityError, IntakePolicy};
pub use repository::ApplicationStore;
pub use router::application_router;
pub use service::{
    ApplicationError, ApplicationService, ApplicationServiceError, ReviewOutcome,
};
