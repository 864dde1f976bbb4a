use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::store::{MemoryApplicationStore, MemoryProjectStore, MemoryRegistrationStore};
use crate::workflows::applications::eligibility::IntakePolicy;
use crate::workflows::applications::ApplicationService;
use crate::workflows::projects::ProjectDirectory;
use crate::workflows::registrations::RegistrationService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The three engines wired over the reference in-memory stores, shared by
/// the server and the demo command.
pub(crate) struct Engines {
    pub(crate) directory: Arc<ProjectDirectory<MemoryProjectStore>>,
    pub(crate) applications: Arc<
        ApplicationService<MemoryApplicationStore, MemoryRegistrationStore, MemoryProjectStore>,
    >,
    pub(crate) registrations: Arc<
        RegistrationService<MemoryRegistrationStore, MemoryApplicationStore, MemoryProjectStore>,
    >,
}

pub(crate) fn build_engines(policy: IntakePolicy) -> Engines {
    let projects = Arc::new(MemoryProjectStore::default());
    let applications = Arc::new(MemoryApplicationStore::default());
    let registrations = Arc::new(MemoryRegistrationStore::default());

    let directory = Arc::new(ProjectDirectory::new(projects, policy));
    let application_service = Arc::new(ApplicationService::new(
        applications.clone(),
        registrations.clone(),
        directory.clone(),
    ));
    let registration_service = Arc::new(RegistrationService::new(
        registrations,
        applications,
        directory.clone(),
    ));

    Engines {
        directory,
        applications: application_service,
        registrations: registration_service,
    }
}
