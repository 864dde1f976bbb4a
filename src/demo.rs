use std::fs::File;

use chrono::{Duration, Local, NaiveDate};
use serde_json::json;

use crate::actors::{Actor, ActorId, ActorRole, MaritalStatus};
use crate::cli::DemoArgs;
use crate::error::AppError;
use crate::infra::build_engines;
use crate::seed::{self, SeedProject};
use crate::temporal::DateWindow;
use crate::workflows::applications::eligibility::IntakePolicy;
use crate::workflows::projects::domain::{FlatType, ProjectDraft, UnitTrack};

/// Scripted walkthrough covering the whole lifecycle: seed projects, approve
/// an officer registration, then apply, review, book, and withdraw.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let engines = build_engines(IntakePolicy::default());

    let seeds = match &args.seed_csv {
        Some(path) => seed::load_projects(File::open(path)?)?,
        None => sample_projects(today),
    };
    if seeds.is_empty() {
        return Err(AppError::Workflow(
            "seed export contained no projects".into(),
        ));
    }

    let mut managers = Vec::new();
    for seeded in &seeds {
        let project = engines
            .directory
            .create(&seeded.manager, seeded.draft.clone(), today)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "created": project.view() }))
                .expect("project view serializes")
        );
        managers.push(seeded.manager.clone());
    }

    let manager = managers.first().cloned().expect("at least one seed project");
    let project_name = seeds[0].draft.name.clone();

    let officer = Actor {
        id: ActorId("S7654321B".to_string()),
        name: "Officer Tan".to_string(),
        age: 30,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Officer,
    };
    let applicant = Actor {
        id: ActorId("S9876543C".to_string()),
        name: "Applicant Lim".to_string(),
        age: 25,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Applicant,
    };

    let registration = engines.registrations.register(&officer, &project_name)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "registered": registration.status_view() }))
            .expect("registration view serializes")
    );
    let approved = engines
        .registrations
        .staff_approve(&manager, &officer.id, &project_name)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "registration": approved.status_view() }))
            .expect("registration view serializes")
    );

    let application =
        engines
            .applications
            .apply(&applicant, &project_name, FlatType::ThreeRoom, today)?;
    let review = engines
        .applications
        .staff_approve(&manager, &application.id)?;
    let booking = engines.applications.book(&officer, &application.id)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "review": review.summary(),
            "booking": booking.summary(),
            "application": booking.application().status_view(),
            "project": engines.directory.find(&project_name)?.view(),
        }))
        .expect("walkthrough serializes")
    );

    engines.applications.request_withdrawal(&application.id)?;
    let withdrawn = engines
        .applications
        .staff_approve_withdrawal(&manager, &application.id)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "withdrawal": withdrawn.status_view(),
            "project": engines.directory.find(&project_name)?.view(),
        }))
        .expect("walkthrough serializes")
    );

    Ok(())
}

fn sample_projects(today: NaiveDate) -> Vec<SeedProject> {
    let manager = Actor {
        id: ActorId("T1234567H".to_string()),
        name: "Manager Lee".to_string(),
        age: 40,
        marital_status: MaritalStatus::Married,
        role: ActorRole::Manager,
    };

    vec![SeedProject {
        manager,
        draft: ProjectDraft {
            name: "Acacia Breeze".to_string(),
            neighbourhood: "Yishun".to_string(),
            two_room: UnitTrack {
                units: 20,
                price: 110_000,
            },
            three_room: UnitTrack {
                units: 30,
                price: 180_000,
            },
            window: DateWindow::new(today, today + Duration::days(30)),
            officer_capacity: 5,
        },
    }]
}
