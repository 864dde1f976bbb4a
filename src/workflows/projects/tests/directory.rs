use super::common::*;
use crate::actors::{ActorId, MaritalStatus};
use crate::temporal::DateWindow;
use crate::workflows::projects::domain::{ProjectError, ProjectUpdate, UnitTrack};
use crate::workflows::projects::repository::ProjectStore;

#[test]
fn create_rejects_duplicate_names() {
    let (_, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(1), day(30))), today())
        .expect("first project creates");

    match directory.create(
        &manager("T2222222B"),
        draft("Fernvale Rise", DateWindow::new(day(1), day(30))),
        today(),
    ) {
        Err(ProjectError::NameConflict { .. }) => {}
        other => panic!("expected name conflict, got {other:?}"),
    }
}

#[test]
fn create_rejects_inverted_or_past_windows() {
    let (_, directory) = directory();
    let owner = manager("T1111111A");

    match directory.create(
        &owner,
        draft("Fernvale Rise", DateWindow::new(day(20), day(10))),
        today(),
    ) {
        Err(ProjectError::InvalidRange) => {}
        other => panic!("expected invalid range, got {other:?}"),
    }

    match directory.create(
        &owner,
        draft("Fernvale Rise", DateWindow::new(day(1), day(10))),
        today(),
    ) {
        Err(ProjectError::InvalidRange) => {}
        other => panic!("expected invalid range for past window, got {other:?}"),
    }
}

#[test]
fn create_bounds_officer_capacity() {
    let (_, directory) = directory();
    let mut oversized = draft("Fernvale Rise", DateWindow::new(day(1), day(30)));
    oversized.officer_capacity = 11;

    match directory.create(&manager("T1111111A"), oversized, today()) {
        Err(ProjectError::CapacityOutOfRange {
            capacity: 11,
            max: 10,
        }) => {}
        other => panic!("expected capacity out of range, got {other:?}"),
    }
}

#[test]
fn overlapping_active_windows_for_one_manager_are_rejected() {
    let (_, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(15), day(22))), today())
        .expect("first project creates");

    // Identical window for the same manager.
    match directory.create(
        &owner,
        draft("Marsiling Peak", DateWindow::new(day(15), day(22))),
        today(),
    ) {
        Err(ProjectError::OwnerOverlap { existing }) => assert_eq!(existing, "Fernvale Rise"),
        other => panic!("expected owner overlap, got {other:?}"),
    }

    // A window starting the day after the first closes is fine.
    directory
        .create(
            &owner,
            draft("Marsiling Peak", DateWindow::new(day(23), day(30))),
            today(),
        )
        .expect("non-overlapping window creates");

    // Another manager can reuse the original window.
    directory
        .create(
            &manager("T2222222B"),
            draft("Punggol Sails", DateWindow::new(day(15), day(22))),
            today(),
        )
        .expect("other manager creates");
}

#[test]
fn hidden_projects_do_not_block_new_windows() {
    let (_, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(15), day(22))), today())
        .expect("first project creates");
    directory
        .toggle_visibility(&owner, "Fernvale Rise")
        .expect("toggle succeeds");

    directory
        .create(
            &owner,
            draft("Marsiling Peak", DateWindow::new(day(15), day(22))),
            today(),
        )
        .expect("hidden project does not collide");
}

#[test]
fn edit_is_owner_gated() {
    let (_, directory) = directory();
    directory
        .create(
            &manager("T1111111A"),
            draft("Fernvale Rise", DateWindow::new(day(1), day(30))),
            today(),
        )
        .expect("project creates");

    match directory.edit(
        &manager("T2222222B"),
        "Fernvale Rise",
        ProjectUpdate::default(),
        today(),
    ) {
        Err(ProjectError::NotOwner { .. }) => {}
        other => panic!("expected not owner, got {other:?}"),
    }
}

#[test]
fn edit_rechecks_overlap_when_dates_change() {
    let (_, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(15), day(20))), today())
        .expect("first project creates");
    directory
        .create(&owner, draft("Marsiling Peak", DateWindow::new(day(21), day(28))), today())
        .expect("second project creates");

    match directory.edit(
        &owner,
        "Marsiling Peak",
        ProjectUpdate {
            window: Some(DateWindow::new(day(18), day(28))),
            ..Default::default()
        },
        today(),
    ) {
        Err(ProjectError::OwnerOverlap { existing }) => assert_eq!(existing, "Fernvale Rise"),
        other => panic!("expected owner overlap, got {other:?}"),
    }

    // Re-saving its own window must not trip on itself.
    directory
        .edit(
            &owner,
            "Marsiling Peak",
            ProjectUpdate {
                window: Some(DateWindow::new(day(21), day(29))),
                ..Default::default()
            },
            today(),
        )
        .expect("edit excluding self succeeds");
}

#[test]
fn edit_cannot_shrink_capacity_below_roster() {
    let (_, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(1), day(30))), today())
        .expect("project creates");
    directory
        .add_officer("Fernvale Rise", ActorId("S1".to_string()))
        .expect("roster add succeeds");
    directory
        .add_officer("Fernvale Rise", ActorId("S2".to_string()))
        .expect("roster add succeeds");

    match directory.edit(
        &owner,
        "Fernvale Rise",
        ProjectUpdate {
            officer_capacity: Some(1),
            ..Default::default()
        },
        today(),
    ) {
        Err(ProjectError::CapacityTooSmall {
            capacity: 1,
            roster: 2,
        }) => {}
        other => panic!("expected capacity too small, got {other:?}"),
    }
}

#[test]
fn rename_rekeys_the_row_and_checks_conflicts() {
    let (store, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(1), day(30))), today())
        .expect("project creates");

    let other_owner = manager("T2222222B");
    directory
        .create(
            &other_owner,
            draft("Punggol Sails", DateWindow::new(day(1), day(30))),
            today(),
        )
        .expect("second project creates");

    match directory.edit(
        &other_owner,
        "Punggol Sails",
        ProjectUpdate {
            rename: Some("Fernvale Rise".to_string()),
            ..Default::default()
        },
        today(),
    ) {
        Err(ProjectError::NameConflict { .. }) => {}
        other => panic!("expected name conflict, got {other:?}"),
    }

    directory
        .edit(
            &other_owner,
            "Punggol Sails",
            ProjectUpdate {
                rename: Some("Punggol Crest".to_string()),
                ..Default::default()
            },
            today(),
        )
        .expect("rename succeeds");
    assert!(store.fetch("Punggol Sails").expect("fetch succeeds").is_none());
    assert!(store.fetch("Punggol Crest").expect("fetch succeeds").is_some());
}

#[test]
fn delete_is_owner_gated_and_unconditional() {
    let (store, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(1), day(30))), today())
        .expect("project creates");

    match directory.delete(&manager("T2222222B"), "Fernvale Rise") {
        Err(ProjectError::NotOwner { .. }) => {}
        other => panic!("expected not owner, got {other:?}"),
    }

    directory
        .delete(&owner, "Fernvale Rise")
        .expect("delete succeeds");
    assert!(store.fetch("Fernvale Rise").expect("fetch succeeds").is_none());
}

#[test]
fn viewable_listing_applies_thresholds_and_availability() {
    let (store, directory) = directory();
    let owner = manager("T1111111A");
    directory
        .create(&owner, draft("Fernvale Rise", DateWindow::new(day(1), day(30))), today())
        .expect("project creates");

    // Married 25: qualifies for either track.
    let married = applicant(25, MaritalStatus::Married);
    assert_eq!(
        directory
            .viewable_projects(&married, None, today())
            .expect("listing succeeds")
            .len(),
        1
    );

    // Single 30: under the singles threshold, sees nothing.
    let young_single = applicant(30, MaritalStatus::Single);
    assert!(directory
        .viewable_projects(&young_single, None, today())
        .expect("listing succeeds")
        .is_empty());

    // Single 40: sees it only while the 2-room track has units.
    let single = applicant(40, MaritalStatus::Single);
    assert_eq!(
        directory
            .viewable_projects(&single, None, today())
            .expect("listing succeeds")
            .len(),
        1
    );

    let mut project = store
        .fetch("Fernvale Rise")
        .expect("fetch succeeds")
        .expect("project present");
    project.two_room = UnitTrack {
        units: 0,
        price: 95_000,
    };
    store.update(project).expect("drain persists");
    assert!(directory
        .viewable_projects(&single, None, today())
        .expect("listing succeeds")
        .is_empty());

    // The project backing a current application stays visible regardless.
    assert_eq!(
        directory
            .viewable_projects(&single, Some("Fernvale Rise"), today())
            .expect("listing succeeds")
            .len(),
        1
    );
}
