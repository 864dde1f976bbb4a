use super::common::*;
use crate::actors::ActorId;
use crate::temporal::DateWindow;
use crate::workflows::projects::domain::{ProjectError, UnitTrack};

#[test]
fn unit_track_rejects_negative_wire_values() {
    match UnitTrack::new(-1, 95_000) {
        Err(ProjectError::NegativeValue { field: "units" }) => {}
        other => panic!("expected negative units error, got {other:?}"),
    }
    match UnitTrack::new(10, -5) {
        Err(ProjectError::NegativeValue { field: "price" }) => {}
        other => panic!("expected negative price error, got {other:?}"),
    }
    let track = UnitTrack::new(10, 95_000).expect("valid track");
    assert_eq!(track.units, 10);
}

#[test]
fn roster_addition_stops_at_capacity_and_stays_idempotent() {
    let (_, directory) = directory();
    let mut project = directory
        .create(
            &manager("T1111111A"),
            {
                let mut d = draft("Fernvale Rise", DateWindow::new(day(1), day(30)));
                d.officer_capacity = 1;
                d
            },
            today(),
        )
        .expect("project creates");

    assert!(project.add_officer(ActorId("S1".to_string())));
    // Re-adding the same officer is a success, not a second slot.
    assert!(project.add_officer(ActorId("S1".to_string())));
    assert!(!project.add_officer(ActorId("S2".to_string())));
    assert_eq!(project.officers.len(), 1);

    project.remove_officer(&ActorId("S1".to_string()));
    project.remove_officer(&ActorId("S1".to_string()));
    assert!(project.officers.is_empty());
}

#[test]
fn activity_requires_visibility_and_window() {
    let (_, directory) = directory();
    let project = directory
        .create(
            &manager("T1111111A"),
            draft("Fernvale Rise", DateWindow::new(day(1), day(30))),
            today(),
        )
        .expect("project creates");

    assert!(project.is_active(today()));
    assert!(!project.is_active(day(31).succ_opt().expect("valid date")));

    let hidden = directory
        .toggle_visibility(&manager("T1111111A"), "Fernvale Rise")
        .expect("toggle succeeds");
    assert!(!hidden.is_active(today()));
}
