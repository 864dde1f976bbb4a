use super::common::*;
use crate::actors::MaritalStatus;
use crate::workflows::applications::eligibility::{EligibilityError, IntakePolicy};
use crate::workflows::projects::domain::FlatType;

#[test]
fn single_applicant_under_threshold_is_age_ineligible() {
    let policy = IntakePolicy::default();
    let actor = applicant(30, MaritalStatus::Single);

    match policy.check_track(&actor, FlatType::TwoRoom) {
        Err(err @ EligibilityError::AgeIneligible { minimum: 35, .. }) => {
            assert!(err.to_string().contains("at least 35"));
        }
        other => panic!("expected age ineligibility, got {other:?}"),
    }
}

#[test]
fn married_applicant_under_threshold_is_age_ineligible() {
    let policy = IntakePolicy::default();
    let actor = applicant(19, MaritalStatus::Married);

    match policy.check_track(&actor, FlatType::ThreeRoom) {
        Err(EligibilityError::AgeIneligible { minimum: 21, .. }) => {}
        other => panic!("expected age ineligibility, got {other:?}"),
    }
}

#[test]
fn single_applicant_cannot_request_three_room() {
    let policy = IntakePolicy::default();
    let actor = applicant(40, MaritalStatus::Single);

    match policy.check_track(&actor, FlatType::ThreeRoom) {
        Err(EligibilityError::FlatTypeIneligible {
            flat_type: FlatType::ThreeRoom,
        }) => {}
        other => panic!("expected flat-type ineligibility, got {other:?}"),
    }
    assert!(policy.check_track(&actor, FlatType::TwoRoom).is_ok());
}

#[test]
fn married_applicant_over_threshold_takes_either_track() {
    let policy = IntakePolicy::default();
    let actor = applicant(25, MaritalStatus::Married);

    assert!(policy.check_track(&actor, FlatType::TwoRoom).is_ok());
    assert!(policy.check_track(&actor, FlatType::ThreeRoom).is_ok());
}

#[test]
fn track_qualification_requires_remaining_units() {
    let policy = IntakePolicy::default();
    let world = world();

    let exhausted_two_room = seed_project(&world, "Maple Grove", 0, 12);
    let single = applicant(40, MaritalStatus::Single);
    let married = applicant(25, MaritalStatus::Married);

    assert!(!policy.qualifies_for_any_track(&single, &exhausted_two_room));
    assert!(policy.qualifies_for_any_track(&married, &exhausted_two_room));
}

#[test]
fn custom_thresholds_are_honored() {
    let policy = IntakePolicy {
        single_min_age: 30,
        ..IntakePolicy::default()
    };
    let actor = applicant(32, MaritalStatus::Single);
    assert!(policy.check_track(&actor, FlatType::TwoRoom).is_ok());
}
