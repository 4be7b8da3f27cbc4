use super::common::*;
use crate::portal::catalog::{CollegeDirectory, JobCatalog};
use crate::portal::flow::{PortalPage, SessionEvent, SessionState, TransitionError};

#[test]
fn sessions_start_on_the_form() {
    let state = SessionState::default();
    assert_eq!(state.page(), PortalPage::Form);
    assert!(state.result().is_none());
}

#[test]
fn valid_submission_moves_to_result() {
    let catalog = small_catalog();
    let directory = CollegeDirectory::standard();

    let next = SessionState::Form
        .transition(
            SessionEvent::Submit(submission()),
            flow_context(&catalog, &directory),
        )
        .expect("valid submission accepted");

    assert_eq!(next.page(), PortalPage::Result);
    let snapshot = next.result().expect("result stored");
    assert_eq!(snapshot.full_name, "Priya Raman");
    assert_eq!(snapshot.age, 22);
    assert_eq!(snapshot.eligible_jobs.len(), 3);
    assert_eq!(snapshot.greeting(), "Hello Priya Raman, Age: 22");
}

#[test]
fn invalid_submission_stays_on_form() {
    let catalog = small_catalog();
    let directory = CollegeDirectory::standard();
    let state = SessionState::Form;
    let mut incomplete = submission();
    incomplete.photo = None;

    let err = state
        .transition(
            SessionEvent::Submit(incomplete),
            flow_context(&catalog, &directory),
        )
        .expect_err("missing photo rejected");

    match err {
        TransitionError::Rejected(rejection) => assert_eq!(rejection.violations.len(), 1),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(state, SessionState::Form);
}

#[test]
fn going_back_returns_to_blank_form() {
    let catalog = small_catalog();
    let directory = CollegeDirectory::standard();
    let context = flow_context(&catalog, &directory);

    let result = SessionState::Form
        .transition(SessionEvent::Submit(submission()), context)
        .expect("submission accepted");
    let back = result
        .transition(SessionEvent::GoBack, context)
        .expect("go back allowed");

    assert_eq!(back, SessionState::Form);
    assert!(back.result().is_none());
}

#[test]
fn go_back_on_form_is_a_no_op() {
    let catalog = small_catalog();
    let directory = CollegeDirectory::standard();

    let next = SessionState::Form
        .transition(SessionEvent::GoBack, flow_context(&catalog, &directory))
        .expect("go back on form allowed");

    assert_eq!(next, SessionState::Form);
}

#[test]
fn submitting_from_result_requires_going_back() {
    let catalog = small_catalog();
    let directory = CollegeDirectory::standard();
    let context = flow_context(&catalog, &directory);

    let result = SessionState::Form
        .transition(SessionEvent::Submit(submission()), context)
        .expect("submission accepted");
    let err = result
        .transition(SessionEvent::Submit(submission()), context)
        .expect_err("second submit refused");

    assert_eq!(err, TransitionError::SubmitOutsideForm);
}

#[test]
fn every_submission_recomputes_matches() {
    let directory = CollegeDirectory::standard();
    let full = small_catalog();
    let empty = JobCatalog::default();

    let first = SessionState::Form
        .transition(
            SessionEvent::Submit(submission()),
            flow_context(&full, &directory),
        )
        .expect("accepted");
    assert_eq!(first.result().map(|r| r.eligible_jobs.len()), Some(3));

    let back = first
        .transition(SessionEvent::GoBack, flow_context(&full, &directory))
        .expect("back");
    let second = back
        .transition(
            SessionEvent::Submit(submission()),
            flow_context(&empty, &directory),
        )
        .expect("accepted against empty catalog");

    let snapshot = second.result().expect("result stored");
    assert!(snapshot.eligible_jobs.is_empty());
}
