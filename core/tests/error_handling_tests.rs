// tests/error_handling_tests.rs
use anyhow::Context;
use localci::{error_is, is_deadline_exceeded, CiError, RunOutcome, Signal, StepCause, StepError};
use std::error::Error;

#[test]
fn test_step_errors_match_by_step_name_only() {
  let a = StepError::new("go build", "failed to execute: boom", Some(StepCause::Exit { code: Some(1) }));
  let b = StepError::new("go build", "something else entirely", None);
  let c = StepError::new("go test", "failed to execute: boom", Some(StepCause::Exit { code: Some(1) }));

  assert_eq!(a, b);
  assert_ne!(a, c);
  assert!(CiError::Step(a).is(&CiError::step_failed("go build")));
  assert!(!CiError::Step(c).is(&CiError::step_failed("go build")));
}

#[test]
fn test_sentinels_are_distinct() {
  let validation = CiError::Validation("The project directory is required".to_string());
  let signal = CiError::Signal {
    signal: Signal::Terminate,
  };

  assert!(validation.is(&CiError::validation()));
  assert!(!validation.is(&CiError::interrupted()));
  assert!(signal.is(&CiError::interrupted()));
  assert!(!signal.is(&CiError::validation()));
  assert!(!signal.is(&CiError::step_failed("go build")));
  assert_eq!(signal.step_name(), None);
}

#[test]
fn test_matching_survives_several_layers_of_context() {
  let inner: Result<(), CiError> = Err(StepError::new("git push", "failed time out", Some(StepCause::DeadlineExceeded)).into());
  let wrapped = inner
    .context("publishing release")
    .context("running local ci")
    .unwrap_err();

  assert!(error_is(wrapped.as_ref(), &CiError::step_failed("git push")));
  assert!(!error_is(wrapped.as_ref(), &CiError::step_failed("go build")));
  assert!(is_deadline_exceeded(wrapped.as_ref()));
}

#[test]
fn test_bare_step_error_matches_through_chain_walk() {
  let err = StepError::new("go fmt", "found unformatted files: a.go", None);
  assert!(error_is(&err, &CiError::step_failed("go fmt")));
  assert!(!error_is(&err, &CiError::validation()));
}

#[test]
fn test_unwrap_exposes_cause() {
  let err = CiError::from(StepError::new(
    "git push",
    "failed time out",
    Some(StepCause::DeadlineExceeded),
  ));

  let step_err = err.source().and_then(|s| s.downcast_ref::<StepError>()).unwrap();
  assert!(matches!(step_err.cause(), Some(StepCause::DeadlineExceeded)));
  let cause = step_err.source().unwrap();
  assert!(matches!(cause.downcast_ref::<StepCause>(), Some(StepCause::DeadlineExceeded)));

  let plain = StepError::new("go build", "failed to execute: ", Some(StepCause::Exit { code: Some(1) }));
  assert!(!is_deadline_exceeded(&plain));
  assert!(StepError::new("go build", "no cause", None).source().is_none());
}

#[test]
fn test_error_display_names_step_and_cause() {
  let err = CiError::from(StepError::new(
    "go build",
    "failed to execute: oops",
    Some(StepCause::Exit { code: Some(1) }),
  ));
  assert_eq!(
    err.to_string(),
    "Step: \"go build\": failed to execute: oops: Cause: exit status 1"
  );

  let killed = StepError::new("go test", "failed to execute: ", Some(StepCause::Exit { code: None }));
  assert!(killed.to_string().ends_with("Cause: terminated by signal"));

  let signal = CiError::Signal {
    signal: Signal::Interrupt,
  };
  assert_eq!(signal.to_string(), "interrupt: Exiting: Received a signal");
}

#[test]
fn test_run_outcome_classification() {
  assert_eq!(RunOutcome::of(&Ok(())), RunOutcome::Completed);
  assert_eq!(RunOutcome::of(&Err(CiError::interrupted())), RunOutcome::Interrupted);
  assert_eq!(RunOutcome::of(&Err(CiError::step_failed("go test"))), RunOutcome::StepFailed);
  assert_eq!(
    RunOutcome::of(&Err(CiError::Sink(std::io::Error::other("closed")))),
    RunOutcome::StepFailed
  );
}
