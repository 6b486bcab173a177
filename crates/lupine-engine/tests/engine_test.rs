//! Integration tests for the execution engine and its handles.

use std::time::{Duration, Instant};

use lupine_engine::{EngineError, ExecutionEngine, HandleState, ProcessOutcome, RunOutcome};
use lupine_process::{
  ExitCode, InputMapping, OutputMapping, ProcessDescriptor, ProcessFailure, ProcessOutput,
  SINGLE_RETURN_NAME,
};
use serde_json::{Value, json};

fn add_descriptor() -> ProcessDescriptor {
  ProcessDescriptor::build("add", &["a", "b"], |inputs| {
    let a = inputs.get("a").and_then(Value::as_i64).unwrap_or(0);
    let b = inputs.get("b").and_then(Value::as_i64).unwrap_or(0);
    ProcessOutput::Value(json!(a + b))
  })
}

fn failing_descriptor() -> ProcessDescriptor {
  ProcessDescriptor::build("broken", &[], |_| {
    ProcessOutput::Failure(ProcessFailure::new(
      ExitCode::InvalidOutput,
      "output was not an integer",
    ))
  })
}

#[tokio::test]
async fn test_submit_then_wait_resolves() {
  let engine = ExecutionEngine::new();
  let descriptor = add_descriptor();
  let inputs = descriptor
    .bind(&[json!(1), json!(2)], &InputMapping::new())
    .unwrap();

  let handle = engine.submit(descriptor, inputs);
  let outcome = handle.wait().await.unwrap();

  match outcome {
    ProcessOutcome::Resolved(outputs) => {
      assert_eq!(outputs.get(SINGLE_RETURN_NAME), Some(&json!(3)));
    }
    other => panic!("expected resolved outcome, got {:?}", other),
  }
}

#[tokio::test]
async fn test_failure_travels_the_result_channel() {
  let engine = ExecutionEngine::new();

  let handle = engine.submit(failing_descriptor(), InputMapping::new());
  let outcome = handle.wait().await.unwrap();

  match outcome {
    ProcessOutcome::Failed(failure) => {
      assert_eq!(failure.code, ExitCode::InvalidOutput);
      assert_eq!(failure.code.status(), 320);
    }
    other => panic!("expected failed outcome, got {:?}", other),
  }
}

#[tokio::test]
async fn test_submit_does_not_block() {
  let engine = ExecutionEngine::new();
  let descriptor = ProcessDescriptor::build("slow", &[], |_| {
    std::thread::sleep(Duration::from_millis(200));
    ProcessOutput::Value(json!(1))
  });

  let started = Instant::now();
  let handle = engine.submit(descriptor, InputMapping::new());
  assert!(started.elapsed() < Duration::from_millis(100));

  // The unit is still sleeping, so the handle has not resolved yet.
  assert_eq!(handle.state(), HandleState::Pending);

  let outcome = handle.wait().await.unwrap();
  assert!(matches!(outcome, ProcessOutcome::Resolved(_)));
}

#[tokio::test]
async fn test_terminal_state_is_sticky() {
  let engine = ExecutionEngine::new();
  let descriptor = add_descriptor();
  let inputs = descriptor
    .bind(&[json!(20), json!(22)], &InputMapping::new())
    .unwrap();

  let handle = engine.submit(descriptor, inputs);

  while !handle.state().is_terminal() {
    tokio::time::sleep(Duration::from_millis(5)).await;
  }

  let first = handle.state();
  let second = handle.state();
  assert_eq!(first, second);

  match first {
    HandleState::Resolved(outputs) => {
      assert_eq!(outputs.get(SINGLE_RETURN_NAME), Some(&json!(42)));
    }
    other => panic!("expected resolved state, got {:?}", other),
  }
}

#[tokio::test]
async fn test_run_unwraps_a_lone_return_value() {
  let engine = ExecutionEngine::new();

  let outcome = engine
    .run(add_descriptor(), &[json!(1), json!(2)], &InputMapping::new())
    .await
    .unwrap();

  assert_eq!(outcome, RunOutcome::Value(json!(3)));
}

#[tokio::test]
async fn test_run_passes_multi_entry_mappings_through() {
  let engine = ExecutionEngine::new();
  let descriptor = ProcessDescriptor::build("pair", &[], |_| {
    let mut outputs = OutputMapping::new();
    outputs.publish("first", json!(1)).unwrap();
    outputs.publish("second", json!(2)).unwrap();
    ProcessOutput::Mapping(outputs)
  });

  let outcome = engine
    .run(descriptor, &[], &InputMapping::new())
    .await
    .unwrap();

  match outcome {
    RunOutcome::Mapping(outputs) => {
      assert_eq!(outputs.len(), 2);
      assert_eq!(outputs.get("first"), Some(&json!(1)));
      assert_eq!(outputs.get("second"), Some(&json!(2)));
    }
    other => panic!("expected mapping outcome, got {:?}", other),
  }
}

#[tokio::test]
async fn test_run_surfaces_failures_as_outcomes() {
  let engine = ExecutionEngine::new();

  let outcome = engine
    .run(failing_descriptor(), &[], &InputMapping::new())
    .await
    .unwrap();

  match outcome {
    RunOutcome::Failed(failure) => assert_eq!(failure.code, ExitCode::InvalidOutput),
    other => panic!("expected failed outcome, got {:?}", other),
  }
}

#[tokio::test]
async fn test_bind_fault_is_fatal_before_submission() {
  let engine = ExecutionEngine::new();

  let err = engine
    .run(
      add_descriptor(),
      &[json!(1), json!(2), json!(3)],
      &InputMapping::new(),
    )
    .await
    .unwrap_err();

  assert!(matches!(err, EngineError::Bind { .. }));
}

#[tokio::test]
async fn test_shutdown_drops_pending_units() {
  let engine = ExecutionEngine::new();
  engine.shutdown();

  let handle = engine.submit(add_descriptor(), InputMapping::new());
  let err = handle.wait().await.unwrap_err();

  assert!(matches!(err, EngineError::Terminated));
}

#[tokio::test]
async fn test_independent_handles_resolve_independently() {
  let engine = ExecutionEngine::new();

  let slow = ProcessDescriptor::build("slow", &[], |_| {
    std::thread::sleep(Duration::from_millis(100));
    ProcessOutput::Value(json!("slow"))
  });
  let fast = ProcessDescriptor::build("fast", &[], |_| ProcessOutput::Value(json!("fast")));

  let slow_handle = engine.submit(slow, InputMapping::new());
  let fast_handle = engine.submit(fast, InputMapping::new());

  let fast_outcome = fast_handle.wait().await.unwrap();
  assert!(matches!(fast_outcome, ProcessOutcome::Resolved(_)));

  let slow_outcome = slow_handle.wait().await.unwrap();
  assert!(matches!(slow_outcome, ProcessOutcome::Resolved(_)));
}
