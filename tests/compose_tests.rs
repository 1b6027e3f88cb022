// tests/compose_tests.rs
mod common; // Reference the common module

use common::*;
use serde_json::{json, Value};
use sluice::{compose, compose_chain, gate, predicate, settlement, stage, Composable, Middleware, Next, StageOutput};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn test_compose_of_nothing_is_identity() {
  setup_tracing();
  let id = compose::<i64>(vec![]);
  assert_eq!(id(7), 7);
  assert_eq!(id(-3), -3);
  assert_eq!(id(0), 0);
}

#[test]
fn test_compose_of_one_behaves_like_the_function() {
  setup_tracing();
  let double: Composable<i64> = Arc::new(|v| v * 2);
  let composed = compose(vec![double.clone()]);
  for v in [0, 1, 21, -8] {
    assert_eq!(composed(v), double(v));
  }
}

#[test]
fn test_compose_applies_right_to_left() {
  setup_tracing();
  let a: Composable<String> = Arc::new(|s| format!("{s}a"));
  let b: Composable<String> = Arc::new(|s| format!("{s}b"));
  let c: Composable<String> = Arc::new(|s| format!("{s}c"));

  // The rightmost function runs first: a(b(c(x)))
  assert_eq!(compose(vec![a, b, c])("x".to_string()), "xcba");
}

#[test]
fn test_compose_chain_of_nothing_is_identity() {
  setup_tracing();
  // Any interceptor at all; it must not matter for an empty stage list.
  let (settler, _outcome) = settlement::<Value>();
  let interceptor = gate::<Value>()(predicate(|_v: &Value| true), settler);

  let chain = compose_chain(&[], interceptor);
  match chain(StageOutput::Ready(json!({"k": 1}))) {
    StageOutput::Ready(v) => assert_eq!(v, json!({"k": 1})),
    other => panic!("expected Ready, got {other:?}"),
  }
}

#[test]
fn test_single_stage_chain_skips_the_interceptor() {
  setup_tracing();
  let applications = new_counter();
  let seen = applications.clone();
  let interceptor: Middleware<Value> = Arc::new(move |next: Next<Value>| {
    seen.fetch_add(1, Ordering::SeqCst);
    next
  });

  let lone = stage(|v: Value| StageOutput::ready(v));
  let chain = compose_chain(&[lone], interceptor);

  assert_eq!(applications.load(Ordering::SeqCst), 0);
  match chain(StageOutput::Ready(json!(1))) {
    StageOutput::Ready(v) => assert_eq!(v, json!(1)),
    other => panic!("expected Ready, got {other:?}"),
  }
}

#[test]
fn test_interceptor_applied_between_each_adjacent_pair() {
  setup_tracing();
  let applications = new_counter();
  let seen = applications.clone();
  let interceptor: Middleware<Value> = Arc::new(move |next: Next<Value>| {
    seen.fetch_add(1, Ordering::SeqCst);
    next
  });

  let stages: Vec<_> = (0..4).map(|_| stage(|v: Value| StageOutput::ready(v))).collect();
  let chain = compose_chain(&stages, interceptor);

  // Four stages have three adjacent pairs.
  assert_eq!(applications.load(Ordering::SeqCst), 3);
  match chain(StageOutput::Ready(json!({"pass": "through"}))) {
    StageOutput::Ready(v) => assert_eq!(v, json!({"pass": "through"})),
    other => panic!("expected Ready, got {other:?}"),
  }
}
