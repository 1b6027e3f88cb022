// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use serde_json::{json, Value};
use sluice::{stage, Stage, StageOutput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Counters for checking stage execution ---

pub fn new_counter() -> Arc<AtomicUsize> {
  Arc::new(AtomicUsize::new(0))
}

/// A JSON stage that counts its invocations before applying `f`.
pub fn counting_stage(
  counter: Arc<AtomicUsize>,
  f: impl Fn(Value) -> Value + Send + Sync + 'static,
) -> Stage<Value> {
  stage(move |v: Value| {
    counter.fetch_add(1, Ordering::SeqCst);
    StageOutput::ready(f(v))
  })
}

/// A JSON stage that appends `name` to the context's "trail" array, so tests
/// can assert on execution order.
pub fn recording_stage(name: &'static str) -> Stage<Value> {
  stage(move |mut v: Value| {
    v["trail"].as_array_mut().expect("trail array").push(json!(name));
    StageOutput::ready(v)
  })
}

/// Runs a stage directly and unwraps its `Ready` output, for comparing a
/// pipeline against plain synchronous composition.
pub fn run_ready(s: &Stage<Value>, v: Value) -> Value {
  match s(v) {
    StageOutput::Ready(out) => out,
    other => panic!("stage did not return Ready: {other:?}"),
  }
}

// --- A context type with its own default gate, for non-JSON pipelines ---

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderState {
  pub amount: u32,
  pub approved: bool,
}

impl sluice::CanProceed for OrderState {
  fn can_proceed(&self) -> bool {
    self.approved
  }
}
