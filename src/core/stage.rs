// sluice/src/core/stage.rs

//! Defines the stage function type and the tagged output a stage produces.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A deferred stage value: a boxed future yielding the stage's real output.
pub type DeferredValue<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// The output of a stage function (or of a continuation in the composed
/// chain).
///
/// Whether a value is plain or deferred is part of the type, not inferred at
/// run time: only the deferred-aware middleware (`deferred_gate`) resolves
/// `Deferred` outputs, and a `Deferred` that reaches a stage directly is a
/// wiring error reported by the chain.
pub enum StageOutput<T> {
  /// A plain value, available synchronously.
  Ready(T),
  /// A deferred value. The pipeline's apparent position does not advance
  /// until it resolves.
  Deferred(DeferredValue<T>),
  /// Nothing flows onward synchronously: the value was handed to the
  /// settlement or to an async continuation. Produced by middleware and the
  /// terminal stage; a user stage returning it detaches the chain without
  /// settling.
  Detached,
}

impl<T> StageOutput<T> {
  pub fn ready(value: T) -> Self {
    StageOutput::Ready(value)
  }

  /// Boxes and pins `fut` as a deferred stage value.
  pub fn deferred(fut: impl Future<Output = T> + Send + 'static) -> Self {
    StageOutput::Deferred(Box::pin(fut))
  }
}

// DeferredValue does not implement Debug, so provide a placeholder output.
impl<T: std::fmt::Debug> std::fmt::Debug for StageOutput<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StageOutput::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
      StageOutput::Deferred(_) => f.write_str("Deferred(..)"),
      StageOutput::Detached => f.write_str("Detached"),
    }
  }
}

/// A single stage of a pipeline.
///
/// The first stage of an invocation receives the initial value; every
/// subsequent stage receives the previous stage's (resolved) output. Uses Arc
/// to be cheaply cloneable into the composed chain.
pub type Stage<T> = Arc<dyn Fn(T) -> StageOutput<T> + Send + Sync>;

/// Wraps a closure as a [`Stage`].
pub fn stage<T, F>(f: F) -> Stage<T>
where
  T: 'static,
  F: Fn(T) -> StageOutput<T> + Send + Sync + 'static,
{
  Arc::new(f)
}
