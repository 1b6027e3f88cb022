// sluice/src/core/predicate.rs

//! The short-circuit predicate: decides, after every stage, whether the
//! pipeline may proceed to the next one.

use std::sync::Arc;

/// Predicate evaluated on each stage's output. `true` means "continue to the
/// next stage"; `false` short-circuits the pipeline, settling it with the
/// rejected value as the final result.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Wraps a closure as a [`Predicate`].
pub fn predicate<T, F>(f: F) -> Predicate<T>
where
  T: 'static,
  F: Fn(&T) -> bool + Send + Sync + 'static,
{
  Arc::new(f)
}

/// The default short-circuit decision for a value type.
///
/// This is the extension seam for pipelines built without an explicit
/// predicate: implement it for your context type to define when the pipeline
/// keeps flowing. An explicit predicate passed in `PipeSetup::Config` always
/// overrides it.
pub trait CanProceed {
  fn can_proceed(&self) -> bool;
}

/// Structured values (objects, arrays) keep the pipeline flowing; scalars and
/// null are treated as pipeline-final results.
impl CanProceed for serde_json::Value {
  fn can_proceed(&self) -> bool {
    matches!(self, serde_json::Value::Object(_) | serde_json::Value::Array(_))
  }
}

/// The [`CanProceed`] implementation of `T`, as a [`Predicate`].
pub fn default_predicate<T>() -> Predicate<T>
where
  T: CanProceed + Send + Sync + 'static,
{
  Arc::new(|value: &T| value.can_proceed())
}
