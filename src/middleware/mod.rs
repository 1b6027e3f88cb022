// sluice/src/middleware/mod.rs

//! Middleware: the interception layer run between every two adjacent stages.
//!
//! A middleware factory is instantiated once per pipeline invocation, closing
//! over that invocation's predicate and settlement handle. The decorator it
//! produces wraps the continuation into the rest of the chain (`Next<T>`) and
//! decides, for each stage output, whether to call it or to settle early.

pub mod deferred;
pub mod gate;

pub use deferred::deferred_gate;
pub use gate::gate;

use crate::core::predicate::Predicate;
use crate::core::stage::StageOutput;
use crate::pipeline::settlement::Settler;
use std::sync::Arc;

/// A continuation: the rest of the composed chain (or the next middleware
/// layer) as a single callable. The returned `StageOutput` threads back up
/// the synchronous call stack but is never inspected; effects are observable
/// only through the settlement.
pub type Next<T> = Arc<dyn Fn(StageOutput<T>) -> StageOutput<T> + Send + Sync>;

/// A per-invocation middleware decorator: wraps a continuation with
/// interception logic. Note this is exactly `Composable<Next<T>>`, so several
/// decorators merge into one via [`compose`](crate::compose::compose).
pub type Middleware<T> = Arc<dyn Fn(Next<T>) -> Next<T> + Send + Sync>;

/// A middleware factory. Called once per invocation with the pipeline's
/// predicate and that invocation's settlement handle; the handle carries both
/// the success and failure settlement operations. No built-in middleware ever
/// uses the failure side; it exists for custom middleware authors.
pub type MiddlewareFactory<T> = Arc<dyn Fn(Predicate<T>, Settler<T>) -> Middleware<T> + Send + Sync>;
