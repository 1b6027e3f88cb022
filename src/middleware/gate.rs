// sluice/src/middleware/gate.rs

//! The default middleware: a synchronous short-circuit on the predicate.

use crate::core::predicate::Predicate;
use crate::core::stage::StageOutput;
use crate::middleware::{Middleware, MiddlewareFactory, Next};
use crate::pipeline::settlement::Settler;
use std::sync::Arc;
use tracing::{event, Level};

/// Builds the default middleware factory.
///
/// On a `Ready` output it evaluates the predicate: pass means the value flows
/// into the continuation; reject means the pipeline ends immediately, settled
/// with that value as the final result. Deferred outputs pass through
/// untouched; resolving them is [`deferred_gate`](super::deferred_gate)'s
/// job, and without it the chain reports the wiring error.
pub fn gate<T>() -> MiddlewareFactory<T>
where
  T: Send + Sync + 'static,
{
  Arc::new(|can_do_next: Predicate<T>, settler: Settler<T>| {
    let middleware: Middleware<T> = Arc::new(move |next: Next<T>| {
      let can_do_next = can_do_next.clone();
      let settler = settler.clone();
      Arc::new(move |output: StageOutput<T>| match output {
        StageOutput::Ready(value) => {
          if can_do_next(&value) {
            next(StageOutput::Ready(value))
          } else {
            event!(Level::DEBUG, "Predicate rejected stage output; settling early.");
            settler.fulfill(value);
            StageOutput::Detached
          }
        }
        other => next(other),
      })
    });
    middleware
  })
}
