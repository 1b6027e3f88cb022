// sluice/src/middleware/deferred.rs

//! The deferred-aware middleware: resolves deferred stage outputs before the
//! predicate runs.

use crate::core::predicate::Predicate;
use crate::core::stage::StageOutput;
use crate::middleware::{Middleware, MiddlewareFactory, Next};
use crate::pipeline::settlement::Settler;
use std::sync::Arc;
use tracing::{event, Level};

/// Builds the deferred-aware middleware factory.
///
/// Behaves exactly like [`gate`](super::gate) for `Ready` outputs. For a
/// `Deferred` output it spawns a task that awaits the value, evaluates the
/// predicate on the *resolved* value, and then either continues into the
/// chain or settles early. The outer call returns `Detached` immediately,
/// so the invoker's synchronous stack unwinds while the pipeline's apparent
/// position holds until the deferred value resolves.
///
/// Spawning requires a tokio runtime context; pipelines whose stages only
/// return `Ready` values do not need one.
pub fn deferred_gate<T>() -> MiddlewareFactory<T>
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
        StageOutput::Deferred(fut) => {
          event!(Level::TRACE, "Stage output is deferred; resolving on a spawned task.");
          let can_do_next = can_do_next.clone();
          let settler = settler.clone();
          let next = next.clone();
          tokio::spawn(async move {
            let value = fut.await;
            if can_do_next(&value) {
              let _ = next(StageOutput::Ready(value));
            } else {
              event!(Level::DEBUG, "Predicate rejected resolved deferred value; settling early.");
              settler.fulfill(value);
            }
          });
          StageOutput::Detached
        }
        StageOutput::Detached => next(StageOutput::Detached),
      })
    });
    middleware
  })
}
