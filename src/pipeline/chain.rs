// sluice/src/pipeline/chain.rs

//! The chained-stage composer: threads execution through the stage list in
//! declared order, interleaving the merged middleware between every two
//! adjacent stages.

use crate::core::stage::{Stage, StageOutput};
use crate::middleware::{Middleware, Next};
use std::sync::Arc;
use tracing::{event, Level};

/// Composes `stages` into a single continuation.
///
/// - Zero stages: the identity continuation, regardless of `interceptor`.
/// - One stage: that stage lifted to a continuation; the interceptor is not
///   applied (there is nothing to intercept between).
/// - Two or more: a right fold `(rest, stage) -> |out| interceptor(rest)(stage(out))`,
///   so calling the result runs the leftmost stage first and hands its raw
///   output to the interceptor, which closes over the rest of the chain as
///   its continuation and decides whether to keep flowing or settle early.
///
/// The returned continuation is invoked with `StageOutput::Ready(initial)`;
/// its return value threads back up but carries no meaning.
pub fn compose_chain<T>(stages: &[Stage<T>], interceptor: Middleware<T>) -> Next<T>
where
  T: Send + Sync + 'static,
{
  let (last, rest) = match stages.split_last() {
    Some(parts) => parts,
    None => return Arc::new(|output| output),
  };

  if rest.is_empty() {
    return lift(last.clone());
  }

  // Fold from the right: the accumulator is the already-composed tail of the
  // chain, guarded by one interceptor application per adjacent pair.
  rest.iter().rev().fold(lift(last.clone()), |tail, s| -> Next<T> {
    let guarded = interceptor(tail);
    let current = lift(s.clone());
    Arc::new(move |output| guarded(current(output)))
  })
}

/// Lifts a stage into a continuation. A stage needs a plain value: a
/// `Deferred` arriving here means no deferred-aware middleware resolved it,
/// which leaves the settlement unreachable on this path.
fn lift<T>(stage: Stage<T>) -> Next<T>
where
  T: Send + Sync + 'static,
{
  Arc::new(move |output: StageOutput<T>| match output {
    StageOutput::Ready(value) => stage(value),
    StageOutput::Deferred(_) => {
      event!(
        Level::ERROR,
        "A stage received an unresolved deferred value; add the deferred-aware middleware \
         (deferred_gate) so deferred stage outputs are resolved before the next stage runs. \
         This invocation will settle with PipeError::NeverSettled."
      );
      StageOutput::Detached
    }
    StageOutput::Detached => StageOutput::Detached,
  })
}
