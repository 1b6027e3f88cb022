// sluice/src/pipeline/settlement.rs

//! The one-shot settlement of a pipeline invocation.
//!
//! Every call to `Invoker::invoke` creates a fresh `Settler`/`Settlement`
//! pair. The settler is cloned into each middleware instance and moved into
//! the terminal stage; whichever of them settles first wins, and the one-shot
//! discipline is structural: the underlying sender is consumed on first use.

use crate::core::stage::{Stage, StageOutput};
use crate::error::{PipeError, PipeResult};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::{event, Level};

/// Creates a fresh settlement pair.
///
/// Exposed for custom middleware authors who want to exercise a middleware in
/// isolation; within the crate the invoker calls this per invocation.
pub fn settlement<T>() -> (Settler<T>, Settlement<T>) {
  let (tx, rx) = oneshot::channel();
  (
    Settler {
      tx: Arc::new(Mutex::new(Some(tx))),
    },
    Settlement { rx },
  )
}

/// The settling side: carries both the success and the failure channel of one
/// invocation. Cloneable; all clones share the same one-shot sender.
pub struct Settler<T> {
  tx: Arc<Mutex<Option<oneshot::Sender<PipeResult<T>>>>>,
}

// Manual impl to avoid requiring T: Clone.
impl<T> Clone for Settler<T> {
  fn clone(&self) -> Self {
    Settler {
      tx: Arc::clone(&self.tx),
    }
  }
}

impl<T> Settler<T> {
  /// Settles the invocation successfully with `value`. A second settlement
  /// attempt on any clone is a no-op, logged at WARN.
  pub fn fulfill(&self, value: T) {
    match self.tx.lock().take() {
      Some(tx) => {
        if tx.send(Ok(value)).is_err() {
          event!(Level::DEBUG, "Settlement receiver dropped; pipeline result discarded.");
        } else {
          event!(Level::TRACE, "Settlement fulfilled.");
        }
      }
      None => {
        event!(Level::WARN, "Pipeline already settled; extra fulfillment ignored.");
      }
    }
  }

  /// Settles the invocation with a failure. Never called by built-in
  /// middleware; this is the extension point for custom middleware that wants
  /// to surface an error instead of a value.
  pub fn abort(&self, source: impl Into<anyhow::Error>) {
    match self.tx.lock().take() {
      Some(tx) => {
        let source = source.into();
        event!(Level::DEBUG, error = %source, "Settlement aborted by middleware.");
        let _ = tx.send(Err(PipeError::Aborted { source }));
      }
      None => {
        event!(Level::WARN, "Pipeline already settled; abort ignored.");
      }
    }
  }

  /// Whether this invocation has already settled (through any clone).
  pub fn is_settled(&self) -> bool {
    self.tx.lock().is_none()
  }
}

/// The deferred result of one pipeline invocation. Resolves with the
/// pipeline's final value, with the error a middleware aborted with, or with
/// [`PipeError::NeverSettled`] if every settler clone was dropped unsettled:
/// the "chain never reached the terminal stage" condition, surfaced instead
/// of hanging forever.
pub struct Settlement<T> {
  rx: oneshot::Receiver<PipeResult<T>>,
}

impl<T> Future for Settlement<T> {
  type Output = PipeResult<T>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    match Pin::new(&mut self.get_mut().rx).poll(cx) {
      Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
      Poll::Ready(Err(_closed)) => Poll::Ready(Err(PipeError::NeverSettled)),
      Poll::Pending => Poll::Pending,
    }
  }
}

/// The implicit final stage of every invocation: whatever value falls through
/// the whole chain settles the result.
pub(crate) fn terminal_stage<T>(settler: Settler<T>) -> Stage<T>
where
  T: Send + Sync + 'static,
{
  Arc::new(move |value: T| {
    settler.fulfill(value);
    StageOutput::Detached
  })
}
