// sluice/src/pipeline/factory.rs

//! The pipeline factory: configuration resolution, the pipeline generator,
//! and the per-invocation wiring.

use crate::compose::compose;
use crate::core::predicate::{default_predicate, predicate, CanProceed, Predicate};
use crate::core::stage::{Stage, StageOutput};
use crate::middleware::{gate, Middleware, MiddlewareFactory};
use crate::pipeline::chain::compose_chain;
use crate::pipeline::settlement::{settlement, terminal_stage, Settlement};
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// The first argument to [`pipe`]: either a configuration or a leading
/// middleware factory.
///
/// This union replaces the runtime type probing of a dynamically-typed
/// surface ("is the first argument an options object or a function?") with a
/// closed set of variants, resolved to canonical form once, at
/// generator-construction time.
pub enum PipeSetup<T> {
  /// Explicit configuration. `can_do_next: None` selects the default
  /// predicate, `T`'s [`CanProceed`] implementation.
  Config { can_do_next: Option<Predicate<T>> },
  /// A middleware factory to prepend to the middleware list; the default
  /// predicate is used.
  Middleware(MiddlewareFactory<T>),
}

impl<T: Send + Sync + 'static> PipeSetup<T> {
  /// Configuration with the default predicate.
  pub fn default_config() -> Self {
    PipeSetup::Config { can_do_next: None }
  }

  /// Configuration with an explicit short-circuit predicate.
  pub fn with_predicate<F>(f: F) -> Self
  where
    F: Fn(&T) -> bool + Send + Sync + 'static,
  {
    PipeSetup::Config {
      can_do_next: Some(predicate(f)),
    }
  }

  /// A leading middleware factory (the default predicate is used).
  pub fn middleware(factory: MiddlewareFactory<T>) -> Self {
    PipeSetup::Middleware(factory)
  }
}

/// Builds a pipeline generator.
///
/// Resolves `setup` and `middleware` to the canonical form (a predicate plus
/// a non-empty middleware factory list) exactly once; every pipeline the
/// returned [`Pipe`] generates reuses this configuration. If the resolved
/// middleware list is empty, the default [`gate`] middleware is used.
pub fn pipe<T>(setup: PipeSetup<T>, middleware: Vec<MiddlewareFactory<T>>) -> Pipe<T>
where
  T: CanProceed + Send + Sync + 'static,
{
  let (can_do_next, mut factories) = match setup {
    PipeSetup::Config { can_do_next } => {
      (can_do_next.unwrap_or_else(default_predicate), middleware)
    }
    PipeSetup::Middleware(lead) => {
      let mut all = Vec::with_capacity(middleware.len() + 1);
      all.push(lead);
      all.extend(middleware);
      (default_predicate(), all)
    }
  };

  // There must always be a middleware to decide whether to continue.
  if factories.is_empty() {
    factories.push(gate());
  }

  Pipe {
    can_do_next,
    middleware: Arc::from(factories),
  }
}

/// A pipeline generator: the configuration captured by [`pipe`], waiting for
/// stage functions.
pub struct Pipe<T> {
  can_do_next: Predicate<T>,
  middleware: Arc<[MiddlewareFactory<T>]>,
}

impl<T> Clone for Pipe<T> {
  fn clone(&self) -> Self {
    Pipe {
      can_do_next: self.can_do_next.clone(),
      middleware: self.middleware.clone(),
    }
  }
}

impl<T> Pipe<T>
where
  T: Send + Sync + 'static,
{
  /// Combines the ordered stage functions into an [`Invoker`].
  pub fn through(&self, stages: Vec<Stage<T>>) -> Invoker<T> {
    Invoker {
      can_do_next: self.can_do_next.clone(),
      middleware: self.middleware.clone(),
      stages,
    }
  }
}

/// An invokable pipeline over a fixed stage list. Invocations are fully
/// independent: each one builds its own middleware instances, chain, and
/// settlement, so concurrent invocations never interfere.
pub struct Invoker<T> {
  can_do_next: Predicate<T>,
  middleware: Arc<[MiddlewareFactory<T>]>,
  stages: Vec<Stage<T>>,
}

impl<T> Invoker<T>
where
  T: Send + Sync + 'static,
{
  /// Executes the pipeline with `initial` as the first stage's input.
  ///
  /// Construction happens in a fixed order before any stage runs: settlement
  /// pair, per-invocation middleware instances, merged interceptor, composed
  /// chain. The chain is then invoked and its return value discarded; the
  /// [`Settlement`] is returned synchronously, before the stages have
  /// necessarily finished.
  ///
  /// A panic in a stage propagates out of this call; it is not converted
  /// into the settlement's failure channel.
  #[instrument(
        name = "Invoker::invoke",
        skip_all,
        fields(
            value_type = %std::any::type_name::<T>(),
            num_stages = self.stages.len(),
            num_middleware = self.middleware.len(),
        )
    )]
  pub fn invoke(&self, initial: T) -> Settlement<T> {
    event!(Level::DEBUG, "Pipeline invocation starting.");

    let (settler, outcome) = settlement::<T>();

    let decorators: Vec<Middleware<T>> = self
      .middleware
      .iter()
      .map(|factory| factory(self.can_do_next.clone(), settler.clone()))
      .collect();
    let interceptor = compose(decorators);

    let mut stages: Vec<Stage<T>> = Vec::with_capacity(self.stages.len() + 1);
    stages.extend(self.stages.iter().cloned());
    stages.push(terminal_stage(settler));

    let chain = compose_chain(&stages, interceptor);
    let _ = chain(StageOutput::Ready(initial));

    event!(Level::DEBUG, "Chain dispatched; returning settlement.");
    outcome
  }
}
