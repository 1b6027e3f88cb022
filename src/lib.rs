// src/lib.rs

//! Sluice: a generic combinator for sequential, interruptible ASYNC pipelines.
//!
//! Sluice lets you chain an ordered list of stage functions into a single
//! invokable pipeline, with features like:
//!  - A short-circuit predicate evaluated on every stage's output; the moment
//!    it rejects a value, remaining stages are skipped and the pipeline
//!    settles with that value.
//!  - Pluggable middleware interleaved between every two adjacent stages.
//!  - Stages that may return plain values or deferred (future) values; the
//!    built-in deferred-aware middleware resolves the latter before the
//!    predicate runs.
//!  - A one-shot settlement: every invocation yields a future that settles
//!    exactly once, through normal completion or an early short-circuit.
//!
//! Sluice performs no data transformation of its own: stage logic is entirely
//! caller-supplied. There is no retry, no cancellation of in-flight stage
//! work, and no shared state between invocations.

pub mod compose;
pub mod core;
pub mod error;
pub mod middleware;
pub mod pipeline;

// --- Re-exports for the Public API ---

// Building blocks callers interact with frequently
pub use crate::core::predicate::{predicate, CanProceed, Predicate};
pub use crate::core::stage::{stage, DeferredValue, Stage, StageOutput};

// The functional composer; load-bearing for merging multiple middleware
pub use crate::compose::{compose, Composable};

// Middleware surface: the callable aliases plus the built-in interceptors
pub use crate::middleware::{deferred_gate, gate, Middleware, MiddlewareFactory, Next};

// The chained-stage composer
pub use crate::pipeline::chain::compose_chain;

// The pipeline factory: the sole entry point most consumers import
pub use crate::pipeline::factory::{pipe, Invoker, Pipe, PipeSetup};

// Settlement handles, also useful to custom middleware authors
pub use crate::pipeline::settlement::{settlement, Settlement, Settler};

pub use crate::error::{PipeError, PipeResult};

/*
    Core Workflow:
    1. Build a `PipeSetup<T>`: either a configuration with an optional
       short-circuit predicate, or a leading middleware factory.
    2. Call `pipe(setup, more_middleware)` to obtain a `Pipe<T>`, the
       pipeline generator. Configuration is resolved once, here.
    3. Call `pipe.through(stages)` with the ordered stage functions to obtain
       an `Invoker<T>`.
    4. Call `invoker.invoke(initial_value)`; it returns a `Settlement<T>`
       synchronously, before the stages have necessarily finished.
    5. `.await` the settlement for the pipeline's final value.
*/
