// sluice/src/pipeline/mod.rs

//! The pipeline itself: chain composition, the one-shot settlement, and the
//! `pipe` factory that ties them together.

pub mod chain;
pub mod factory;
pub mod settlement;

pub use factory::{pipe, Invoker, Pipe, PipeSetup};
pub use settlement::{Settlement, Settler};
