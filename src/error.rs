// sluice/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipeError {
    #[error(
        "Pipeline never settled: every settlement handle was dropped before a result was produced \
         (the terminal stage was never reached and no middleware settled the result)"
    )]
    NeverSettled,

    #[error("Pipeline aborted by middleware. Source: {source}")]
    Aborted {
        #[source]
        source: AnyhowError,
    },
}

pub type PipeResult<T, E = PipeError> = std::result::Result<T, E>;
