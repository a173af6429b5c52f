use std::io;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("work stack grew past {frames} frames evaluating with param {param}")]
    DepthExceeded { param: u16, frames: usize },
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("candidate {candidate} failed: {source}")]
    Eval {
        candidate: u16,
        #[source]
        source: EvalError,
    },
    #[error("failed to write search output: {0}")]
    Io(#[from] io::Error),
}
