//! Search for the teleporter parameter: the smallest `k` for which the
//! modified Ackermann function `A(4, 1)`, with `k` substituted on every
//! `b == 0` step and all arithmetic modulo 32768, evaluates to 6.

pub mod ack;
pub mod cache;
pub mod error;
pub mod mod_arith;
pub mod search;

pub use ack::{evaluate_with_param, Evaluator};
pub use error::{EvalError, SearchError};
pub use search::{find_target, SearchConfig, SearchOutcome};
