//! The teleporter's modified Ackermann function.
//!
//! ```text
//! A(0, b) = b + 1
//! A(a, 0) = A(a - 1, k)
//! A(a, b) = A(a - 1, A(a, b - 1))
//! ```
//!
//! Everything is taken modulo 32768 and `k` stays fixed for a whole
//! evaluation tree. Evaluation runs on an explicit work stack instead of
//! native recursion, memoizing every `a > 0` result for the current `k`.

use log::trace;

use crate::cache::MemoTable;
use crate::error::EvalError;
use crate::mod_arith::{mod_dec, mod_inc, reduce, MODULUS};

/// Work stack budget for a single evaluation. Terminating inputs keep at
/// most two pending frames per distinct `(a, b)` pair.
pub const DEFAULT_MAX_FRAMES: usize = 1 << 22;

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// Evaluate `A(a, b)`.
    Call { a: u16, b: u16 },
    /// Feed the last result into `A(a - 1, _)`.
    Outer { a: u16 },
    /// Memoize the last result under `(a, b)`.
    Store { a: u16, b: u16 },
}

#[derive(Debug)]
pub struct Evaluator {
    param: u16,
    cache: MemoTable,
    stack: Vec<Frame>,
    max_frames: usize,
    peak_frames: usize,
}

impl Evaluator {
    pub fn new(param: u16) -> Self {
        Self::with_max_frames(param, DEFAULT_MAX_FRAMES)
    }

    pub fn with_max_frames(param: u16, max_frames: usize) -> Self {
        Evaluator {
            param,
            cache: MemoTable::new(),
            stack: Vec::new(),
            max_frames,
            peak_frames: 0,
        }
    }

    pub fn param(&self) -> u16 {
        self.param
    }

    /// Switches to `param`, dropping every result memoized for the old one.
    /// The cache key does not include the parameter, so this must happen
    /// before each new candidate.
    pub fn reset(&mut self, param: u16) {
        self.param = param;
        self.cache.clear();
        self.stack.clear();
        self.peak_frames = 0;
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn peak_frames(&self) -> usize {
        self.peak_frames
    }

    pub fn evaluate(&mut self, a: u16, b: u16) -> Result<u16, EvalError> {
        self.stack.clear();
        self.stack.push(Frame::Call { a, b });
        let mut ret = 0;
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Call { a, b } => {
                    let (a, b) = (reduce(a, MODULUS), reduce(b, MODULUS));
                    if a == 0 {
                        ret = mod_inc(b, MODULUS);
                    } else if let Some(v) = self.cache.get(a, b) {
                        ret = v;
                    } else {
                        self.stack.push(Frame::Store { a, b });
                        if b == 0 {
                            self.stack.push(Frame::Call { a: mod_dec(a, MODULUS), b: self.param });
                        } else {
                            self.stack.push(Frame::Outer { a });
                            self.stack.push(Frame::Call { a, b: mod_dec(b, MODULUS) });
                        }
                        self.check_depth()?;
                    }
                }
                Frame::Outer { a } => {
                    self.stack.push(Frame::Call { a: mod_dec(a, MODULUS), b: ret });
                }
                Frame::Store { a, b } => {
                    let prev = self.cache.insert(a, b, ret);
                    debug_assert!(prev.is_none(), "({}, {}) memoized twice", a, b);
                }
            }
        }
        trace!(
            "A({}, {}) = {} with param {} ({} memoized, peak stack {})",
            a, b, ret, self.param, self.cache.len(), self.peak_frames
        );
        Ok(ret)
    }

    fn check_depth(&mut self) -> Result<(), EvalError> {
        let frames = self.stack.len();
        if frames > self.peak_frames {
            self.peak_frames = frames;
        }
        if frames > self.max_frames {
            self.stack.clear();
            return Err(EvalError::DepthExceeded { param: self.param, frames });
        }
        Ok(())
    }
}

/// Evaluates `A(a, b)` for `param` from a fresh cache.
pub fn evaluate_with_param(param: u16, a: u16, b: u16) -> Result<u16, EvalError> {
    Evaluator::new(param).evaluate(a, b)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn memo_ack(memo: &mut HashMap<(u16, u16), u16>, a: u16, b: u16, c: u16) -> u16 {
        if a == 0 {
            return (b + 1) % 32768;
        }
        if let Some(ans) = memo.get(&(a, b)) {
            return *ans;
        }
        let ret = if b == 0 {
            memo_ack(memo, a - 1, c, c)
        } else {
            let intermediate = memo_ack(memo, a, b - 1, c);
            memo_ack(memo, a - 1, intermediate, c)
        };
        memo.insert((a, b), ret);
        ret
    }

    fn ack(param: u16, a: u16, b: u16) -> u16 {
        evaluate_with_param(param, a, b).unwrap()
    }

    #[test]
    fn base_case_is_successor() {
        for &k in &[0, 1, 7, 25734, MODULUS - 1] {
            for &b in &[0, 1, 6, 1000, MODULUS - 1] {
                assert_eq!(ack(k, 0, b), (b + 1) % MODULUS);
            }
        }
    }

    #[test]
    fn arguments_are_reduced() {
        assert_eq!(ack(3, MODULUS, 5), 6);
        assert_eq!(ack(3, 1 + MODULUS, 2 + MODULUS), ack(3, 1, 2));
    }

    #[test]
    fn level_one_adds_param() {
        for &k in &[0_u32, 1, 2, 100, 32767] {
            for &b in &[0_u32, 1, 5, 32767] {
                let expected = ((b + k + 1) % 32768) as u16;
                assert_eq!(ack(k as u16, 1, b as u16), expected, "k={} b={}", k, b);
            }
        }
    }

    #[test]
    fn level_two_entry() {
        for k in 0..50_u32 {
            assert_eq!(ack(k as u16, 2, 1), ((3 * k + 2) % 32768) as u16);
        }
    }

    #[test]
    fn matches_recursive_reference() {
        for k in 0..6 {
            let mut memo = HashMap::new();
            for a in 0..=2 {
                for b in 0..20 {
                    assert_eq!(ack(k, a, b), memo_ack(&mut memo, a, b, k), "k={} a={} b={}", k, a, b);
                }
            }
        }
    }

    #[test]
    fn reference_answer_reaches_six() {
        assert_eq!(ack(25734, 4, 1), 6);
    }

    #[test]
    fn deterministic() {
        let first = ack(1234, 4, 1);
        assert_eq!(ack(1234, 4, 1), first);
        let mut ev = Evaluator::new(1234);
        assert_eq!(ev.evaluate(4, 1), Ok(first));
        assert_eq!(ev.evaluate(4, 1), Ok(first));
    }

    #[test]
    fn reset_isolates_parameters() {
        let fresh = ack(42, 4, 1);
        let mut ev = Evaluator::new(17);
        ev.evaluate(4, 1).unwrap();
        assert!(ev.cache_len() > 0);
        ev.reset(42);
        assert_eq!(ev.cache_len(), 0);
        assert_eq!(ev.param(), 42);
        assert_eq!(ev.evaluate(4, 1), Ok(fresh));
    }

    #[test]
    fn frame_budget_is_enforced() {
        let mut ev = Evaluator::with_max_frames(9, 16);
        assert_eq!(ev.evaluate(2, 1), Err(EvalError::DepthExceeded { param: 9, frames: 18 }));
        ev.reset(9);
        assert_eq!(ev.evaluate(0, 4), Ok(5));
    }

    #[test]
    fn peak_depth_is_tracked() {
        let mut ev = Evaluator::new(3);
        ev.evaluate(1, 10).unwrap();
        assert!(ev.peak_frames() >= 10);
        assert!(ev.peak_frames() <= 2 * ev.cache_len() + 1);
    }
}
