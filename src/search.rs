use std::io::{self, Write};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::ack::{Evaluator, DEFAULT_MAX_FRAMES};
use crate::error::SearchError;
use crate::mod_arith::MODULUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(u16),
    NotFound,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub target: u16,
    /// Arguments `(a, b)` every candidate is evaluated at.
    pub entry: (u16, u16),
    pub first_candidate: u16,
    /// Exclusive upper bound on candidates.
    pub max_k: u16,
    /// Print a progress line for candidates divisible by this; 0 disables.
    pub progress_stride: u16,
    pub max_frames: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            target: 6,
            entry: (4, 1),
            first_candidate: 1,
            max_k: MODULUS,
            progress_stride: 500,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

fn stopped(stop: Option<&AtomicBool>) -> bool {
    stop.map_or(false, |s| s.load(Ordering::Relaxed))
}

impl SearchConfig {
    pub fn candidates(&self) -> Range<u16> {
        self.first_candidate..self.max_k
    }

    /// Tries candidates in increasing order with one reused evaluator,
    /// stopping at the first whose evaluation equals the target.
    pub fn search<W: Write>(&self, out: &mut W, stop: Option<&AtomicBool>) -> Result<SearchOutcome, SearchError> {
        let (a, b) = self.entry;
        info!("searching {:?} for A({}, {}) == {}", self.candidates(), a, b, self.target);
        let mut evaluator = Evaluator::with_max_frames(self.first_candidate, self.max_frames);
        for k in self.candidates() {
            if stopped(stop) {
                warn!("search interrupted before candidate {}", k);
                return Ok(SearchOutcome::Interrupted);
            }
            if self.progress_stride != 0 && k % self.progress_stride == 0 {
                writeln!(out, "{}", k)?;
                out.flush()?;
                debug!("reached candidate {}", k);
            }
            evaluator.reset(k);
            let value = evaluator.evaluate(a, b)
                .map_err(|source| SearchError::Eval { candidate: k, source })?;
            if value == self.target {
                return self.report(out, SearchOutcome::Found(k));
            }
        }
        self.report(out, SearchOutcome::NotFound)
    }

    /// Same answer as [`SearchConfig::search`], with candidates spread over
    /// the rayon pool. Every worker owns its own evaluator. No progress
    /// lines are printed.
    pub fn search_parallel<W: Write>(&self, out: &mut W, stop: Option<&AtomicBool>) -> Result<SearchOutcome, SearchError> {
        let (a, b) = self.entry;
        let target = self.target;
        let max_frames = self.max_frames;
        info!(
            "searching {:?} for A({}, {}) == {} on {} threads",
            self.candidates(), a, b, target, rayon::current_num_threads()
        );
        let hit = self.candidates()
            .into_par_iter()
            .map_init(
                || Evaluator::with_max_frames(0, max_frames),
                |evaluator, k| {
                    if stopped(stop) {
                        return Ok(None);
                    }
                    evaluator.reset(k);
                    match evaluator.evaluate(a, b) {
                        Ok(value) if value == target => Ok(Some(k)),
                        Ok(_) => Ok(None),
                        Err(source) => Err(SearchError::Eval { candidate: k, source }),
                    }
                },
            )
            .find_first(|r| !matches!(r, Ok(None)));
        match hit {
            Some(Ok(Some(k))) => self.report(out, SearchOutcome::Found(k)),
            Some(Err(e)) => Err(e),
            _ if stopped(stop) => {
                warn!("parallel search interrupted");
                Ok(SearchOutcome::Interrupted)
            }
            _ => self.report(out, SearchOutcome::NotFound),
        }
    }

    fn report<W: Write>(&self, out: &mut W, outcome: SearchOutcome) -> Result<SearchOutcome, SearchError> {
        match outcome {
            SearchOutcome::Found(k) => {
                info!("candidate {} gives {}", k, self.target);
                writeln!(out, "RESULT: {}", k)?;
            }
            SearchOutcome::NotFound => {
                info!("no candidate matched {}", self.target);
                writeln!(out, "no solution in [{}, {})", self.first_candidate, self.max_k)?;
            }
            SearchOutcome::Interrupted => (),
        }
        out.flush()?;
        Ok(outcome)
    }
}

/// Smallest `k` in `[1, max_k)` with `A(4, 1) == target`, printing progress
/// and the result to stdout.
pub fn find_target(target: u16, max_k: u16) -> Result<Option<u16>, SearchError> {
    let config = SearchConfig { target, max_k, ..SearchConfig::default() };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.search(&mut out, None)? {
        SearchOutcome::Found(k) => Ok(Some(k)),
        _ => Ok(None),
    }
}
