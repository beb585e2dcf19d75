use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TieBreakMode;

/// Selects the candidate to eliminate among the candidates tied for the
/// fewest votes.
///
/// This is the only source of nondeterminism in a tabulation. The candidates
/// are passed in name order, and the implementation returns an index into
/// that slice. The engine only asks when at least two candidates are tied.
/// An empty slice has no valid index: the value returned for it is not
/// specified, and the engine rejects any index that is out of range.
pub trait TieBreaker {
    fn pick(&mut self, round: u32, candidates: &[String]) -> usize;
}

/// Any closure can act as a tie-breaker, which is convenient for tests.
impl<F> TieBreaker for F
where
    F: FnMut(u32, &[String]) -> usize,
{
    fn pick(&mut self, round: u32, candidates: &[String]) -> usize {
        self(round, candidates)
    }
}

/// Uniform random choice.
pub struct RandomTieBreaker {
    rng: StdRng,
}

impl RandomTieBreaker {
    pub fn new() -> Self {
        RandomTieBreaker {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomTieBreaker {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTieBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl TieBreaker for RandomTieBreaker {
    fn pick(&mut self, round: u32, candidates: &[String]) -> usize {
        // No valid index. Returning the length keeps the answer out of range.
        if candidates.is_empty() {
            return candidates.len();
        }
        let idx = self.rng.random_range(0..candidates.len());
        debug!(
            "RandomTieBreaker: round {}: picked {:?} among {:?}",
            round, candidates[idx], candidates
        );
        idx
    }
}

/// Always picks the first candidate in name order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateOrderTieBreaker;

impl TieBreaker for CandidateOrderTieBreaker {
    fn pick(&mut self, _round: u32, _candidates: &[String]) -> usize {
        0
    }
}

impl TieBreakMode {
    pub fn tie_breaker(&self) -> Box<dyn TieBreaker> {
        match *self {
            TieBreakMode::Random => Box::new(RandomTieBreaker::new()),
            TieBreakMode::Seeded(seed) => Box::new(RandomTieBreaker::with_seed(seed)),
            TieBreakMode::UseCandidateOrder => Box::new(CandidateOrderTieBreaker),
        }
    }
}
