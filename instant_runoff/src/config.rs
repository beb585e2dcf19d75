// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One voter's preferences.
///
/// The ranking holds candidate names, the most preferred first. A name
/// appears at most once. The ranking only shrinks during a tabulation, as
/// eliminated candidates are removed from it.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    id: String,
    ranking: Vec<String>,
}

impl Ballot {
    /// Creates a ballot.
    ///
    /// Empty names are dropped. When a name is repeated, only its first (best)
    /// position is kept.
    pub fn new(id: impl Into<String>, ranking: &[String]) -> Ballot {
        let mut clean: Vec<String> = Vec::with_capacity(ranking.len());
        for name in ranking {
            if !name.is_empty() && !clean.contains(name) {
                clean.push(name.clone());
            }
        }
        Ballot {
            id: id.into(),
            ranking: clean,
        }
    }

    /// The opaque token identifying this ballot. It plays no role in the count.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ranking(&self) -> &[String] {
        &self.ranking
    }

    /// The most preferred candidate still in the ranking.
    pub fn first_choice(&self) -> Option<&str> {
        self.ranking.first().map(|s| s.as_str())
    }

    /// A ballot is exhausted when all of its candidates have been eliminated.
    pub fn is_exhausted(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Removes a candidate wherever it sits in the ranking.
    /// Returns true if the candidate was present.
    pub(crate) fn remove_candidate(&mut self, name: &str) -> bool {
        let before = self.ranking.len();
        self.ranking.retain(|c| c != name);
        self.ranking.len() != before
    }
}

// ******** Output data structures *********

/// What happened to the ballots of an eliminated candidate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationStats {
    pub name: String,
    /// The candidates that received the ballots, in name order.
    pub transfers: Vec<(String, u64)>,
    /// The ballots that had no other candidate left.
    pub exhausted: u64,
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// First-choice counts, ordered by increasing count and then by name.
    pub tally: Vec<(String, u64)>,
    /// Ballots with no candidate left when the round started.
    pub exhausted: u64,
    pub best_candidates: Vec<String>,
    pub worst_candidates: Vec<String>,
    pub tally_results_elected: Vec<String>,
    pub tally_result_eliminated: Option<EliminationStats>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResult {
    /// One name, or several when they tie with a majority. Sorted by name.
    pub winners: Vec<String>,
    /// The smallest number of votes that makes a majority.
    pub threshold: u64,
    pub total_ballots: u64,
    pub round_stats: Vec<RoundStats>,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TabulationError {
    /// No ballot has a candidate left, and nobody reached a majority.
    NoCandidatesRemaining { round: u32 },
    /// The elimination did not converge within the number of candidates.
    RoundBoundExceeded { rounds: u32 },
    /// A tie among the lowest candidates could not be broken.
    TieBreakUnavailable { round: u32 },
}

impl Error for TabulationError {}

impl Display for TabulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabulationError::NoCandidatesRemaining { round } => write!(
                f,
                "round {}: no candidate remains on any ballot and no candidate reached a majority",
                round
            ),
            TabulationError::RoundBoundExceeded { rounds } => write!(
                f,
                "no winner after {} rounds, the elimination did not converge",
                rounds
            ),
            TabulationError::TieBreakUnavailable { round } => write!(
                f,
                "round {}: could not select a candidate to eliminate",
                round
            ),
        }
    }
}

// ********* Configuration **********

/// How to choose the candidate to eliminate when several candidates share
/// the lowest number of votes.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Uniform choice, seeded from the operating system.
    Random,
    /// Uniform choice from a fixed seed. Two runs with the same seed and the
    /// same ballots eliminate the same candidates.
    Seeded(u64),
    /// Eliminates the first of the tied candidates in name order.
    UseCandidateOrder,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRules {
    pub tiebreak_mode: TieBreakMode,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        tiebreak_mode: TieBreakMode::Random,
    };
}

impl Default for VoteRules {
    fn default() -> Self {
        VoteRules::DEFAULT_RULES
    }
}
