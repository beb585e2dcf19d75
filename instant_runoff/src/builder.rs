pub use crate::config::*;
use crate::engine::run_instant_runoff;

/// A builder for collecting ballots and running an election.
///
/// ```
/// pub use instant_runoff::builder::Builder;
/// pub use instant_runoff::{TieBreakMode, VoteRules};
/// # use instant_runoff::TabulationError;
///
/// let rules = VoteRules { tiebreak_mode: TieBreakMode::Seeded(42) };
/// let mut builder = Builder::new(&rules);
///
/// builder.add_ballot("ballot-1", &["Anna".to_string(), "Bob".to_string()]);
/// builder.add_ballot("ballot-2", &["Anna".to_string()]);
/// builder.add_ballot("ballot-3", &["Bob".to_string(), "Anna".to_string()]);
///
/// let result = builder.run()?;
/// assert_eq!(result.winners, vec!["Anna".to_string()]);
/// # Ok::<(), TabulationError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: VoteRules,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(rules: &VoteRules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _ballots: Vec::new(),
        }
    }

    /// Adds a ballot.
    ///
    /// candidates: the choices of the voter, most preferred first. Empty names
    /// are ignored and repeated names only count at their first position. A
    /// ballot without any candidate is still recorded: it counts towards the
    /// total number of ballots used for the majority.
    pub fn add_ballot(&mut self, id: &str, candidates: &[String]) {
        self.add_ballot_2(Ballot::new(id, candidates))
    }

    pub fn add_ballot_2(&mut self, ballot: Ballot) {
        self._ballots.push(ballot);
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self._ballots
    }

    /// Runs the election with the tie-break mode of the rules.
    pub fn run(self) -> Result<ElectionResult, TabulationError> {
        run_election(self._ballots, &self._rules)
    }
}

/// Runs an election over the ballots.
pub fn run_election(
    mut ballots: Vec<Ballot>,
    rules: &VoteRules,
) -> Result<ElectionResult, TabulationError> {
    let mut tie_breaker = rules.tiebreak_mode.tie_breaker();
    run_instant_runoff(&mut ballots, tie_breaker.as_mut())
}
