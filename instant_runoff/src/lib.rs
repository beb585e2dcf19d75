/*!
Instant-runoff (ranked-choice) tabulation.

The engine takes ranked ballots, counts first choices round after round,
eliminates the weakest candidate and stops as soon as some candidates hold a
majority of all the ballots. See the [manual] for the counting rules and for
the `irvtally` command line program.

```
use instant_runoff::{run_instant_runoff, Ballot, RandomTieBreaker};

let names = |ns: &[&str]| -> Vec<String> { ns.iter().map(|s| s.to_string()).collect() };
let mut ballots = vec![
    Ballot::new("1", &names(&["A", "B"])),
    Ballot::new("2", &names(&["A", "B"])),
    Ballot::new("3", &names(&["B", "A"])),
];
let result = run_instant_runoff(&mut ballots, &mut RandomTieBreaker::with_seed(1))?;
assert_eq!(result.winners, vec!["A".to_string()]);
# Ok::<(), instant_runoff::TabulationError>(())
```
*/
pub mod builder;
mod config;
mod engine;
pub mod manual;
pub mod tally;
mod tiebreak;

pub use crate::builder::run_election;
pub use crate::config::*;
pub use crate::engine::{is_majority, run_instant_runoff};
pub use crate::tiebreak::{CandidateOrderTieBreaker, RandomTieBreaker, TieBreaker};
