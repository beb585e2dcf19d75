use std::collections::{HashMap, HashSet};

use crate::config::Ballot;

/// Counts the first choices of the ballots.
///
/// Exhausted ballots do not contribute. A candidate that is nobody's first
/// choice does not appear in the result, even if it is still ranked on some
/// ballot.
pub fn compute_tally(ballots: &[Ballot]) -> HashMap<String, u64> {
    let mut tally: HashMap<String, u64> = HashMap::new();
    for b in ballots.iter() {
        if let Some(first) = b.first_choice() {
            *tally.entry(first.to_string()).or_insert(0) += 1;
        }
    }
    tally
}

/// Number of distinct candidates ranked on at least one ballot.
pub fn count_candidates(ballots: &[Ballot]) -> usize {
    let all: HashSet<&str> = ballots
        .iter()
        .flat_map(|b| b.ranking().iter().map(|s| s.as_str()))
        .collect();
    all.len()
}

/// Orders a tally by increasing count. Candidates with the same count are
/// ordered by name, so the result does not depend on the map's iteration order.
pub fn sort_tally(tally: &HashMap<String, u64>) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = tally.iter().map(|(c, vc)| (c.clone(), *vc)).collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    // Stable: keeps the name order among equal counts.
    sorted.sort_by_key(|(_, vc)| *vc);
    sorted
}
