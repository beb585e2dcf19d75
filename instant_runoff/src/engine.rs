use log::{debug, info};

use std::collections::{BTreeMap, HashMap};

use crate::config::*;
use crate::tally::{compute_tally, count_candidates, sort_tally};
use crate::tiebreak::TieBreaker;

type RoundId = u32;

/// Runs instant-runoff rounds over the ballots until some candidates hold a
/// majority of all the ballots.
///
/// The ballots are modified in place: every eliminated candidate is removed
/// from every ranking. A ballot with nobody left is exhausted. It no longer
/// counts for anybody, but it stays in the majority denominator.
///
/// Arguments:
/// * `ballots` the ballots to count. They are consumed by the elimination
///   rounds and should not be reused for another tabulation.
/// * `tie_breaker` selects the candidate to eliminate when several candidates
///   share the lowest count.
pub fn run_instant_runoff(
    ballots: &mut Vec<Ballot>,
    tie_breaker: &mut dyn TieBreaker,
) -> Result<ElectionResult, TabulationError> {
    let total_ballots = ballots.len() as u64;
    // Computed once, before any ballot shrinks.
    let num_candidates = count_candidates(ballots) as u32;
    let threshold = total_ballots / 2 + 1;
    info!(
        "run_instant_runoff: Processing {} ballots, {} candidates (winning threshold: {})",
        total_ballots, num_candidates, threshold
    );

    let mut round_stats: Vec<RoundStats> = Vec::new();
    let mut round_id: RoundId = 1;
    loop {
        let tally = compute_tally(ballots);
        if tally.is_empty() {
            info!("Round {}: no candidate left on any ballot", round_id);
            return Err(TabulationError::NoCandidatesRemaining { round: round_id });
        }
        // Every eliminating round removes one of the candidates, so the
        // tally is empty by round num_candidates + 1 at the latest.
        if round_id > num_candidates + 1 {
            return Err(TabulationError::RoundBoundExceeded {
                rounds: round_id - 1,
            });
        }

        let sorted_tally = tally_view(&tally);
        let stats = run_one_round(ballots, &sorted_tally, total_ballots, round_id, tie_breaker)?;
        let decided = !stats.tally_results_elected.is_empty();
        let winners = stats.tally_results_elected.clone();
        round_stats.push(stats);

        if decided {
            return Ok(ElectionResult {
                winners,
                threshold,
                total_ballots,
                round_stats,
            });
        }
        round_id += 1;
    }
}

fn tally_view(tally: &HashMap<String, u64>) -> Vec<(String, u64)> {
    let sorted = sort_tally(tally);
    debug!("tally_view: {:?}", sorted);
    sorted
}

/// Returns true when the count is a majority of all the ballots.
pub fn is_majority(votes: u64, total_ballots: u64) -> bool {
    2 * votes > total_ballots
}

fn run_one_round(
    ballots: &mut [Ballot],
    sorted_tally: &[(String, u64)],
    total_ballots: u64,
    round_id: RoundId,
    tie_breaker: &mut dyn TieBreaker,
) -> Result<RoundStats, TabulationError> {
    let (min_votes, max_votes) = match (sorted_tally.first(), sorted_tally.last()) {
        (Some((_, min)), Some((_, max))) => (*min, *max),
        _ => return Err(TabulationError::NoCandidatesRemaining { round: round_id }),
    };
    let exhausted = ballots.iter().filter(|b| b.is_exhausted()).count() as u64;

    info!("Round {} (first choice votes):", round_id);
    for (name, count) in sorted_tally.iter() {
        info!("      {} {}", count, name);
    }

    // Both lists are in name order: the sort is stable for equal counts.
    let best_candidates: Vec<String> = sorted_tally
        .iter()
        .filter(|(_, vc)| *vc == max_votes)
        .map(|(c, _)| c.clone())
        .collect();
    let worst_candidates: Vec<String> = sorted_tally
        .iter()
        .filter(|(_, vc)| *vc == min_votes)
        .map(|(c, _)| c.clone())
        .collect();
    debug!(
        "run_one_round: best_candidates: {:?} worst_candidates: {:?}",
        best_candidates, worst_candidates
    );

    let mut stats = RoundStats {
        round: round_id,
        tally: sorted_tally.to_vec(),
        exhausted,
        best_candidates: best_candidates.clone(),
        worst_candidates: worst_candidates.clone(),
        tally_results_elected: Vec::new(),
        tally_result_eliminated: None,
    };

    if is_majority(max_votes, total_ballots) {
        info!(
            "Round {}: {} votes is a majority of {} ballots, elected: {:?}",
            round_id, max_votes, total_ballots, best_candidates
        );
        stats.tally_results_elected = best_candidates;
        return Ok(stats);
    }
    info!(
        "Round {}: {} votes is not a majority of {} ballots",
        round_id, max_votes, total_ballots
    );

    let eliminated = select_eliminated(&worst_candidates, round_id, tie_breaker)?;
    let elimination = eliminate_candidate(ballots, &eliminated);
    info!(
        "Round {}: eliminated {} ({} transfers, {} exhausted)",
        round_id,
        eliminated,
        elimination.transfers.len(),
        elimination.exhausted
    );
    debug!("run_one_round: elimination: {:?}", elimination);
    stats.tally_result_eliminated = Some(elimination);
    Ok(stats)
}

fn select_eliminated(
    worst_candidates: &[String],
    round_id: RoundId,
    tie_breaker: &mut dyn TieBreaker,
) -> Result<String, TabulationError> {
    match worst_candidates {
        [] => Err(TabulationError::TieBreakUnavailable { round: round_id }),
        [single] => Ok(single.clone()),
        _ => {
            let idx = tie_breaker.pick(round_id, worst_candidates);
            let picked = worst_candidates
                .get(idx)
                .ok_or(TabulationError::TieBreakUnavailable { round: round_id })?;
            info!(
                "Round {}: tie between {:?}, selected {} for elimination",
                round_id, worst_candidates, picked
            );
            Ok(picked.clone())
        }
    }
}

/// Removes the candidate from all the ballots and records where the ballots
/// that had it as first choice went.
fn eliminate_candidate(ballots: &mut [Ballot], name: &str) -> EliminationStats {
    let mut transfers: BTreeMap<String, u64> = BTreeMap::new();
    let mut exhausted: u64 = 0;
    for b in ballots.iter_mut() {
        let was_first = b.first_choice() == Some(name);
        if b.remove_candidate(name) && was_first {
            match b.first_choice() {
                Some(next) => *transfers.entry(next.to_string()).or_insert(0) += 1,
                None => exhausted += 1,
            }
        }
    }
    EliminationStats {
        name: name.to_string(),
        transfers: transfers.into_iter().collect(),
        exhausted,
    }
}
