use std::collections::HashSet;

use instant_runoff::builder::Builder;
use instant_runoff::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ballots(rankings: &[&[&str]]) -> Vec<Ballot> {
    rankings
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            let names: Vec<String> = r.iter().map(|s| s.to_string()).collect();
            Ballot::new(format!("ballot-{}", idx + 1), &names)
        })
        .collect()
}

fn names(ns: &[&str]) -> Vec<String> {
    ns.iter().map(|s| s.to_string()).collect()
}

fn tally(ns: &[(&str, u64)]) -> Vec<(String, u64)> {
    ns.iter().map(|(n, c)| (n.to_string(), *c)).collect()
}

fn first_in_order(_round: u32, _cands: &[String]) -> usize {
    0
}

fn last_in_order(_round: u32, cands: &[String]) -> usize {
    cands.len() - 1
}

#[test]
fn majority_in_first_round() {
    init();
    let mut bs = ballots(&[&["A", "B"], &["A", "B"], &["B", "A"]]);
    let res = run_instant_runoff(&mut bs, &mut RandomTieBreaker::new()).unwrap();
    assert_eq!(res.winners, names(&["A"]));
    assert_eq!(res.total_ballots, 3);
    assert_eq!(res.threshold, 2);
    assert_eq!(res.round_stats.len(), 1);
    let round = &res.round_stats[0];
    assert_eq!(round.round, 1);
    assert_eq!(round.tally, tally(&[("B", 1), ("A", 2)]));
    assert_eq!(round.tally_results_elected, names(&["A"]));
    assert_eq!(round.tally_result_eliminated, None);
}

#[test]
fn single_preferences_end_without_candidates() {
    init();
    for seed in 0..10 {
        let mut bs = ballots(&[&["A"], &["B"], &["C"]]);
        let res = run_instant_runoff(&mut bs, &mut RandomTieBreaker::with_seed(seed));
        assert_eq!(res, Err(TabulationError::NoCandidatesRemaining { round: 4 }));
        assert!(bs.iter().all(|b| b.is_exhausted()));
    }
}

#[test]
fn two_way_tie_is_not_a_majority() {
    init();
    // 1 vote out of 2 is not more than half: one of the two is eliminated and
    // its ballot moves to the other one.
    let mut bs = ballots(&[&["A", "B"], &["B", "A"]]);
    let res = run_instant_runoff(&mut bs, &mut first_in_order).unwrap();
    assert_eq!(res.round_stats.len(), 2);
    let first = &res.round_stats[0];
    assert_eq!(first.tally, tally(&[("A", 1), ("B", 1)]));
    assert!(first.tally_results_elected.is_empty());
    assert_eq!(first.best_candidates, names(&["A", "B"]));
    assert_eq!(first.worst_candidates, names(&["A", "B"]));
    let elim = first.tally_result_eliminated.clone().unwrap();
    assert_eq!(elim.name, "A");
    assert_eq!(elim.transfers, tally(&[("B", 1)]));
    assert_eq!(res.winners, names(&["B"]));

    let mut bs = ballots(&[&["A", "B"], &["B", "A"]]);
    let res = run_instant_runoff(&mut bs, &mut last_in_order).unwrap();
    assert_eq!(res.winners, names(&["A"]));
}

#[test]
fn two_way_tie_without_second_choices_fails() {
    init();
    let mut bs = ballots(&[&["A"], &["B"]]);
    let res = run_instant_runoff(&mut bs, &mut RandomTieBreaker::with_seed(5));
    assert_eq!(res, Err(TabulationError::NoCandidatesRemaining { round: 3 }));
}

#[test]
fn exhausted_ballots_stay_in_the_denominator() {
    init();
    // C is eliminated first and its ballot is exhausted. B then holds 2 of
    // the 4 ballots still ranking somebody, but not 2 of the 5 ballots.
    let mut bs = ballots(&[&["A"], &["A"], &["B"], &["B"], &["C"]]);
    let res = run_instant_runoff(&mut bs, &mut first_in_order);
    assert_eq!(res, Err(TabulationError::NoCandidatesRemaining { round: 4 }));
}

#[test]
fn exhausted_ballots_do_not_count_for_anybody() {
    init();
    let mut bs = ballots(&[
        &["A"],
        &["A"],
        &["A"],
        &["B", "A"],
        &["B"],
        &["C"],
        &["D", "A"],
    ]);
    let res = run_instant_runoff(&mut bs, &mut first_in_order).unwrap();
    assert_eq!(res.winners, names(&["A"]));
    assert_eq!(res.threshold, 4);

    let rounds = &res.round_stats;
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[0].tally, tally(&[("C", 1), ("D", 1), ("B", 2), ("A", 3)]));
    assert_eq!(rounds[0].exhausted, 0);
    let elim = rounds[0].tally_result_eliminated.clone().unwrap();
    assert_eq!(elim.name, "C");
    assert_eq!(elim.exhausted, 1);
    assert!(elim.transfers.is_empty());

    assert_eq!(rounds[1].exhausted, 1);
    assert_eq!(rounds[1].tally, tally(&[("D", 1), ("B", 2), ("A", 3)]));
    let elim = rounds[1].tally_result_eliminated.clone().unwrap();
    assert_eq!(elim.name, "D");
    assert_eq!(elim.transfers, tally(&[("A", 1)]));

    assert_eq!(rounds[2].tally, tally(&[("B", 2), ("A", 4)]));
    assert_eq!(rounds[2].exhausted, 1);
    let counted: u64 = rounds[2].tally.iter().map(|(_, c)| *c).sum();
    assert_eq!(counted + rounds[2].exhausted, res.total_ballots);
}

fn live_candidates(rankings: &[Vec<String>]) -> HashSet<String> {
    rankings.iter().flatten().cloned().collect()
}

#[test]
fn one_candidate_eliminated_per_round() {
    init();
    let rankings: &[&[&str]] = &[
        &["A", "B", "C"],
        &["A", "C"],
        &["B", "C", "A"],
        &["B", "D"],
        &["C", "E"],
        &["D", "B"],
        &["E", "D", "C"],
        &["F", "E"],
        &["C"],
    ];
    let mut bs = ballots(rankings);
    let res = run_instant_runoff(&mut bs, &mut first_in_order).unwrap();
    assert_eq!(res.winners, names(&["C"]));

    // Replays the eliminations on a copy of the rankings, round by round.
    let mut replay: Vec<Vec<String>> = rankings.iter().map(|r| names(r)).collect();
    let mut live = live_candidates(&replay);
    assert_eq!(live.len(), 6);
    for (idx, round) in res.round_stats.iter().enumerate() {
        assert_eq!(round.round as usize, idx + 1);
        assert!(round.tally.iter().all(|(c, _)| live.contains(c)));
        let last_round = idx + 1 == res.round_stats.len();
        match &round.tally_result_eliminated {
            Some(elim) => {
                assert!(!last_round);
                assert!(round.worst_candidates.contains(&elim.name));
                for r in replay.iter_mut() {
                    r.retain(|c| *c != elim.name);
                }
                let next_live = live_candidates(&replay);
                assert_eq!(next_live.len(), live.len() - 1);
                assert!(!next_live.contains(&elim.name));
                live = next_live;
            }
            None => assert!(last_round),
        }
    }
    let remaining: Vec<Vec<String>> = bs.iter().map(|b| b.ranking().to_vec()).collect();
    assert_eq!(remaining, replay);
}

#[test]
fn seeded_tie_breaks_are_reproducible() {
    init();
    let rankings: &[&[&str]] = &[
        &["A", "B", "C"],
        &["B", "C", "A"],
        &["C", "A", "B"],
        &["D", "A"],
        &["E", "B"],
        &["F"],
    ];
    for seed in 0..20 {
        let mut offered1: Vec<Vec<String>> = Vec::new();
        let mut offered2: Vec<Vec<String>> = Vec::new();
        let mut tb1 = RandomTieBreaker::with_seed(seed);
        let mut tb2 = RandomTieBreaker::with_seed(seed);
        let mut bs1 = ballots(rankings);
        let mut bs2 = ballots(rankings);
        let res1 = run_instant_runoff(&mut bs1, &mut |r: u32, cs: &[String]| -> usize {
            offered1.push(cs.to_vec());
            tb1.pick(r, cs)
        });
        let res2 = run_instant_runoff(&mut bs2, &mut |r: u32, cs: &[String]| -> usize {
            offered2.push(cs.to_vec());
            tb2.pick(r, cs)
        });
        assert_eq!(res1, res2);
        assert_eq!(offered1, offered2);
        assert_eq!(bs1, bs2);
    }
}

#[test]
fn tie_breaker_sees_tied_candidates_in_name_order() {
    init();
    let mut seen: Vec<(u32, Vec<String>)> = Vec::new();
    let mut bs = ballots(&[&["C", "A"], &["B", "A"], &["A"], &["A"], &["D"], &["D"]]);
    let res = run_instant_runoff(&mut bs, &mut |r: u32, cs: &[String]| -> usize {
        seen.push((r, cs.to_vec()));
        0
    })
    .unwrap();
    assert_eq!(seen, vec![(1, names(&["B", "C"]))]);
    // B, then C are eliminated, both transferring to A.
    assert_eq!(res.winners, names(&["A"]));
    assert_eq!(res.round_stats.len(), 3);
}

#[test]
fn empty_elections_have_no_candidates() {
    init();
    let mut none: Vec<Ballot> = Vec::new();
    assert_eq!(
        run_instant_runoff(&mut none, &mut first_in_order),
        Err(TabulationError::NoCandidatesRemaining { round: 1 })
    );
    let mut blanks = ballots(&[&[], &[""]]);
    assert_eq!(
        run_instant_runoff(&mut blanks, &mut first_in_order),
        Err(TabulationError::NoCandidatesRemaining { round: 1 })
    );
}

#[test]
fn ballots_drop_blank_and_repeated_names() {
    let b = Ballot::new("x", &names(&["B", "", "A", "B", "C", "A"]));
    assert_eq!(b.id(), "x");
    assert_eq!(b.ranking(), names(&["B", "A", "C"]).as_slice());
    assert_eq!(b.first_choice(), Some("B"));
    assert!(!b.is_exhausted());
    assert!(Ballot::new("y", &[]).is_exhausted());
}

#[test]
fn builder_runs_with_candidate_order() {
    init();
    let rules = VoteRules {
        tiebreak_mode: TieBreakMode::UseCandidateOrder,
    };
    let mut builder = Builder::new(&rules);
    builder.add_ballot("1", &names(&["Zoe", "Yann"]));
    builder.add_ballot("2", &names(&["Yann", "Zoe"]));
    builder.add_ballot("3", &names(&["Xavier", "Zoe"]));
    builder.add_ballot("4", &[]);
    assert_eq!(builder.ballots().len(), 4);
    // Round 1: all tied at 1, Xavier goes first and transfers to Zoe.
    // Round 2: 2 out of 4 is not a majority, Yann goes.
    let res = builder.run().unwrap();
    assert_eq!(res.winners, names(&["Zoe"]));
    assert_eq!(res.total_ballots, 4);
    assert_eq!(res.round_stats.len(), 3);
    assert_eq!(
        res.round_stats[0].tally_result_eliminated.clone().map(|e| e.name),
        Some("Xavier".to_string())
    );
}

#[test]
fn run_election_with_default_rules() {
    init();
    let bs = ballots(&[&["A"], &["A"], &["B"]]);
    let res = run_election(bs, &VoteRules::DEFAULT_RULES).unwrap();
    assert_eq!(res.winners, names(&["A"]));
}

#[test]
fn errors_are_descriptive() {
    let msg = TabulationError::NoCandidatesRemaining { round: 4 }.to_string();
    assert!(msg.contains("round 4"));
    let msg = TabulationError::RoundBoundExceeded { rounds: 7 }.to_string();
    assert!(msg.contains("7 rounds"));
}
