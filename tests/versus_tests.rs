//! Versus advisor integration tests.

use tile_cascade::core::{Actor, Board, Resource, Side, SwapPair, SIZE};
use tile_cascade::sim::SimConfig;
use tile_cascade::versus::{versus_summaries, Advisor, AdvisorConfig, Summary, VersusOptions};

fn board(rows: &[&str]) -> Board {
    let mut lines = vec!["........"; SIZE - rows.len()];
    lines.extend_from_slice(rows);
    lines.join("\n").parse().expect("valid board text")
}

fn actor(side: Side, pools: &[(Resource, u32, u32)]) -> Actor {
    let base = Resource::ALL
        .into_iter()
        .fold(Actor::builder(side), |builder, r| builder.pool(r, 50, 100));
    pools
        .iter()
        .fold(base, |builder, &(r, current, max)| builder.pool(r, current, max))
        .build()
        .unwrap()
}

fn plain_advisor() -> Advisor {
    Advisor::new(AdvisorConfig::default().with_sim(SimConfig::default()))
}

fn actions(summaries: &[Summary]) -> Vec<SwapPair> {
    summaries.iter().map(|s| s.action).collect()
}

fn three_swaps() -> Board {
    board(&["8..*..g.", "8..s..g.", "xr.xs.xg"])
}

fn tile_effects() -> Board {
    board(&["..m.....", "..s.s...", "..s.s...", "..x.xm..", "xxsmsxx."])
}

// =============================================================================
// Advisor
// =============================================================================

#[test]
fn test_summaries_empty_before_reset() {
    let advisor = plain_advisor();
    assert_eq!(advisor.current_completed_turn(), 0);
    assert!(advisor.sorted_current_summaries().is_empty());
}

#[test]
fn test_completed_turn_counts_productive_turns() {
    let mut advisor = plain_advisor();
    advisor.reset(
        board(&["r.....*.", "3.....s.", "xr....xs"]),
        actor(Side::Player, &[]),
        actor(Side::Opponent, &[]),
    );
    let mut completed = Vec::new();
    for _ in 0..3 {
        advisor.simulate_next_turn().unwrap();
        completed.push(advisor.current_completed_turn());
    }
    assert_eq!(completed, vec![1, 2, 2]);

    advisor.reset(Board::empty(), actor(Side::Player, &[]), actor(Side::Opponent, &[]));
    assert_eq!(advisor.current_completed_turn(), 0);
}

#[test]
fn test_summaries_per_root_swap() {
    let mut advisor = plain_advisor();
    advisor.reset(three_swaps(), actor(Side::Player, &[]), actor(Side::Opponent, &[]));
    let expected = vec![
        SwapPair::new((7, 0), (7, 1)),
        SwapPair::new((7, 3), (7, 4)),
        SwapPair::new((7, 6), (7, 7)),
    ];

    advisor.simulate_next_turn().unwrap();
    let turn_one = advisor.sorted_current_summaries();
    let mut found = actions(&turn_one);
    found.sort();
    assert_eq!(found, expected);
    assert_eq!(turn_one.iter().map(|s| s.total_leaves).sum::<usize>(), 3);
    assert!(turn_one.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(turn_one.iter().all(|s| s.board == three_swaps()));

    advisor.simulate_next_turn().unwrap();
    let turn_two = advisor.sorted_current_summaries();
    let mut found = actions(&turn_two);
    found.sort();
    assert_eq!(found, expected);
    assert_eq!(turn_two.iter().map(|s| s.total_leaves).sum::<usize>(), 6);

    let score_of = |summaries: &[Summary], action: SwapPair| {
        summaries.iter().find(|s| s.action == action).map(|s| s.score)
    };
    assert!(expected
        .iter()
        .any(|&a| score_of(&turn_one, a) != score_of(&turn_two, a)));
}

#[test]
fn test_opponent_reply_changes_ranking() {
    let rich = [
        (Resource::Red, 500, 1000),
        (Resource::Green, 500, 1000),
        (Resource::Health, 500, 1000),
    ];
    let mut advisor = plain_advisor();
    advisor.reset(
        board(&["r.....r.", "2.....r.", "sr.**.xr"]),
        actor(Side::Player, &rich),
        actor(Side::Opponent, &rich),
    );
    let left = SwapPair::new((7, 0), (7, 1));
    let right = SwapPair::new((7, 6), (7, 7));

    advisor.simulate_next_turn().unwrap();
    assert_eq!(actions(&advisor.sorted_current_summaries()), vec![left, right]);

    advisor.simulate_next_turn().unwrap();
    assert_eq!(actions(&advisor.sorted_current_summaries()), vec![right, left]);
}

#[test]
fn test_symmetric_position_nets_to_zero() {
    let mut advisor = plain_advisor();
    advisor.reset(tile_effects(), actor(Side::Player, &[]), actor(Side::Opponent, &[]));

    advisor.simulate_next_turn().unwrap();
    for summary in advisor.sorted_current_summaries() {
        // 3 experience at half weight, 3 damage at double weight.
        assert_eq!(summary.score, 7.5, "{}", summary.action);
    }

    advisor.simulate_next_turn().unwrap();
    let summaries = advisor.sorted_current_summaries();
    assert_eq!(summaries.len(), 2);
    for summary in summaries {
        assert_eq!(summary.score, 0.0, "{}", summary.action);
    }
}

// =============================================================================
// Averaging
// =============================================================================

#[test]
fn test_versus_summaries_reports_each_turn() {
    let options = VersusOptions::default()
        .with_turns(2)
        .with_simulations(3)
        .with_advisor(AdvisorConfig::default().with_sim(SimConfig::default()));
    let mut reported = Vec::new();

    let ranking = versus_summaries(
        tile_effects(),
        actor(Side::Player, &[]),
        actor(Side::Opponent, &[]),
        &options,
        |turn, ranking| reported.push((turn, ranking.to_vec())),
    )
    .unwrap();

    assert_eq!(reported.len(), 2);
    assert_eq!(reported[0].0, 1);
    assert!(reported[0].1.iter().all(|s| s.score == 7.5));
    assert_eq!(reported[1].1, ranking);
    assert_eq!(ranking.len(), 2);
    for summary in &ranking {
        assert_eq!(summary.simulations, 3);
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.total_leaves, 1.0);
    }
}

#[test]
fn test_versus_summaries_with_random_fill() {
    let options = VersusOptions::default().with_turns(1).with_seed(3);
    let ranking = versus_summaries(
        three_swaps(),
        Actor::generic_versus(Side::Player),
        Actor::generic_versus(Side::Opponent),
        &options,
        |_, _| {},
    )
    .unwrap();

    assert_eq!(ranking.len(), 3);
    assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(ranking.iter().all(|s| s.simulations == 2));
}
