use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tile_cascade::capture::capture;
use tile_cascade::core::{Actor, Board, Side, SimRng};
use tile_cascade::sim::{SimConfig, SimTree, State, TurnSimulator};

fn corpus() -> Vec<Board> {
    let mut rng = SimRng::new(42);
    (0..16).map(|_| Board::random_start(&mut rng)).collect()
}

fn bench_board(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("board/find_matches", |b| {
        b.iter(|| {
            let mut groups = 0;
            for board in &boards {
                groups += board.find_matches().len();
            }
            black_box(groups)
        })
    });
    c.bench_function("board/potential_swaps", |b| {
        b.iter(|| {
            let mut swaps = 0;
            for board in &boards {
                swaps += board.potential_swaps().len();
            }
            black_box(swaps)
        })
    });
    c.bench_function("board/random_start", |b| {
        b.iter_batched(
            || SimRng::new(7),
            |mut rng| black_box(Board::random_start(&mut rng)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_simulation(c: &mut Criterion) {
    let board = corpus()[0];
    c.bench_function("sim/versus_turn", |b| {
        b.iter_batched(
            || {
                let root = State::new(
                    board,
                    Actor::generic_versus(Side::Player),
                    Actor::generic_versus(Side::Opponent),
                );
                (SimTree::new(root), TurnSimulator::new(SimConfig::default().with_random_fill(true)))
            },
            |(mut tree, mut simulator)| {
                let root = tree.root();
                let ends = simulator.ends_of_one_turn(&mut tree, root).map(|e| e.len());
                black_box(ends)
            },
            BatchSize::SmallInput,
        )
    });

    let puzzle: Board = "........\n........\n........\n........\n.......x\n....xx.r\n....rr.r\n..rryyry"
        .parse()
        .unwrap_or_default();
    c.bench_function("capture/easy", |b| b.iter(|| black_box(capture(&puzzle))));
}

criterion_group!(benches, bench_board, bench_simulation);
criterion_main!(benches);
