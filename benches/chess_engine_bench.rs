//! Chess Engine Benchmarks
//!
//! Performance benchmarks for critical engine functions using Criterion.

use chess_engine::evaluation::evaluate_material;
use chess_engine::{all_legal_moves, Board, Color, GameState, Move};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pigeon_chess::SimpleAi;

const ITALIAN: [&str; 10] = [
    "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "c2c3", "g8f6", "d2d3", "d7d6",
];

fn italian_moves() -> Vec<Move> {
    ITALIAN.iter().filter_map(|m| m.parse().ok()).collect()
}

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("new_game", |b| b.iter(|| black_box(GameState::new())));
}

fn bench_move_generation_starting(c: &mut Criterion) {
    let board = Board::initial();

    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(all_legal_moves(&board, Color::White, None)))
    });
}

fn bench_move_generation_middlegame(c: &mut Criterion) {
    let game = GameState::replay(italian_moves()).unwrap_or_default();

    c.bench_function("legal_moves_middlegame", |b| {
        b.iter(|| black_box(game.all_legal_moves()))
    });
}

fn bench_replay(c: &mut Criterion) {
    let moves = italian_moves();

    c.bench_function("replay_ten_plies", |b| {
        b.iter(|| black_box(GameState::replay(moves.clone()).map(|g| g.ply())))
    });
}

fn bench_evaluate_material_starting(c: &mut Criterion) {
    let board = Board::initial();

    c.bench_function("evaluate_material_starting", |b| {
        b.iter(|| black_box(evaluate_material(&board, Color::White)))
    });
}

fn bench_ai_choose(c: &mut Criterion) {
    let game = GameState::replay(italian_moves()).unwrap_or_default();
    let mut ai = SimpleAi::seeded(1);

    c.bench_function("simple_ai_choose_middlegame", |b| {
        b.iter(|| black_box(ai.choose(&game)))
    });
}

criterion_group!(
    benches,
    bench_new_game,
    bench_move_generation_starting,
    bench_move_generation_middlegame,
    bench_replay,
    bench_evaluate_material_starting,
    bench_ai_choose,
);
criterion_main!(benches);
