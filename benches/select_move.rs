use caro_ai::{test_positions, AIConfig, AIEngine, Board, PatternContext, PatternStore, Player};
use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn mid_game_store(board: &Board) -> PatternStore {
    let mut store = PatternStore::default();
    for pos in board.empty_positions() {
        if caro_ai::patterns::is_learnable(board, pos) {
            store.learn(PatternContext::extract(board, pos), pos, Utc::now());
        }
    }
    store
}

fn bench_select_move(c: &mut Criterion) {
    let board = Board::from_notation(test_positions::MID_1).unwrap();
    let empty = PatternStore::default();
    let config = AIConfig {
        seed: Some(1),
        ..Default::default()
    };

    c.bench_function("tiered_mid_game", |b| {
        let mut ai = AIEngine::tiered(&config);
        b.iter(|| ai.select_move(black_box(&board), Player::Second, &empty))
    });

    c.bench_function("tiered_open_four", |b| {
        let board = Board::from_notation(test_positions::OPEN_FOUR_ROW).unwrap();
        let mut ai = AIEngine::tiered(&config);
        b.iter(|| ai.select_move(black_box(&board), Player::Second, &empty))
    });
}

fn bench_predict(c: &mut Criterion) {
    let board = Board::from_notation(test_positions::MID_1).unwrap();
    let store = mid_game_store(&board);

    c.bench_function("predict_mid_game", |b| b.iter(|| store.predict(black_box(&board))));
}

criterion_group!(benches, bench_select_move, bench_predict);
criterion_main!(benches);
