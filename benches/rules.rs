use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use checkers_ledger::board::{decode, encode, OPENING_BOARD};
use checkers_ledger::{Board, Checkers, Color, Pos, RulesEngine};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Board after `plies` random moves from the opening.
fn midgame(seed: u64, plies: usize) -> (Board, Color) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut board = Board::opening();
    let mut turn = Color::Black;
    let mut chain = None;
    for _ in 0..plies {
        let moves = Checkers.legal_moves(&board, turn, chain);
        let Some(mv) = moves.as_slice().choose(&mut rng) else {
            break;
        };
        let Ok(outcome) = Checkers.apply_move(&board, turn, mv.from, mv.to, chain) else {
            break;
        };
        if outcome.winner.is_some() {
            break;
        }
        chain = outcome.must_continue.then_some(mv.to);
        board = outcome.board;
        turn = outcome.next_turn;
    }
    (board, turn)
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkers_legal_moves");
    group.bench_function("opening", |b| {
        let board = Board::opening();
        b.iter(|| Checkers.legal_moves(black_box(&board), Color::Black, None));
    });
    group.bench_function("midgame", |b| {
        let (board, turn) = midgame(42, 20);
        b.iter(|| Checkers.legal_moves(black_box(&board), turn, None));
    });
    group.finish();
}

fn bench_apply_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkers_apply_move");
    group.bench_function("opening_step", |b| {
        let board = Board::opening();
        b.iter(|| {
            Checkers.apply_move(
                black_box(&board),
                Color::Black,
                Pos::new(1, 2),
                Pos::new(2, 3),
                None,
            )
        });
    });
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_codec");
    group.bench_function("encode", |b| {
        let (board, _) = midgame(7, 30);
        b.iter(|| encode(black_box(&board)));
    });
    group.bench_function("decode", |b| {
        b.iter_batched(
            || OPENING_BOARD.to_string(),
            |text| decode(&text),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_legal_moves, bench_apply_move, bench_codec);
criterion_main!(benches);
