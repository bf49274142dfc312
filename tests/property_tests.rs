//! Property tests over seeded random playouts.
//!
//! Games are played with uniformly random legal moves from a `ChaCha8Rng`, so
//! every failing case replays exactly from its seed.

use std::time::Duration;

use checkers_ledger::board::{decode, encode};
use checkers_ledger::{
    Address, Board, Checkers, Coin, Color, CreateGame, EventLog, ExpiryQueue, GameId,
    GenesisState, Keeper, KeeperConfig, MemoryBank, MemoryStore, PlayMove, Pos, RulesEngine,
    Timestamp,
};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type TestKeeper = Keeper<MemoryStore, MemoryBank, EventLog>;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const FUNDS: u64 = 1_000_000;

fn keeper() -> TestKeeper {
    let bank = MemoryBank::new()
        .with_balance(Address::from("bob"), Coin::new(FUNDS, "stake"))
        .with_balance(Address::from("carol"), Coin::new(FUNDS, "stake"));
    let mut keeper = Keeper::new(MemoryStore::new(), bank, EventLog::new(), KeeperConfig::default());
    keeper.init_genesis(&GenesisState::default()).unwrap();
    keeper
}

/// Boards visited by a random game from the opening.
fn playout(seed: u64, plies: usize) -> Vec<Board> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::opening();
    let mut turn = Color::Black;
    let mut chain: Option<Pos> = None;
    let mut boards = vec![board];

    for _ in 0..plies {
        let moves = Checkers.legal_moves(&board, turn, chain);
        let Some(mv) = moves.as_slice().choose(&mut rng) else {
            break;
        };
        let outcome = Checkers
            .apply_move(&board, turn, mv.from, mv.to, chain)
            .unwrap();
        board = outcome.board;
        boards.push(board);
        if outcome.winner.is_some() {
            break;
        }
        chain = outcome.must_continue.then_some(mv.to);
        turn = outcome.next_turn;
    }
    boards
}

/// A random legal move for whoever is on turn, if the game is still open.
fn random_move(keeper: &TestKeeper, id: GameId, rng: &mut ChaCha8Rng) -> Option<PlayMove> {
    let game = keeper.get_game(id).ok()?;
    if game.winner.is_some() {
        return None;
    }
    let board = game.parse_board().ok()?;
    let moves = Checkers.legal_moves(&board, game.turn, game.chain);
    let mv = moves.as_slice().choose(rng)?;
    Some(PlayMove::new(
        game.player(game.turn).clone(),
        id,
        (mv.from.x as u64, mv.from.y as u64),
        (mv.to.x as u64, mv.to.y as u64),
    ))
}

fn check_queue(keeper: &mut TestKeeper) -> Result<Vec<GameId>, TestCaseError> {
    let mut info = keeper.system_info().unwrap();
    let ids = ExpiryQueue::new(keeper.store_mut(), &mut info)
        .ids()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    let mut last = Timestamp::default();
    for id in &ids {
        let game = keeper.get_game(*id).unwrap();
        prop_assert!(game.winner.is_none(), "finished game {} still queued", id);
        prop_assert!(game.deadline >= last, "deadline order broken at {}", id);
        last = game.deadline;
    }
    Ok(ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every board reachable by play survives encode then decode.
    #[test]
    fn prop_codec_round_trip(seed in any::<u64>(), plies in 0usize..120) {
        for board in playout(seed, plies) {
            let text = encode(&board);
            prop_assert_eq!(text.len(), 71);
            prop_assert_eq!(decode(&text), Ok(board));
        }
    }

    /// The turn passes after every move except mid-capture, and each move
    /// refreshes the deadline.
    #[test]
    fn prop_turn_alternates(seed in any::<u64>(), plies in 1usize..80) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut keeper = keeper();
        let mut now = Timestamp::from_secs(1);
        let id = keeper
            .create_game(now, CreateGame::new("alice", "bob", "carol").with_wager(3, "stake"))
            .unwrap()
            .game_index;

        for _ in 0..plies {
            let Some(msg) = random_move(&keeper, id, &mut rng) else {
                break;
            };
            now = now.saturating_add(Duration::from_secs(rng.gen_range(1..600)));
            let before = keeper.get_game(id).unwrap();
            keeper.play_move(now, msg).unwrap();
            let after = keeper.get_game(id).unwrap();

            prop_assert_eq!(after.move_count, before.move_count + 1);
            prop_assert_eq!(after.deadline, now.saturating_add(DAY));
            if after.winner.is_none() {
                match after.chain {
                    Some(_) => prop_assert_eq!(after.turn, before.turn),
                    None => prop_assert_eq!(after.turn, before.turn.opponent()),
                }
            }
        }
    }

    /// Wagers are neither created nor destroyed, and escrow always holds
    /// exactly the open pot.
    #[test]
    fn prop_escrow_conserved(seed in any::<u64>(), wager in 0u64..1_000, plies in 0usize..150) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut keeper = keeper();
        let now = Timestamp::from_secs(1);
        let id = keeper
            .create_game(now, CreateGame::new("alice", "bob", "carol").with_wager(wager, "stake"))
            .unwrap()
            .game_index;

        for _ in 0..plies {
            let Some(msg) = random_move(&keeper, id, &mut rng) else {
                break;
            };
            keeper.play_move(now, msg).unwrap();
            let game = keeper.get_game(id).unwrap();
            let expected = if game.winner.is_some() { 0 } else { game.pot() };
            prop_assert_eq!(keeper.bank().escrow_balance("stake"), expected);
            prop_assert_eq!(keeper.bank().total_supply("stake"), 2 * FUNDS);
        }

        keeper.forfeit_expired_games(now.saturating_add(DAY)).unwrap();
        prop_assert_eq!(keeper.bank().escrow_balance("stake"), 0);
        prop_assert_eq!(keeper.bank().total_supply("stake"), 2 * FUNDS);
    }

    /// Under any mix of creations and moves the queue stays well linked with
    /// non-decreasing deadlines, and the sweep removes exactly the expired
    /// prefix.
    #[test]
    fn prop_queue_ordered(seed in any::<u64>(), steps in 1usize..60, gap in 1u64..7_200) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut keeper = keeper();
        let mut now = Timestamp::from_secs(1);
        let mut games: Vec<GameId> = Vec::new();

        for _ in 0..steps {
            now = now.saturating_add(Duration::from_secs(rng.gen_range(0..gap)));
            if games.is_empty() || rng.gen_bool(0.3) {
                let id = keeper
                    .create_game(now, CreateGame::new("alice", "bob", "carol").with_wager(1, "stake"))
                    .unwrap()
                    .game_index;
                games.push(id);
            } else if let Some(&id) = games.as_slice().choose(&mut rng) {
                if let Some(msg) = random_move(&keeper, id, &mut rng) {
                    keeper.play_move(now, msg).unwrap();
                }
            }
            check_queue(&mut keeper)?;
        }

        let sweep_at = now.saturating_add(DAY).saturating_sub(Duration::from_secs(gap));
        let queued = check_queue(&mut keeper)?;
        let mut expired = Vec::new();
        for id in &queued {
            if keeper.get_game(*id).unwrap().deadline <= sweep_at {
                expired.push(*id);
            }
        }

        let report = keeper.forfeit_expired_games(sweep_at).unwrap();
        let mut swept = report.forfeited.clone();
        swept.extend(report.abandoned.iter().copied());
        swept.sort();
        expired.sort();
        prop_assert_eq!(swept, expired.clone());

        let remaining = check_queue(&mut keeper)?;
        prop_assert_eq!(remaining.len(), queued.len() - expired.len());
        if let Some(head) = remaining.first() {
            prop_assert!(keeper.get_game(*head).unwrap().deadline > sweep_at);
        }
    }
}
