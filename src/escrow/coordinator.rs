//! Escrow decisions per lifecycle point.
//!
//! Each function is called by the keeper at exactly one point in a game's
//! life, so no transfer is issued twice for the same game.

use tracing::debug;

use super::{Bank, Coin};
use crate::core::{CheckersError, Color, Result};
use crate::game::StoredGame;

/// Collect the mover's wager on each player's first move.
///
/// Black pays at move 0, red at move 1. Later moves collect nothing.
pub fn collect_wager<B: Bank + ?Sized>(bank: &mut B, game: &StoredGame) -> Result<()> {
    let color = match game.move_count {
        0 => Color::Black,
        1 => Color::Red,
        _ => return Ok(()),
    };
    let coin = Coin::new(game.wager, game.denom.clone());
    if coin.is_zero() {
        return Ok(());
    }

    bank.send_to_escrow(game.player(color), &coin)
        .map_err(|source| CheckersError::EscrowCollectFailed { color, source })?;
    debug!(game = %game.index, %color, %coin, "collected wager");
    Ok(())
}

/// Pay the whole pot to the declared winner.
pub fn pay_winner<B: Bank + ?Sized>(bank: &mut B, game: &StoredGame) -> Result<()> {
    let winner = game.winner.ok_or(CheckersError::NoWinner(game.index))?;
    if game.move_count == 0 {
        return Err(CheckersError::NothingInEscrow(game.index));
    }
    let coin = Coin::new(game.pot(), game.denom.clone());
    if coin.is_zero() {
        return Ok(());
    }

    bank.send_from_escrow(game.player(winner), &coin)
        .map_err(|source| CheckersError::EscrowPayFailed { source })?;
    debug!(game = %game.index, %winner, %coin, "paid winnings");
    Ok(())
}

/// Return black's wager when the game is abandoned after one move.
///
/// A game with no moves holds nothing; one where both sides paid must be
/// settled with `pay_winner` instead.
pub fn refund_wager<B: Bank + ?Sized>(bank: &mut B, game: &StoredGame) -> Result<()> {
    match game.move_count {
        0 => Ok(()),
        1 => {
            let coin = Coin::new(game.wager, game.denom.clone());
            if coin.is_zero() {
                return Ok(());
            }
            bank.send_from_escrow(game.player(Color::Black), &coin)
                .map_err(|source| CheckersError::EscrowRefundFailed { source })?;
            debug!(game = %game.index, %coin, "refunded wager");
            Ok(())
        }
        _ => Err(CheckersError::RefundNotAllowed(game.index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Address, ErrorKind, GameId, Timestamp};
    use crate::escrow::{MemoryBank, TransferDirection};

    fn game(wager: u64) -> StoredGame {
        StoredGame::new(
            GameId::new(1),
            Address::from("bob"),
            Address::from("carol"),
            wager,
            "stake",
            Timestamp::from_secs(0),
        )
    }

    fn bank() -> MemoryBank {
        MemoryBank::new()
            .with_balance(Address::from("bob"), Coin::new(100, "stake"))
            .with_balance(Address::from("carol"), Coin::new(100, "stake"))
    }

    #[test]
    fn test_collect_both_sides() {
        let mut bank = bank();
        let mut g = game(45);

        collect_wager(&mut bank, &g).unwrap();
        assert_eq!(bank.balance(&Address::from("bob"), "stake"), 55);
        assert_eq!(bank.escrow_balance("stake"), 45);

        g.move_count = 1;
        collect_wager(&mut bank, &g).unwrap();
        assert_eq!(bank.balance(&Address::from("carol"), "stake"), 55);
        assert_eq!(bank.escrow_balance("stake"), 90);

        g.move_count = 2;
        collect_wager(&mut bank, &g).unwrap();
        assert_eq!(bank.transfers().len(), 2);
    }

    #[test]
    fn test_zero_wager_skips_bank() {
        let mut bank = MemoryBank::new();
        let mut g = game(0);
        collect_wager(&mut bank, &g).unwrap();
        g.move_count = 3;
        g.winner = Some(Color::Red);
        pay_winner(&mut bank, &g).unwrap();
        assert!(bank.transfers().is_empty());
    }

    #[test]
    fn test_collect_failure() {
        let mut bank = bank();
        bank.fail_transfers_for(Address::from("bob"), "oops");
        let err = collect_wager(&mut bank, &game(45)).unwrap_err();
        assert_eq!(err.to_string(), "black cannot pay the wager: oops");
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(bank.escrow_balance("stake"), 0);
    }

    #[test]
    fn test_pay_winner() {
        let mut bank = bank();
        let mut g = game(45);
        collect_wager(&mut bank, &g).unwrap();
        g.move_count = 1;
        collect_wager(&mut bank, &g).unwrap();

        g.move_count = 9;
        assert!(matches!(
            pay_winner(&mut bank, &g),
            Err(CheckersError::NoWinner(_))
        ));

        g.winner = Some(Color::Red);
        pay_winner(&mut bank, &g).unwrap();
        assert_eq!(bank.balance(&Address::from("carol"), "stake"), 145);
        assert_eq!(bank.escrow_balance("stake"), 0);
        let last = bank.transfers().last().unwrap();
        assert_eq!(last.direction, TransferDirection::FromEscrow);
        assert_eq!(last.coin, Coin::new(90, "stake"));
    }

    #[test]
    fn test_pay_with_no_moves() {
        let mut bank = bank();
        let mut g = game(45);
        g.winner = Some(Color::Black);
        assert!(matches!(
            pay_winner(&mut bank, &g),
            Err(CheckersError::NothingInEscrow(_))
        ));
    }

    #[test]
    fn test_refund() {
        let mut bank = bank();
        let mut g = game(45);
        refund_wager(&mut bank, &g).unwrap();
        assert!(bank.transfers().is_empty());

        collect_wager(&mut bank, &g).unwrap();
        g.move_count = 1;
        refund_wager(&mut bank, &g).unwrap();
        assert_eq!(bank.balance(&Address::from("bob"), "stake"), 100);
        assert_eq!(bank.escrow_balance("stake"), 0);

        g.move_count = 2;
        assert!(matches!(
            refund_wager(&mut bank, &g),
            Err(CheckersError::RefundNotAllowed(_))
        ));
    }
}
