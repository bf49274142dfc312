//! Queue operations over a store and the system counters.

use tracing::debug;

use crate::core::{CheckersError, GameId, Result};
use crate::game::{StoredGame, SystemInfo};
use crate::store::{KvStore, Repository};

/// Borrowed view of the queue for the duration of one operation.
pub struct ExpiryQueue<'a, S: KvStore + ?Sized> {
    store: &'a mut S,
    info: &'a mut SystemInfo,
}

impl<'a, S: KvStore + ?Sized> ExpiryQueue<'a, S> {
    pub fn new(store: &'a mut S, info: &'a mut SystemInfo) -> Self {
        Self { store, info }
    }

    #[must_use]
    pub fn head(&self) -> Option<GameId> {
        self.info.fifo_head
    }

    #[must_use]
    pub fn tail(&self) -> Option<GameId> {
        self.info.fifo_tail
    }

    /// Whether `game` is currently linked into the queue.
    #[must_use]
    pub fn contains(&self, game: &StoredGame) -> bool {
        game.before_index.is_some()
            || game.after_index.is_some()
            || self.info.fifo_head == Some(game.index)
    }

    /// Load the head game.
    pub fn head_game(&self) -> Result<Option<StoredGame>> {
        self.info.fifo_head.map(|id| self.neighbour(id)).transpose()
    }

    /// Unlink `game`. A game that is not queued is left as is.
    pub fn remove(&mut self, game: &mut StoredGame) -> Result<()> {
        if !self.contains(game) {
            return Ok(());
        }
        let before = game.before_index;
        let after = game.after_index;

        match before {
            Some(id) => {
                let mut prev = self.neighbour(id)?;
                prev.after_index = after;
                self.store.set_game(&prev)?;
            }
            None => self.info.fifo_head = after,
        }
        match after {
            Some(id) => {
                let mut next = self.neighbour(id)?;
                next.before_index = before;
                self.store.set_game(&next)?;
            }
            None => self.info.fifo_tail = before,
        }

        game.before_index = None;
        game.after_index = None;
        debug!(game = %game.index, "unlinked from expiry queue");
        Ok(())
    }

    /// Move `game` to the tail, unlinking it first if already queued.
    pub fn append(&mut self, game: &mut StoredGame) -> Result<()> {
        self.remove(game)?;

        match self.info.fifo_tail {
            Some(id) => {
                let mut tail = self.neighbour(id)?;
                tail.after_index = Some(game.index);
                self.store.set_game(&tail)?;
                game.before_index = Some(id);
            }
            None => self.info.fifo_head = Some(game.index),
        }
        self.info.fifo_tail = Some(game.index);
        debug!(game = %game.index, "appended to expiry queue");
        Ok(())
    }

    /// Walk the queue from head to tail, checking links in both directions.
    pub fn ids(&self) -> Result<Vec<GameId>> {
        let mut ids = Vec::new();
        let mut previous: Option<GameId> = None;
        let mut cursor = self.info.fifo_head;

        while let Some(id) = cursor {
            // A well-formed queue never holds more games than were ever created.
            if ids.len() as u64 >= self.info.next_id.raw() {
                return Err(CheckersError::FifoCorrupted(id));
            }
            let game = self.neighbour(id)?;
            if game.before_index != previous {
                return Err(CheckersError::FifoCorrupted(id));
            }
            ids.push(id);
            previous = Some(id);
            cursor = game.after_index;
        }

        match (previous, self.info.fifo_tail) {
            (last, tail) if last == tail => Ok(ids),
            (_, Some(id)) | (Some(id), None) => Err(CheckersError::FifoCorrupted(id)),
            (None, None) => Ok(ids),
        }
    }

    fn neighbour(&self, id: GameId) -> Result<StoredGame> {
        self.store
            .get_game(id)?
            .ok_or(CheckersError::FifoCorrupted(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Address, Timestamp};
    use crate::store::MemoryStore;

    fn new_game(store: &mut MemoryStore, info: &mut SystemInfo) -> StoredGame {
        let id = info.allocate_id();
        let mut game = StoredGame::new(
            id,
            Address::from("bob"),
            Address::from("carol"),
            0,
            "stake",
            Timestamp::from_secs(id.raw()),
        );
        ExpiryQueue::new(store, info).append(&mut game).unwrap();
        store.set_game(&game).unwrap();
        game
    }

    fn ids(store: &mut MemoryStore, info: &mut SystemInfo) -> Vec<u64> {
        ExpiryQueue::new(store, info)
            .ids()
            .unwrap()
            .into_iter()
            .map(GameId::raw)
            .collect()
    }

    #[test]
    fn test_append_links_games() {
        let mut store = MemoryStore::new();
        let mut info = SystemInfo::genesis();
        new_game(&mut store, &mut info);
        new_game(&mut store, &mut info);
        new_game(&mut store, &mut info);

        assert_eq!(info.fifo_head, Some(GameId::new(1)));
        assert_eq!(info.fifo_tail, Some(GameId::new(3)));
        let second = store.get_game(GameId::new(2)).unwrap().unwrap();
        assert_eq!(second.before_index, Some(GameId::new(1)));
        assert_eq!(second.after_index, Some(GameId::new(3)));
        assert_eq!(ids(&mut store, &mut info), vec![1, 2, 3]);
    }

    #[test]
    fn test_append_moves_to_tail() {
        let mut store = MemoryStore::new();
        let mut info = SystemInfo::genesis();
        let mut first = new_game(&mut store, &mut info);
        new_game(&mut store, &mut info);
        new_game(&mut store, &mut info);

        ExpiryQueue::new(&mut store, &mut info)
            .append(&mut first)
            .unwrap();
        store.set_game(&first).unwrap();
        assert_eq!(ids(&mut store, &mut info), vec![2, 3, 1]);

        let mut tail = store.get_game(GameId::new(1)).unwrap().unwrap();
        ExpiryQueue::new(&mut store, &mut info)
            .append(&mut tail)
            .unwrap();
        store.set_game(&tail).unwrap();
        assert_eq!(ids(&mut store, &mut info), vec![2, 3, 1]);
    }

    #[test]
    fn test_remove_middle_head_and_last() {
        let mut store = MemoryStore::new();
        let mut info = SystemInfo::genesis();
        let mut first = new_game(&mut store, &mut info);
        let mut second = new_game(&mut store, &mut info);
        new_game(&mut store, &mut info);

        ExpiryQueue::new(&mut store, &mut info)
            .remove(&mut second)
            .unwrap();
        store.set_game(&second).unwrap();
        assert_eq!(ids(&mut store, &mut info), vec![1, 3]);

        first = store.get_game(first.index).unwrap().unwrap();
        ExpiryQueue::new(&mut store, &mut info)
            .remove(&mut first)
            .unwrap();
        store.set_game(&first).unwrap();
        assert_eq!(ids(&mut store, &mut info), vec![3]);

        let mut third = store.get_game(GameId::new(3)).unwrap().unwrap();
        let mut queue = ExpiryQueue::new(&mut store, &mut info);
        queue.remove(&mut third).unwrap();
        assert!(!queue.contains(&third));
        assert_eq!(queue.head(), None);
        assert_eq!(queue.tail(), None);

        // Removing again is a no-op.
        queue.remove(&mut third).unwrap();
    }

    #[test]
    fn test_missing_neighbour_is_corruption() {
        let mut store = MemoryStore::new();
        let mut info = SystemInfo::genesis();
        new_game(&mut store, &mut info);
        let mut second = new_game(&mut store, &mut info);
        store.remove_game(GameId::new(1));

        let err = ExpiryQueue::new(&mut store, &mut info)
            .remove(&mut second)
            .unwrap_err();
        assert!(matches!(err, CheckersError::FifoCorrupted(id) if id == GameId::new(1)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_head_game() {
        let mut store = MemoryStore::new();
        let mut info = SystemInfo::genesis();
        assert!(ExpiryQueue::new(&mut store, &mut info)
            .head_game()
            .unwrap()
            .is_none());

        let first = new_game(&mut store, &mut info);
        new_game(&mut store, &mut info);
        let head = ExpiryQueue::new(&mut store, &mut info)
            .head_game()
            .unwrap();
        assert_eq!(head.map(|g| g.index), Some(first.index));
    }
}
