//! Watchlist domain — the user's starred coins, persisted between sessions.

pub mod store;

use super::coin::CoinMarket;
use crate::error::WatchlistError;
use crate::shared::CoinId;

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
pub use store::{MemoryStore, WatchlistStore};

/// Ordered set of starred coin ids backed by a [`WatchlistStore`].
///
/// Every mutation is written through to the store immediately, and the
/// in-memory ids only change once that write succeeds.
#[derive(Debug)]
pub struct Watchlist<S> {
    ids: Vec<CoinId>,
    store: S,
}

impl<S: WatchlistStore> Watchlist<S> {
    /// Load the saved ids from `store`.
    pub fn open(store: S) -> Result<Self, WatchlistError> {
        let mut ids = store.load()?;
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        tracing::debug!(count = ids.len(), "Loaded watchlist");
        Ok(Self { ids, store })
    }

    /// Star a coin. Returns `false` if it was already starred.
    pub fn add(&mut self, id: impl Into<CoinId>) -> Result<bool, WatchlistError> {
        let id = id.into();
        if self.contains(&id) {
            return Ok(false);
        }
        let mut ids = self.ids.clone();
        ids.push(id);
        self.commit(ids)?;
        Ok(true)
    }

    /// Unstar a coin. Returns `false` if it was not starred.
    pub fn remove(&mut self, id: &CoinId) -> Result<bool, WatchlistError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let ids = self.ids.iter().filter(|i| *i != id).cloned().collect();
        self.commit(ids)?;
        Ok(true)
    }

    /// Flip a coin's starred state. Returns the new state.
    pub fn toggle(&mut self, id: impl Into<CoinId>) -> Result<bool, WatchlistError> {
        let id = id.into();
        if self.contains(&id) {
            self.remove(&id)?;
            Ok(false)
        } else {
            self.add(id)
        }
    }

    pub fn clear(&mut self) -> Result<(), WatchlistError> {
        self.store.clear()?;
        self.ids.clear();
        Ok(())
    }

    pub fn contains(&self, id: &CoinId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[CoinId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The starred coins out of a market listing, in listing order.
    pub fn filter_markets<'m>(&self, markets: &'m [CoinMarket]) -> Vec<&'m CoinMarket> {
        markets.iter().filter(|c| self.contains(&c.id)).collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn commit(&mut self, ids: Vec<CoinId>) -> Result<(), WatchlistError> {
        if let Err(e) = self.store.save(&ids) {
            tracing::warn!(error = %e, "Failed to save watchlist, keeping previous ids");
            return Err(e);
        }
        self.ids = ids;
        Ok(())
    }
}
