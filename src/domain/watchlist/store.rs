//! Watchlist persistence backends.

use crate::error::WatchlistError;
use crate::shared::CoinId;
use std::sync::{Mutex, MutexGuard};

/// Where a [`Watchlist`](super::Watchlist) keeps its ids between sessions.
pub trait WatchlistStore {
    /// Stored ids, or an empty list if nothing was saved yet.
    fn load(&self) -> Result<Vec<CoinId>, WatchlistError>;
    fn save(&self, ids: &[CoinId]) -> Result<(), WatchlistError>;
    /// Drop the stored entry entirely.
    fn clear(&self) -> Result<(), WatchlistError>;
}

/// In-process store, mostly for tests and WASM hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: Mutex<Option<Vec<CoinId>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: Vec<CoinId>) -> Self {
        Self {
            ids: Mutex::new(Some(ids)),
        }
    }

    /// Whether anything is currently saved.
    pub fn is_saved(&self) -> bool {
        self.ids.lock().map(|ids| ids.is_some()).unwrap_or(false)
    }

    fn stored(&self) -> Result<MutexGuard<'_, Option<Vec<CoinId>>>, WatchlistError> {
        self.ids.lock().map_err(|_| WatchlistError::Poisoned)
    }
}

impl WatchlistStore for MemoryStore {
    fn load(&self) -> Result<Vec<CoinId>, WatchlistError> {
        Ok(self.stored()?.clone().unwrap_or_default())
    }

    fn save(&self, ids: &[CoinId]) -> Result<(), WatchlistError> {
        *self.stored()? = Some(ids.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), WatchlistError> {
        *self.stored()? = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileStore, DEFAULT_FILE_NAME};

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::WatchlistStore;
    use crate::error::WatchlistError;
    use crate::shared::CoinId;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    /// File name used when only a directory is given.
    pub const DEFAULT_FILE_NAME: &str = "cryptoWishlist.json";

    /// JSON array of coin ids on disk.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<dir>/cryptoWishlist.json`.
        pub fn in_dir(dir: impl AsRef<Path>) -> Self {
            Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl WatchlistStore for FileStore {
        fn load(&self) -> Result<Vec<CoinId>, WatchlistError> {
            match std::fs::read_to_string(&self.path) {
                Ok(text) => Ok(serde_json::from_str(&text)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&self, ids: &[CoinId]) -> Result<(), WatchlistError> {
            let json = serde_json::to_string(ids)?;
            std::fs::write(&self.path, json)?;
            Ok(())
        }

        fn clear(&self) -> Result<(), WatchlistError> {
            match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}
