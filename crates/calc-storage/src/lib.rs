use anyhow::Result;
use std::cell::RefCell;

/// Fixed key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "accessToken";

/// Durable home of the bearer token.
///
/// Implementations store a single raw string under [`TOKEN_KEY`]. The client
/// runs on one thread, so no `Send`/`Sync` bound is required.
pub trait TokenStore {
    fn load_token(&self) -> Result<Option<String>>;
    fn save_token(&self, token: &str) -> Result<()>;
    fn clear_token(&self) -> Result<()>;
}

impl<T: TokenStore + ?Sized> TokenStore for std::rc::Rc<T> {
    fn load_token(&self) -> Result<Option<String>> {
        (**self).load_token()
    }

    fn save_token(&self, token: &str) -> Result<()> {
        (**self).save_token(token)
    }

    fn clear_token(&self) -> Result<()> {
        (**self).clear_token()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_owned())),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load_token(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn save_token(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_owned());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        self.token.borrow_mut().take();
        Ok(())
    }
}

#[cfg(feature = "rocksdb")]
pub use rocks::RocksDbTokenStore;

#[cfg(feature = "rocksdb")]
mod rocks {
    use super::{TOKEN_KEY, TokenStore};
    use anyhow::{Context, Result};
    use rocksdb::{DB, Options};
    use std::path::Path;
    use std::sync::Arc;

    pub struct RocksDbTokenStore {
        db: Arc<DB>,
    }

    impl RocksDbTokenStore {
        pub fn open_default(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let mut options = Options::default();
            options.create_if_missing(true);
            let db = DB::open(&options, path)
                .with_context(|| format!("failed to open token store at {}", path.display()))?;
            Ok(Self { db: Arc::new(db) })
        }
    }

    impl TokenStore for RocksDbTokenStore {
        fn load_token(&self) -> Result<Option<String>> {
            let value = self.db.get(TOKEN_KEY.as_bytes())?;
            match value {
                Some(raw) => Ok(Some(
                    String::from_utf8(raw).context("stored token is not valid UTF-8")?,
                )),
                None => Ok(None),
            }
        }

        fn save_token(&self, token: &str) -> Result<()> {
            self.db.put(TOKEN_KEY.as_bytes(), token.as_bytes())?;
            Ok(())
        }

        fn clear_token(&self) -> Result<()> {
            self.db.delete(TOKEN_KEY.as_bytes())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trip_and_clear() {
        let store = InMemoryTokenStore::default();
        assert_eq!(store.load_token().unwrap(), None);

        store.save_token("abc").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("abc"));

        store.clear_token().unwrap();
        assert_eq!(store.load_token().unwrap(), None);
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn rocksdb_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = RocksDbTokenStore::open_default(dir.path()).unwrap();
            store.save_token("persisted-token").unwrap();
        }

        let reopened = RocksDbTokenStore::open_default(dir.path()).unwrap();
        assert_eq!(
            reopened.load_token().unwrap().as_deref(),
            Some("persisted-token")
        );

        reopened.clear_token().unwrap();
        assert_eq!(reopened.load_token().unwrap(), None);
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn clearing_missing_token_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbTokenStore::open_default(dir.path()).unwrap();
        store.clear_token().unwrap();
        assert_eq!(store.load_token().unwrap(), None);
    }
}
