use anyhow::{Result, anyhow};
use calc_storage::{TOKEN_KEY, TokenStore};
use gloo_utils::window;
use web_sys::Storage;

/// Token persisted raw under `accessToken` in `localStorage`.
pub struct LocalStorageTokenStore;

fn storage() -> Result<Storage> {
    window()
        .local_storage()
        .map_err(|err| anyhow!("localStorage unavailable: {err:?}"))?
        .ok_or_else(|| anyhow!("localStorage unavailable"))
}

impl TokenStore for LocalStorageTokenStore {
    fn load_token(&self) -> Result<Option<String>> {
        storage()?
            .get_item(TOKEN_KEY)
            .map_err(|err| anyhow!("failed to read {TOKEN_KEY}: {err:?}"))
    }

    fn save_token(&self, token: &str) -> Result<()> {
        storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|err| anyhow!("failed to write {TOKEN_KEY}: {err:?}"))
    }

    fn clear_token(&self) -> Result<()> {
        storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|err| anyhow!("failed to remove {TOKEN_KEY}: {err:?}"))
    }
}
