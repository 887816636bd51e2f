use calc_api_types::{RegisterRequest, UserProfile};
use calc_storage::TokenStore;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, Session};
use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Owns the API client and the durable token.
pub struct SessionManager<T, S> {
    api: ApiClient<T>,
    store: S,
}

impl<T, S> SessionManager<T, S>
where
    T: HttpTransport,
    S: TokenStore,
{
    pub fn new(api: ApiClient<T>, store: S) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.api.session()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let token = self.api.exchange_credentials(username, password).await?;

        self.store.save_token(&token.access_token)?;
        self.api.set_token(Some(token.access_token.clone()));
        info!(username, "logged in");

        if let Err(err) = self.load_profile().await {
            warn!("failed to load user: {err}");
        }

        Ok(self.api.session())
    }

    /// Creates the account only; the caller still has to log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ClientError> {
        let request = RegisterRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let user = self.api.register(&request).await?;
        info!(username, "registered");
        Ok(user)
    }

    /// Local only: nothing is sent to the server.
    pub fn logout(&self) {
        self.api.clear_session();
        if let Err(err) = self.store.clear_token() {
            warn!("failed to clear persisted token: {err:#}");
        }
        info!("logged out");
    }

    /// One attempt to resume a persisted session.
    ///
    /// A rejected token is dropped without telling the user.
    pub async fn restore_session(&self) -> bool {
        let token = match self.store.load_token() {
            Ok(Some(token)) => token,
            Ok(None) => return false,
            Err(err) => {
                warn!("failed to read persisted token: {err:#}");
                return false;
            }
        };

        self.api.set_token(Some(token));
        match self.load_profile().await {
            Ok(_) => true,
            Err(err) => {
                debug!("persisted session rejected: {err}");
                self.api.clear_session();
                if let Err(err) = self.store.clear_token() {
                    warn!("failed to clear persisted token: {err:#}");
                }
                false
            }
        }
    }

    async fn load_profile(&self) -> Result<UserProfile, ClientError> {
        let user = self.api.current_user().await?;
        self.api.set_user(Some(user.clone()));
        Ok(user)
    }
}
