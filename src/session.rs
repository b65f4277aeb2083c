// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, info, warn};
use secrecy::{ExposeSecret as _, SecretString};
use tokio::sync::watch;

use crate::{
    client::{Auth, Credentials, User},
    error::Result,
    storage::{self, Storage},
};

pub(crate) const USER_KEY: &str = "user";
pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const FAVORITES_KEY: &str = "favoriteCountries";

enum State {
    Anonymous,
    Authenticated {
        user: User,
        token: Option<SecretString>,
    },
}

/// What subscribers see after every change to the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) username: Option<String>,
    pub(crate) favorites: Vec<String>,
}

impl Snapshot {
    pub(crate) const fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }
}

/// The logged-in user and their favorite countries, kept in sync with a
/// [`Storage`].
///
/// Favorites can be toggled in any state; callers are expected to only offer
/// that to authenticated users.
pub(crate) struct Session<S: Storage> {
    storage: S,
    state: State,
    favorites: Vec<String>,
    notify: watch::Sender<Snapshot>,
}

impl<S: Storage> Session<S> {
    /// Restores whatever session the storage holds. A stored user is enough
    /// to count as authenticated.
    pub(crate) async fn new(mut storage: S) -> Self {
        let state = match storage::load::<User, _>(&mut storage, USER_KEY).await {
            Some(user) => State::Authenticated {
                user,
                token: load_token(&mut storage).await,
            },
            None => State::Anonymous,
        };
        let favorites = match state {
            State::Authenticated { .. } => load_favorites(&mut storage).await,
            State::Anonymous => Vec::new(),
        };

        let (notify, _) = watch::channel(Snapshot::default());
        let session = Self {
            storage,
            state,
            favorites,
            notify,
        };
        session.publish();
        session
    }

    pub(crate) const fn user(&self) -> Option<&User> {
        match self.state {
            State::Authenticated { ref user, .. } => Some(user),
            State::Anonymous => None,
        }
    }

    #[cfg(test)]
    pub(crate) const fn token(&self) -> Option<&SecretString> {
        match self.state {
            State::Authenticated { ref token, .. } => token.as_ref(),
            State::Anonymous => None,
        }
    }

    pub(crate) const fn is_authenticated(&self) -> bool {
        matches!(self.state, State::Authenticated { .. })
    }

    pub(crate) fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub(crate) fn is_favorite(&self, code: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite == code)
    }

    pub(crate) const fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.notify.subscribe()
    }

    pub(crate) async fn register<A: Auth + Sync + ?Sized>(
        &mut self,
        auth: &A,
        username: &str,
        password: &SecretString,
    ) -> Result<()> {
        let credentials = auth.register(username, password).await?;
        self.sign_in(credentials).await
    }

    pub(crate) async fn login<A: Auth + Sync + ?Sized>(
        &mut self,
        auth: &A,
        username: &str,
        password: &SecretString,
    ) -> Result<()> {
        let credentials = auth.login(username, password).await?;
        self.sign_in(credentials).await
    }

    /// Persists the token before the user. A stored user is what marks the
    /// session as authenticated on the next start, so it is written last.
    async fn sign_in(&mut self, credentials: Credentials) -> Result<()> {
        self.storage
            .set(TOKEN_KEY, credentials.token.expose_secret())
            .await?;
        if let Err(e) = storage::save(&mut self.storage, USER_KEY, &credentials.user).await {
            if let Err(cleanup) = self.storage.delete(TOKEN_KEY).await {
                warn!("Could not remove the stored token: {}", cleanup);
            }
            return Err(e);
        }

        info!("Signed in as {}", credentials.user.username);
        self.favorites = load_favorites(&mut self.storage).await;
        self.state = State::Authenticated {
            user: credentials.user,
            token: Some(credentials.token),
        };
        self.publish();
        Ok(())
    }

    /// Forgets the user and token. Stored favorites stay where they are so
    /// they come back on the next login from this machine.
    ///
    /// The session only becomes anonymous once the stored user is gone.
    pub(crate) async fn logout(&mut self) -> Result<()> {
        if let State::Authenticated { ref user, .. } = self.state {
            info!("Signing out {}", user.username);
        }
        self.storage.delete(USER_KEY).await?;

        self.state = State::Anonymous;
        self.favorites.clear();
        self.publish();

        self.storage.delete(TOKEN_KEY).await
    }

    /// Adds `code` to the favorites if it is missing and removes it
    /// otherwise, persisting the result. Returns whether `code` is now a
    /// favorite.
    pub(crate) async fn toggle_favorite(&mut self, code: &str) -> Result<bool> {
        let now_favorite = match self.favorites.iter().position(|favorite| favorite == code) {
            Some(index) => {
                let _ = self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(code.to_owned());
                true
            }
        };
        debug!("Favorites are now {:?}", self.favorites);

        storage::save(&mut self.storage, FAVORITES_KEY, &self.favorites).await?;
        self.publish();
        Ok(now_favorite)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            username: self.user().map(|user| user.username.clone()),
            favorites: self.favorites.clone(),
        }
    }

    fn publish(&self) {
        let _ = self.notify.send_replace(self.snapshot());
    }
}

async fn load_token<S: Storage + ?Sized>(storage: &mut S) -> Option<SecretString> {
    match storage.get(TOKEN_KEY).await {
        Ok(token) => token.map(SecretString::new),
        Err(e) => {
            warn!("Ignoring stored token because we could not read it: {}", e);
            None
        }
    }
}

async fn load_favorites<S: Storage + ?Sized>(storage: &mut S) -> Vec<String> {
    let mut favorites = storage::load::<Vec<String>, _>(storage, FAVORITES_KEY)
        .await
        .unwrap_or_default();

    let mut seen = std::collections::HashSet::new();
    favorites.retain(|code| seen.insert(code.clone()));
    favorites
}
