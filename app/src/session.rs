//! Signed-in session
//!
//! The bearer token is issued by the backend's own login flow and kept in
//! `localStorage`. Queries only run while a token is present.

use dioxus_logger::tracing;
use dioxus::prelude::*;
use habitquest_core::AuthToken;

const TOKEN_STORAGE_KEY: &str = "habitquest.token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_token() -> Option<AuthToken> {
    let raw = local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()?;
    AuthToken::parse(&raw)
}

#[derive(Clone, Copy)]
pub struct Session {
    token: Signal<Option<AuthToken>>,
}

impl Session {
    /// Current token. Reading subscribes the caller to sign-in/sign-out.
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    /// Current token without subscribing (event handlers, spawned tasks)
    pub fn peek_token(&self) -> Option<AuthToken> {
        self.token.peek().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.read().is_some()
    }

    /// Store a token obtained from the login page. Returns false when blank.
    pub fn sign_in(&mut self, raw: &str) -> bool {
        let Some(token) = AuthToken::parse(raw) else {
            return false;
        };
        if let Some(storage) = local_storage()
            && storage.set_item(TOKEN_STORAGE_KEY, token.expose()).is_err()
        {
            tracing::warn!("Could not persist token; session lasts until reload");
        }
        self.token.set(Some(token));
        tracing::info!("Signed in");
        true
    }

    pub fn sign_out(&mut self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
        self.token.set(None);
        tracing::info!("Signed out");
    }
}

pub fn use_session_provider() -> Session {
    use_context_provider(|| Session {
        token: Signal::new(load_token()),
    })
}

pub fn use_session() -> Session {
    use_context::<Session>()
}
