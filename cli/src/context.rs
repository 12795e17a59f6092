use std::future::Future;
use std::sync::Arc;

use habitquest_core::query::run_with_retry;
use habitquest_core::{ApiClient, ApiError, AuthToken, CacheEffect, ClientConfig, QueryCache, QueryKey};
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI.
///
/// The query cache lives for the whole process, so inside the interactive
/// shell repeated reads are served from it until a mutation invalidates them.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<ClientConfig>>,
    api: Arc<RwLock<ApiClient>>,
    cache: Arc<Mutex<QueryCache>>,
}

impl CliContext {
    pub fn new(config: ClientConfig) -> Result<Self, String> {
        let api = ApiClient::new(&config).map_err(|e| e.to_string())?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            api: Arc::new(RwLock::new(api)),
            cache: Arc::new(Mutex::new(QueryCache::new())),
        })
    }

    /// Replace the config (after `config set-*`), rebuilding the client and
    /// dropping everything cached under the old server or token.
    pub async fn replace_config(&self, config: ClientConfig) -> Result<(), String> {
        let api = ApiClient::new(&config).map_err(|e| e.to_string())?;
        *self.api.write().await = api;
        *self.config.write().await = config;
        self.cache.lock().await.clear();
        Ok(())
    }

    pub async fn token(&self) -> Result<AuthToken, String> {
        let config = self.config.read().await;
        config
            .auth_token
            .as_deref()
            .and_then(AuthToken::parse)
            .ok_or_else(|| "Not signed in. Run `config set-token <token>` first.".to_string())
    }

    /// Read `key` from the cache, fetching (with retries) when missing or stale.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, String>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(ApiClient, AuthToken) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let token = self.token().await?;

        let ticket = {
            let mut cache = self.cache.lock().await;
            if !cache.is_stale(&key)
                && let Some(value) = cache.get::<T>(&key)
            {
                tracing::debug!(%key, "Served from cache");
                return Ok(value);
            }
            cache.begin_fetch(&key)
        };

        let api = self.api.read().await.clone();
        let retry = self.config.read().await.retry;
        let result = run_with_retry(
            &retry,
            || fetch(api.clone(), token.clone()),
            tokio::time::sleep,
        )
        .await;

        let mut cache = self.cache.lock().await;
        match result {
            Ok(value) => {
                if let Some(ticket) = ticket {
                    cache.complete(ticket, Ok(value.clone()));
                }
                Ok(value)
            }
            Err(err) => {
                let message = err.to_string();
                if let Some(ticket) = ticket {
                    cache.complete::<T>(ticket, Err(err));
                }
                Err(message)
            }
        }
    }

    /// Run a write once (no retries) and apply its cache effects on success.
    pub async fn mutate<T, F, Fut>(
        &self,
        mutate: F,
        effects: impl FnOnce(&T) -> Vec<CacheEffect>,
    ) -> Result<T, String>
    where
        F: FnOnce(ApiClient, AuthToken) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let token = self.token().await?;
        let api = self.api.read().await.clone();
        let value = mutate(api, token).await.map_err(|e| e.to_string())?;
        self.cache.lock().await.apply(effects(&value));
        Ok(value)
    }
}
