//! Data and mutation hooks
//!
//! Each data hook wraps one endpoint behind the shared [`QueryCache`]; each
//! mutation hook wraps a write endpoint and applies its cache effects on
//! success. Nothing is fetched while signed out.

use std::future::Future;

use dioxus::prelude::*;
use dioxus_logger::tracing;
use gloo_timers::future::TimeoutFuture;
use habitquest_core::query::{CacheEffect, FetchTicket, QueryKey, effects, run_with_retry};
use habitquest_core::{ApiClient, ApiError, AuthToken, ClientConfig, QueryCache, QueryState, RetryPolicy, keys};

use crate::components::toast::use_toast;
use crate::session::use_session;
use crate::types::{
    Adventure, AdventureId, FriendRequest, FriendRequestDecision, FriendRequestId, Monster,
    MonsterId, NewTask, StartAdventure, Task, TaskId, UserId, UserProfile, UserSummary,
};

// ─────────────────────────────────────────────────────────────────────────────
// Query Client
// ─────────────────────────────────────────────────────────────────────────────

/// Shared cache plus the client used to fill it, provided at the app root
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: Signal<QueryCache>,
    api: Signal<Option<ApiClient>>,
    retry: RetryPolicy,
    pub search_debounce_ms: u32,
    pub min_search_len: usize,
}

impl QueryClient {
    fn new(config: ClientConfig) -> Self {
        let api = match ApiClient::new(&config) {
            Ok(api) => {
                tracing::info!(base_url = api.base_url(), "API client ready");
                Some(api)
            }
            Err(err) => {
                tracing::error!(error = %err, "API client unavailable");
                None
            }
        };
        Self {
            cache: Signal::new(QueryCache::new()),
            api: Signal::new(api),
            retry: config.retry,
            search_debounce_ms: config.search_debounce_ms,
            min_search_len: config.min_search_len,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api.read().is_some()
    }

    /// Start a fetch for `key` unless it is cached and fresh or already in
    /// flight. The task is owned by the calling component's scope and is
    /// dropped with it; a superseded result is discarded by the cache.
    fn fetch<T, R, Fut>(self, key: QueryKey, request: R)
    where
        T: Send + Sync + 'static,
        R: Fn(ApiClient) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let Some(api) = self.api.peek().clone() else {
            return;
        };
        if !self.cache.read().needs_fetch(&key) {
            return;
        }
        let mut cache = self.cache;
        let Some(ticket) = cache.write().begin_fetch(&key) else {
            return;
        };

        let retry = self.retry;
        spawn(async move {
            let mut guard = TicketGuard {
                cache,
                ticket: Some(ticket),
            };
            let result = run_with_retry(
                &retry,
                || request(api.clone()),
                |delay| TimeoutFuture::new(delay.as_millis().min(u32::MAX as u128) as u32),
            )
            .await;
            if let Some(ticket) = guard.ticket.take() {
                cache.write().complete(ticket, result);
            }
        });
    }

    pub fn invalidate(&self, key: &QueryKey) {
        let mut cache = self.cache;
        cache.write().invalidate(key);
    }

    pub fn apply(&self, effects: Vec<CacheEffect>) {
        let mut cache = self.cache;
        cache.write().apply(effects);
    }

    /// Drop cached entries under `prefix`, keeping `keep` if given
    pub fn prune(&self, prefix: &QueryKey, keep: Option<&QueryKey>) {
        let mut cache = self.cache;
        cache.write().remove_except(prefix, keep);
    }

    /// Forget every cached response (sign-out)
    pub fn clear(&self) {
        let mut cache = self.cache;
        cache.write().clear();
    }
}

/// Releases an unfinished fetch when its task is dropped with the component
/// that spawned it; otherwise the key would stay in flight for good.
struct TicketGuard {
    cache: Signal<QueryCache>,
    ticket: Option<FetchTicket>,
}

impl Drop for TicketGuard {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        match self.cache.try_write() {
            Ok(mut cache) => {
                cache.cancel(&ticket);
            }
            Err(_) => tracing::warn!(key = %ticket.key(), "Could not release dropped fetch"),
        }
    }
}

pub fn use_query_client_provider() -> QueryClient {
    use_context_provider(|| {
        let config =
            ClientConfig::default().with_api_base_url(option_env!("HABITQUEST_API_URL"));
        QueryClient::new(config)
    })
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

// ─────────────────────────────────────────────────────────────────────────────
// Generic Hooks
// ─────────────────────────────────────────────────────────────────────────────

/// Read `key_fn(&param)` from the cache, fetching it when needed.
///
/// The query is gated on `enabled` and on a signed-in session; when gated
/// and nothing is cached the state is `Idle`.
pub fn use_query<P, T, F, Fut>(
    param: P,
    enabled: bool,
    key_fn: fn(&P) -> QueryKey,
    fetch: F,
) -> QueryState<T>
where
    P: Clone + PartialEq + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(ApiClient, AuthToken, P) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let session = use_session();

    // Mirror inputs into signals so the effect re-runs when they change
    let mut param_signal = use_signal(|| param.clone());
    if *param_signal.peek() != param {
        param_signal.set(param.clone());
    }
    let mut enabled_signal = use_signal(|| enabled);
    if *enabled_signal.peek() != enabled {
        enabled_signal.set(enabled);
    }

    use_effect(move || {
        let param = param_signal();
        let Some(token) = session.token() else {
            return;
        };
        if !enabled_signal() {
            return;
        }
        let key = key_fn(&param);
        client.fetch(key, move |api| fetch(api, token.clone(), param.clone()));
    });

    let active = enabled && session.is_signed_in();
    client.cache.read().state(&key_fn(&param), active)
}

/// Handle returned by [`use_mutation`]
pub struct Mutation<I: 'static> {
    pending: Signal<bool>,
    error: Signal<Option<String>>,
    run: Callback<I>,
}

impl<I: 'static> Clone for Mutation<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: 'static> Copy for Mutation<I> {}

impl<I: 'static> Mutation<I> {
    pub fn mutate(&self, input: I) {
        self.run.call(input);
    }

    pub fn is_pending(&self) -> bool {
        *self.pending.read()
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }
}

/// Wrap a write endpoint. On success the effects computed from the response
/// are applied to the cache and `success_message` (if any) is toasted.
/// Mutations are never retried.
pub fn use_mutation<I, T, F, Fut>(
    mutate: F,
    effects: fn(&T) -> Vec<CacheEffect>,
    success_message: Option<&'static str>,
) -> Mutation<I>
where
    I: 'static,
    T: 'static,
    F: Fn(ApiClient, AuthToken, I) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let session = use_session();
    let toast = use_toast();
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let run = use_callback(move |input: I| {
        let Some(token) = session.peek_token() else {
            error.set(Some("Please sign in first".to_string()));
            return;
        };
        let Some(api) = client.api.peek().clone() else {
            error.set(Some("Server address is not configured".to_string()));
            return;
        };

        pending.set(true);
        error.set(None);
        let mut toast = toast;
        spawn(async move {
            match mutate(api, token, input).await {
                Ok(value) => {
                    client.apply(effects(&value));
                    if let Some(message) = success_message {
                        toast.success(message);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Mutation failed");
                    let message = err.user_message();
                    toast.error(message.clone());
                    error.set(Some(message));
                }
            }
            pending.set(false);
        });
    });

    Mutation {
        pending,
        error,
        run,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data Hooks
// ─────────────────────────────────────────────────────────────────────────────

pub fn use_me() -> QueryState<UserProfile> {
    use_query(
        (),
        true,
        |_| keys::me(),
        |api, token, ()| async move { api.me(&token).await },
    )
}

pub fn use_adventure(id: AdventureId) -> QueryState<Adventure> {
    use_query(
        id,
        true,
        |id| keys::adventure(*id),
        |api, token, id| async move { api.adventure(&token, id).await },
    )
}

pub fn use_current_adventure() -> QueryState<Option<Adventure>> {
    use_query(
        (),
        true,
        |_| keys::current_adventure(),
        |api, token, ()| async move { api.current_adventure(&token).await },
    )
}

pub fn use_adventure_history() -> QueryState<Vec<Adventure>> {
    use_query(
        (),
        true,
        |_| keys::adventure_history(),
        |api, token, ()| async move { api.adventure_history(&token).await },
    )
}

/// Only needed while choosing a monster
pub fn use_monsters(enabled: bool) -> QueryState<Vec<Monster>> {
    use_query(
        (),
        enabled,
        |_| keys::monsters(),
        |api, token, ()| async move { api.available_monsters(&token).await },
    )
}

pub fn use_tasks() -> QueryState<Vec<Task>> {
    use_query(
        (),
        true,
        |_| keys::tasks(),
        |api, token, ()| async move { api.tasks(&token).await },
    )
}

pub fn use_friends() -> QueryState<Vec<UserSummary>> {
    use_query(
        (),
        true,
        |_| keys::friend_list(),
        |api, token, ()| async move { api.friends(&token).await },
    )
}

pub fn use_friend_requests() -> QueryState<Vec<FriendRequest>> {
    use_query(
        (),
        true,
        |_| keys::friend_requests(),
        |api, token, ()| async move { api.friend_requests(&token).await },
    )
}

/// `None` (input too short) disables the search
pub fn use_user_search(query: Option<String>) -> QueryState<Vec<UserSummary>> {
    let enabled = query.is_some();
    use_query(
        query.unwrap_or_default(),
        enabled,
        |q| keys::user_search(q),
        |api, token, q| async move { api.search_users(&token, &q).await },
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Mutation Hooks
// ─────────────────────────────────────────────────────────────────────────────

pub fn use_complete_task() -> Mutation<TaskId> {
    use_mutation(
        |api, token, id| async move { api.complete_task(&token, id).await },
        effects::task_completed,
        Some("Task completed - damage dealt!"),
    )
}

pub fn use_create_task() -> Mutation<NewTask> {
    use_mutation(
        |api, token, body| async move { api.create_task(&token, &body).await },
        effects::task_created,
        Some("Task added"),
    )
}

pub fn use_delete_task() -> Mutation<TaskId> {
    use_mutation(
        |api, token, id| async move { api.delete_task(&token, id).await.map(|()| id) },
        |id| effects::task_deleted(*id),
        None,
    )
}

pub fn use_start_adventure() -> Mutation<MonsterId> {
    use_mutation(
        |api, token, monster_id| async move {
            api.start_adventure(&token, &StartAdventure { monster_id }).await
        },
        effects::adventure_started,
        Some("The adventure begins!"),
    )
}

pub fn use_abandon_adventure() -> Mutation<AdventureId> {
    use_mutation(
        |api, token, id| async move { api.abandon_adventure(&token, id).await },
        effects::adventure_abandoned,
        Some("You retreated from the adventure"),
    )
}

pub fn use_send_friend_request() -> Mutation<UserId> {
    use_mutation(
        |api, token, user_id| async move { api.send_friend_request(&token, user_id).await },
        effects::friend_request_sent,
        Some("Invite sent"),
    )
}

pub fn use_answer_friend_request() -> Mutation<(FriendRequestId, FriendRequestDecision)> {
    use_mutation(
        |api, token, (id, decision)| async move {
            api.respond_friend_request(&token, id, decision).await
        },
        effects::friend_request_answered,
        None,
    )
}
