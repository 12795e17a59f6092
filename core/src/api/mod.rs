//! HabitQuest REST API client
//!
//! Type-safe wrappers around the backend endpoints. Every method takes the
//! bearer token explicitly and returns a decoded, validated value or an
//! [`ApiError`]. Retries and caching live in [`crate::query`], not here.

mod auth;
mod decode;
mod error;

pub use auth::AuthToken;
pub use decode::decode_response;
pub use error::ApiError;

use habitquest_types::{
    Adventure, AdventureId, FriendRequest, FriendRequestDecision, FriendRequestId, Monster,
    NewTask, SendFriendRequest, StartAdventure, Task, TaskId, UserId, UserProfile, UserSummary,
    Validate,
};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url()?;
        Ok(Self {
            http: build_http_client(config),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build<B>(
        &self,
        method: Method,
        token: &AuthToken,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> reqwest::RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(token.expose());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    async fn request<B, T>(
        &self,
        method: Method,
        token: &AuthToken,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        let transport = |source| ApiError::Transport {
            endpoint: path.to_string(),
            source,
        };

        tracing::debug!(%method, path, "API request");
        let response = self
            .build(method, token, path, query, body)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport)?;
        decode_response(path, status, &bytes)
    }

    async fn get<T>(&self, token: &AuthToken, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        self.request::<(), T>(Method::GET, token, path, &[], None).await
    }

    async fn post<B, T>(&self, token: &AuthToken, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        self.request(Method::POST, token, path, &[], Some(body)).await
    }

    async fn post_empty<T>(&self, token: &AuthToken, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        self.request::<(), T>(Method::POST, token, path, &[], None).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn me(&self, token: &AuthToken) -> Result<UserProfile, ApiError> {
        self.get(token, "/users/me").await
    }

    pub async fn search_users(
        &self,
        token: &AuthToken,
        query: &str,
    ) -> Result<Vec<UserSummary>, ApiError> {
        self.request::<(), _>(Method::GET, token, "/users/search", &[("q", query)], None)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Adventures
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn adventure(&self, token: &AuthToken, id: AdventureId) -> Result<Adventure, ApiError> {
        self.get(token, &format!("/adventures/{id}")).await
    }

    /// The running adventure, `None` when the user is not on one
    pub async fn current_adventure(&self, token: &AuthToken) -> Result<Option<Adventure>, ApiError> {
        self.get(token, "/adventures/current").await
    }

    pub async fn adventure_history(&self, token: &AuthToken) -> Result<Vec<Adventure>, ApiError> {
        self.get(token, "/adventures/history").await
    }

    pub async fn start_adventure(
        &self,
        token: &AuthToken,
        body: &StartAdventure,
    ) -> Result<Adventure, ApiError> {
        let adventure: Adventure = self.post(token, "/adventures", body).await?;
        tracing::info!(adventure_id = adventure.id, monster_id = body.monster_id, "Adventure started");
        Ok(adventure)
    }

    pub async fn abandon_adventure(
        &self,
        token: &AuthToken,
        id: AdventureId,
    ) -> Result<Adventure, ApiError> {
        let adventure: Adventure = self
            .post_empty(token, &format!("/adventures/{id}/abandon"))
            .await?;
        tracing::info!(adventure_id = id, "Adventure abandoned");
        Ok(adventure)
    }

    pub async fn available_monsters(&self, token: &AuthToken) -> Result<Vec<Monster>, ApiError> {
        self.get(token, "/monsters/available").await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tasks
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn tasks(&self, token: &AuthToken) -> Result<Vec<Task>, ApiError> {
        self.get(token, "/tasks").await
    }

    pub async fn create_task(&self, token: &AuthToken, body: &NewTask) -> Result<Task, ApiError> {
        let task: Task = self.post(token, "/tasks", body).await?;
        tracing::info!(task_id = task.id, "Task created");
        Ok(task)
    }

    pub async fn complete_task(&self, token: &AuthToken, id: TaskId) -> Result<Task, ApiError> {
        let task: Task = self.post_empty(token, &format!("/tasks/{id}/complete")).await?;
        tracing::info!(task_id = id, streak = task.streak, "Task completed");
        Ok(task)
    }

    pub async fn delete_task(&self, token: &AuthToken, id: TaskId) -> Result<(), ApiError> {
        self.request::<(), ()>(Method::DELETE, token, &format!("/tasks/{id}"), &[], None)
            .await?;
        tracing::info!(task_id = id, "Task deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Friends
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn friends(&self, token: &AuthToken) -> Result<Vec<UserSummary>, ApiError> {
        self.get(token, "/friends").await
    }

    pub async fn friend_requests(&self, token: &AuthToken) -> Result<Vec<FriendRequest>, ApiError> {
        self.get(token, "/friends/requests").await
    }

    pub async fn send_friend_request(
        &self,
        token: &AuthToken,
        user_id: UserId,
    ) -> Result<FriendRequest, ApiError> {
        let request: FriendRequest = self
            .post(token, "/friends/requests", &SendFriendRequest { user_id })
            .await?;
        tracing::info!(request_id = request.id, user_id, "Friend request sent");
        Ok(request)
    }

    pub async fn respond_friend_request(
        &self,
        token: &AuthToken,
        id: FriendRequestId,
        decision: FriendRequestDecision,
    ) -> Result<FriendRequest, ApiError> {
        let path = format!("/friends/requests/{id}/{}", decision.path_segment());
        let request: FriendRequest = self.post_empty(token, &path).await?;
        tracing::info!(request_id = id, ?decision, "Friend request answered");
        Ok(request)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(config: &ClientConfig) -> reqwest::Client {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("habitquest/", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder.build().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_config: &ClientConfig) -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_is_encoded_by_the_client() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        let token = AuthToken::parse("secret").unwrap();
        let request = client
            .build::<()>(Method::GET, &token, "/users/search", &[("q", "ada lovelace&x=1")], None)
            .build()
            .unwrap();
        assert!(request.url().path().ends_with("/users/search"));
        assert_eq!(request.url().query(), Some("q=ada+lovelace%26x%3D1"));
    }

    #[test]
    fn plain_paths_have_no_query() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        let token = AuthToken::parse("secret").unwrap();
        let request = client
            .build::<()>(Method::GET, &token, "/tasks", &[], None)
            .build()
            .unwrap();
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn client_rejects_bad_base_url() {
        let config = ClientConfig {
            api_base_url: "localhost".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ApiClient::new(&config),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn urls_join_without_double_slash() {
        let config = ClientConfig {
            api_base_url: "https://quest.example/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/tasks"), "https://quest.example/api/tasks");
    }
}
