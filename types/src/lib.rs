//! Shared wire types for HabitQuest
//!
//! This crate contains the serializable request/response types exchanged with
//! the HabitQuest REST API. They are shared between the target-independent
//! client core (habitquest-core), the WASM frontend (habitquest-ui) and the CLI.
//!
//! Every response type implements [`Validate`]: decoding goes through serde
//! first, then the semantic checks here, so a response either becomes a typed
//! value or is rejected at the HTTP boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type AdventureId = i64;
pub type MonsterId = i64;
pub type TaskId = i64;
pub type UserId = i64;
pub type FriendRequestId = i64;

// ─────────────────────────────────────────────────────────────────────────────
// Schema Validation
// ─────────────────────────────────────────────────────────────────────────────

/// A response that decoded but breaks an invariant the client relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub field: &'static str,
    pub reason: String,
}

impl SchemaViolation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for SchemaViolation {}

/// Semantic checks applied to a decoded response.
pub trait Validate {
    fn validate(&self) -> Result<(), SchemaViolation>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

/// Empty responses (e.g. `204 No Content`)
impl Validate for () {
    fn validate(&self) -> Result<(), SchemaViolation> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Adventure Types
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle state of an adventure. Everything but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdventureStatus {
    #[default]
    Active,
    Completed,
    Escaped,
    Abandoned,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

impl AdventureStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AdventureStatus::Completed | AdventureStatus::Escaped | AdventureStatus::Abandoned
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdventureStatus::Active => "Active",
            AdventureStatus::Completed => "Victory",
            AdventureStatus::Escaped => "Escaped",
            AdventureStatus::Abandoned => "Abandoned",
            AdventureStatus::Unknown => "Unknown",
        }
    }
}

/// Monster difficulty classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterTier {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
    Boss,
    #[serde(other)]
    Unknown,
}

impl MonsterTier {
    pub fn label(&self) -> &'static str {
        match self {
            MonsterTier::Easy => "Easy",
            MonsterTier::Medium => "Medium",
            MonsterTier::Hard => "Hard",
            MonsterTier::Expert => "Expert",
            MonsterTier::Boss => "Boss",
            MonsterTier::Unknown => "Unknown",
        }
    }

    pub fn all() -> &'static [MonsterTier] {
        &[
            MonsterTier::Easy,
            MonsterTier::Medium,
            MonsterTier::Hard,
            MonsterTier::Expert,
            MonsterTier::Boss,
        ]
    }
}

/// Monster descriptor embedded in an adventure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdventureMonster {
    #[serde(default)]
    pub id: Option<MonsterId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub tier: Option<MonsterTier>,
}

/// Damage dealt on one day of an adventure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBreakdownEntry {
    pub date: NaiveDate,
    pub damage_dealt: u32,
    #[serde(default)]
    pub tasks_completed: Option<u32>,
}

/// An adventure as returned by `GET /adventures/{id}`.
///
/// Server-computed; the client never recomputes damage, rounds or XP.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adventure {
    pub id: AdventureId,
    pub status: AdventureStatus,
    pub monster_current_hp: u32,
    pub monster_max_hp: u32,
    #[serde(default)]
    pub total_damage_dealt: u32,
    #[serde(default)]
    pub current_round: u32,
    /// Already discounted by the server when the monster was not defeated
    #[serde(default)]
    pub xp_earned: u32,
    #[serde(default)]
    pub monster: Option<AdventureMonster>,
    #[serde(default)]
    pub daily_breakdown: Option<Vec<DailyBreakdownEntry>>,
    #[serde(default)]
    pub started_at: Option<NaiveDate>,
    #[serde(default)]
    pub ends_at: Option<NaiveDate>,
}

impl Validate for Adventure {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.monster_current_hp > self.monster_max_hp {
            return Err(SchemaViolation::new(
                "monster_current_hp",
                format!(
                    "current hp {} exceeds max hp {}",
                    self.monster_current_hp, self.monster_max_hp
                ),
            ));
        }
        Ok(())
    }
}

/// Monster available to start an adventure against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub tier: Option<MonsterTier>,
    pub max_hp: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for Monster {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.name.trim().is_empty() {
            return Err(SchemaViolation::new("name", "empty monster name"));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Task Types
// ─────────────────────────────────────────────────────────────────────────────

/// A daily task. Completing one deals damage to the active monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed_today: bool,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub xp_reward: u32,
}

impl Validate for Task {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.title.trim().is_empty() {
            return Err(SchemaViolation::new("title", "empty task title"));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User & Friend Types
// ─────────────────────────────────────────────────────────────────────────────

/// The signed-in user (`GET /users/me`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub level: u32,
    pub xp: u64,
    #[serde(default)]
    pub current_streak: u32,
}

impl UserProfile {
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

impl Validate for UserProfile {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.username.is_empty() {
            return Err(SchemaViolation::new("username", "empty username"));
        }
        Ok(())
    }
}

/// Another user, as seen in search results and friend lists
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub level: u32,
}

impl UserSummary {
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

impl Validate for UserSummary {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.username.is_empty() {
            return Err(SchemaViolation::new("username", "empty username"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: FriendRequestId,
    pub from: UserSummary,
    pub to: UserSummary,
    #[serde(default)]
    pub status: FriendRequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl FriendRequest {
    /// True when `user_id` is the recipient and the request still awaits an answer
    pub fn awaits(&self, user_id: UserId) -> bool {
        self.status == FriendRequestStatus::Pending && self.to.id == user_id
    }
}

impl Validate for FriendRequest {
    fn validate(&self) -> Result<(), SchemaViolation> {
        self.from.validate()?;
        self.to.validate()?;
        if self.from.id == self.to.id {
            return Err(SchemaViolation::new("to", "request addressed to its sender"));
        }
        Ok(())
    }
}

/// Answer to a pending friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestDecision {
    Accept,
    Decline,
}

impl FriendRequestDecision {
    /// Trailing path segment of the respond endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            FriendRequestDecision::Accept => "accept",
            FriendRequestDecision::Decline => "decline",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request Bodies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartAdventure {
    pub monster_id: MonsterId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFriendRequest {
    pub user_id: UserId,
}
