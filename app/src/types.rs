//! Frontend type definitions
//!
//! Re-exports the wire types shared with the API client plus the small
//! enums that only the frontend needs for navigation.

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports from habitquest-types (shared with the CLI)
// ─────────────────────────────────────────────────────────────────────────────

pub use habitquest_types::{
    // Adventures
    Adventure, AdventureId, AdventureMonster, AdventureStatus, DailyBreakdownEntry, Monster,
    MonsterId, MonsterTier, StartAdventure,
    // Tasks
    NewTask, Task, TaskId,
    // Users and friends
    FriendRequest, FriendRequestDecision, FriendRequestId, FriendRequestStatus, UserId,
    UserProfile, UserSummary,
};

// ─────────────────────────────────────────────────────────────────────────────
// Frontend-Only Types
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level page shown below the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Adventure,
    /// Result screen for one finished adventure
    AdventureResult(AdventureId),
    Tasks,
    Friends,
}

impl Page {
    /// Pages reachable from the navigation bar, in order
    pub fn nav() -> &'static [Page] {
        &[Page::Adventure, Page::Tasks, Page::Friends]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Adventure | Page::AdventureResult(_) => "Adventure",
            Page::Tasks => "Tasks",
            Page::Friends => "Friends",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Adventure | Page::AdventureResult(_) => "fa-solid fa-dragon",
            Page::Tasks => "fa-solid fa-list-check",
            Page::Friends => "fa-solid fa-user-group",
        }
    }

    /// Result pages highlight the Adventure tab
    pub fn nav_index(&self) -> usize {
        match self {
            Page::Adventure | Page::AdventureResult(_) => 0,
            Page::Tasks => 1,
            Page::Friends => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdventureTab {
    #[default]
    Current,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FriendsTab {
    #[default]
    Friends,
    Requests,
    AddFriend,
}

impl FriendsTab {
    pub fn all() -> &'static [FriendsTab] {
        &[FriendsTab::Friends, FriendsTab::Requests, FriendsTab::AddFriend]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FriendsTab::Friends => "Friends",
            FriendsTab::Requests => "Requests",
            FriendsTab::AddFriend => "Add Friend",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FriendsTab::Friends => "fa-solid fa-user-group",
            FriendsTab::Requests => "fa-solid fa-envelope",
            FriendsTab::AddFriend => "fa-solid fa-user-plus",
        }
    }
}
