//! UI Components
//!
//! Presentational widgets shared by the pages. None of them touch the
//! network; data comes in through props and actions leave through handlers.

pub mod badges;
pub mod hp_bar;
pub mod list_items;
pub mod tabs;
pub mod toast;

pub use badges::{LevelBadge, StatusBadge, StreakBadge, TierBadge};
pub use hp_bar::HpBar;
pub use list_items::{
    AdventureHistoryItem, FriendItem, FriendRequestItem, MonsterItem, TaskItem, UserSearchItem,
};
pub use tabs::{TabBar, TabSpec};
pub use toast::{ToastFrame, use_toast, use_toast_provider};
