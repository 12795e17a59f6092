//! Adventure presentation
//!
//! Derives everything the adventure screens show from a cached [`Adventure`]:
//! - **Outcome**: status → title/subtitle/background/icon bundle
//! - **Progress**: HP-bar percentage and tier colors
//! - **Breakdown**: per-day damage rows
//! - **View**: the above composed, with monster fallbacks applied
//!
//! [`Adventure`]: habitquest_types::Adventure

mod breakdown;
mod outcome;
mod progress;
mod view;


pub use breakdown::{BreakdownRow, BreakdownRows, breakdown_rows};
pub use outcome::{Outcome, OutcomeDisplay, XP_PENALTY_CAPTION, penalty_caption};
pub use progress::{hp_bar_style, hp_bar_width, hp_percent, tier_color};
pub use view::{
    AdventureResultView, FALLBACK_MONSTER_EMOJI, FALLBACK_MONSTER_NAME, FALLBACK_MONSTER_TIER,
    MonsterView,
};
