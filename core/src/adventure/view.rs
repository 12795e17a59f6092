use std::fmt::Write as _;

use habitquest_types::{Adventure, AdventureMonster, MonsterTier};

use super::breakdown::{BreakdownRows, breakdown_rows};
use super::outcome::{Outcome, OutcomeDisplay, penalty_caption};
use super::progress::{hp_percent, tier_color};

pub const FALLBACK_MONSTER_NAME: &str = "Unknown Monster";
pub const FALLBACK_MONSTER_EMOJI: &str = "👾";
pub const FALLBACK_MONSTER_TIER: MonsterTier = MonsterTier::Easy;

/// Monster descriptor with fallbacks applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterView<'a> {
    pub name: &'a str,
    pub emoji: &'a str,
    pub tier: MonsterTier,
}

impl<'a> MonsterView<'a> {
    pub fn from_descriptor(monster: Option<&'a AdventureMonster>) -> Self {
        match monster {
            Some(monster) => Self {
                name: monster
                    .name
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(FALLBACK_MONSTER_NAME),
                emoji: monster.emoji.as_deref().unwrap_or(FALLBACK_MONSTER_EMOJI),
                tier: monster.tier.unwrap_or(FALLBACK_MONSTER_TIER),
            },
            None => Self {
                name: FALLBACK_MONSTER_NAME,
                emoji: FALLBACK_MONSTER_EMOJI,
                tier: FALLBACK_MONSTER_TIER,
            },
        }
    }

    pub fn color(&self) -> &'static str {
        tier_color(Some(self.tier))
    }
}

/// Everything the result screen shows for a finished adventure.
///
/// Derived once from the cached adventure; nothing here is sent back.
#[derive(Debug, Clone)]
pub struct AdventureResultView<'a> {
    adventure: &'a Adventure,
    pub outcome: Outcome,
    pub display: &'static OutcomeDisplay,
    pub monster: MonsterView<'a>,
    pub hp_percent: f64,
    pub penalty: Option<&'static str>,
}

impl<'a> AdventureResultView<'a> {
    pub fn new(adventure: &'a Adventure) -> Self {
        let outcome = Outcome::classify(adventure.status);
        Self {
            adventure,
            outcome,
            display: outcome.display(),
            monster: MonsterView::from_descriptor(adventure.monster.as_ref()),
            hp_percent: hp_percent(adventure.monster_current_hp, adventure.monster_max_hp),
            penalty: penalty_caption(adventure.status),
        }
    }

    pub fn adventure(&self) -> &'a Adventure {
        self.adventure
    }

    pub fn subtitle(&self) -> String {
        self.display.subtitle(self.monster.name)
    }

    /// XP as shown, e.g. `+240 XP`
    pub fn xp_label(&self) -> String {
        format!("+{} XP", self.adventure.xp_earned)
    }

    pub fn hp_label(&self) -> String {
        format!(
            "{}/{} ({:.0}%)",
            self.adventure.monster_current_hp, self.adventure.monster_max_hp, self.hp_percent
        )
    }

    /// `None` hides the breakdown section
    pub fn breakdown(&self) -> Option<BreakdownRows<'a>> {
        let adventure: &'a Adventure = self.adventure;
        breakdown_rows(adventure.daily_breakdown.as_deref())
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        let adventure = self.adventure;
        let mut out = String::new();

        let _ = writeln!(out, "{} {}", self.display.icon, self.display.title);
        let _ = writeln!(out, "{}", self.subtitle());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {} [{}]",
            self.monster.emoji,
            self.monster.name,
            self.monster.tier.label()
        );
        let _ = writeln!(out, "HP: {}", self.hp_label());
        let _ = writeln!(
            out,
            "Damage dealt: {} over {} rounds",
            adventure.total_damage_dealt, adventure.current_round
        );
        let _ = writeln!(out, "XP earned: {}", self.xp_label());
        if let Some(penalty) = self.penalty {
            let _ = writeln!(out, "{penalty}");
        }

        if let Some(rows) = self.breakdown() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Daily breakdown");
            for row in rows {
                let _ = write!(out, "  {}: {} damage", row.label(), row.damage_dealt);
                if let Some(tasks) = row.tasks_completed {
                    let _ = write!(out, ", {tasks} tasks");
                }
                let _ = writeln!(out);
            }
        }
        out
    }
}
