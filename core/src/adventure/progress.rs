//! HP bar and tier colors

use habitquest_types::MonsterTier;

/// Remaining monster HP as a percentage.
///
/// Only the lower bound is clamped; the server guarantees `current <= max`.
/// A zero-HP monster reads as 0%.
pub fn hp_percent(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (current as f64 / max as f64 * 100.0).max(0.0)
}

/// Width declaration for an HP bar fill element
pub fn hp_bar_width(current: u32, max: u32) -> String {
    format!("width: {:.1}%;", hp_percent(current, max))
}

/// Full inline style for an HP bar fill: width plus tier color
pub fn hp_bar_style(current: u32, max: u32, color: &str) -> String {
    format!("{} background-color: {color};", hp_bar_width(current, max))
}

/// Color token for a tier; missing or unrecognized tiers use easy's color
pub fn tier_color(tier: Option<MonsterTier>) -> &'static str {
    match tier {
        Some(MonsterTier::Medium) => "#facc15",
        Some(MonsterTier::Hard) => "#fb923c",
        Some(MonsterTier::Expert) => "#f87171",
        Some(MonsterTier::Boss) => "#c084fc",
        Some(MonsterTier::Easy | MonsterTier::Unknown) | None => "#4ade80",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_max() {
        assert_eq!(hp_percent(0, 200), 0.0);
        assert_eq!(hp_percent(50, 200), 25.0);
        assert_eq!(hp_percent(200, 200), 100.0);
    }

    #[test]
    fn zero_max_is_zero() {
        assert_eq!(hp_percent(0, 0), 0.0);
        assert_eq!(hp_percent(10, 0), 0.0);
    }

    #[test]
    fn no_upper_clamp() {
        assert_eq!(hp_percent(300, 200), 150.0);
    }

    #[test]
    fn bar_width_style() {
        assert_eq!(hp_bar_width(1, 3), "width: 33.3%;");
    }

    #[test]
    fn bar_style_has_separate_declarations() {
        let style = hp_bar_style(50, 200, tier_color(Some(MonsterTier::Easy)));
        assert_eq!(style, "width: 25.0%; background-color: #4ade80;");

        let declarations: Vec<_> = style
            .split(';')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();
        assert_eq!(declarations, ["width: 25.0%", "background-color: #4ade80"]);
    }

    #[test]
    fn tier_colors() {
        let easy = tier_color(Some(MonsterTier::Easy));
        assert_eq!(tier_color(None), easy);
        assert_eq!(tier_color(Some(MonsterTier::Unknown)), easy);
        assert_eq!(tier_color(Some(MonsterTier::Boss)), "#c084fc");

        let mut colors: Vec<_> = MonsterTier::all().iter().map(|t| tier_color(Some(*t))).collect();
        colors.dedup();
        assert_eq!(colors.len(), 5);
    }
}
