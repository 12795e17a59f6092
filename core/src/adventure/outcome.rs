//! Outcome classification for finished adventures

use habitquest_types::AdventureStatus;

/// Shown under the XP total whenever the monster was not defeated.
/// The discount itself is applied by the server.
pub const XP_PENALTY_CAPTION: &str = "50% XP penalty applied for not defeating the monster";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Victory,
    Escaped,
    Retreated,
}

/// Fixed presentation bundle for an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeDisplay {
    pub title: &'static str,
    /// `{name}` is replaced with the monster name
    pub subtitle_template: &'static str,
    /// CSS class carrying the background color
    pub background: &'static str,
    pub icon: &'static str,
}

const VICTORY: OutcomeDisplay = OutcomeDisplay {
    title: "VICTORY!",
    subtitle_template: "You defeated {name}!",
    background: "outcome-victory",
    icon: "🏆",
};

const ESCAPED: OutcomeDisplay = OutcomeDisplay {
    title: "ESCAPED...",
    subtitle_template: "{name} got away this time.",
    background: "outcome-escaped",
    icon: "💨",
};

const RETREATED: OutcomeDisplay = OutcomeDisplay {
    title: "RETREATED",
    subtitle_template: "You retreated from {name}.",
    background: "outcome-abandoned",
    icon: "🏳️",
};

impl Outcome {
    /// Completed and abandoned map to their own outcome; everything else,
    /// including adventures still marked active, reads as escaped.
    pub fn classify(status: AdventureStatus) -> Self {
        match status {
            AdventureStatus::Completed => Outcome::Victory,
            AdventureStatus::Abandoned => Outcome::Retreated,
            AdventureStatus::Escaped | AdventureStatus::Active | AdventureStatus::Unknown => {
                Outcome::Escaped
            }
        }
    }

    pub fn display(&self) -> &'static OutcomeDisplay {
        match self {
            Outcome::Victory => &VICTORY,
            Outcome::Escaped => &ESCAPED,
            Outcome::Retreated => &RETREATED,
        }
    }
}

impl OutcomeDisplay {
    pub fn subtitle(&self, monster_name: &str) -> String {
        self.subtitle_template.replace("{name}", monster_name)
    }
}

/// Penalty caption for `status`; `None` only for a completed adventure
pub fn penalty_caption(status: AdventureStatus) -> Option<&'static str> {
    (status != AdventureStatus::Completed).then_some(XP_PENALTY_CAPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_terminal_statuses_fall_back_to_escaped() {
        for status in [
            AdventureStatus::Escaped,
            AdventureStatus::Active,
            AdventureStatus::Unknown,
        ] {
            assert_eq!(Outcome::classify(status), Outcome::Escaped);
            assert_eq!(Outcome::classify(status).display(), &ESCAPED);
        }
    }

    #[test]
    fn terminal_statuses_have_their_own_bundle() {
        assert_eq!(
            Outcome::classify(AdventureStatus::Completed).display().title,
            "VICTORY!"
        );
        assert_eq!(
            Outcome::classify(AdventureStatus::Abandoned).display().title,
            "RETREATED"
        );
    }

    #[test]
    fn subtitle_interpolates_name() {
        assert_eq!(VICTORY.subtitle("Doom Scroller"), "You defeated Doom Scroller!");
        assert_eq!(ESCAPED.subtitle("Doom Scroller"), "Doom Scroller got away this time.");
    }

    #[test]
    fn penalty_only_when_not_completed() {
        assert_eq!(penalty_caption(AdventureStatus::Completed), None);
        assert_eq!(
            penalty_caption(AdventureStatus::Escaped),
            Some(XP_PENALTY_CAPTION)
        );
        assert_eq!(
            penalty_caption(AdventureStatus::Abandoned),
            Some(XP_PENALTY_CAPTION)
        );
    }
}
