//! Debounced user search
//!
//! Every keystroke takes a ticket; after the debounce delay the keystroke's
//! text is committed only if no newer keystroke happened meanwhile. The timer
//! itself belongs to the caller.

/// Trimmed search text, or `None` when too short to send
pub fn normalize_search(input: &str, min_len: usize) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.chars().count() < min_len.max(1) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debouncer {
    latest: u64,
    committed: String,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke. Earlier tickets can no longer commit.
    pub fn input(&mut self) -> DebounceTicket {
        self.latest += 1;
        DebounceTicket(self.latest)
    }

    /// Commit `value` if `ticket` is still the latest keystroke
    pub fn commit(&mut self, ticket: DebounceTicket, value: impl Into<String>) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.committed = value.into();
        true
    }

    /// Commit immediately (e.g. on Enter) and cancel pending keystrokes
    pub fn flush(&mut self, value: impl Into<String>) {
        let ticket = self.input();
        self.commit(ticket, value);
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_are_dropped() {
        assert_eq!(normalize_search(" a ", 2), None);
        assert_eq!(normalize_search("   ", 0), None);
        assert_eq!(normalize_search(" ada ", 2).as_deref(), Some("ada"));
        assert_eq!(normalize_search("éa", 2).as_deref(), Some("éa"));
    }

    #[test]
    fn only_latest_keystroke_commits() {
        let mut debouncer = Debouncer::new();
        let a = debouncer.input();
        let ad = debouncer.input();
        let ada = debouncer.input();

        assert!(!debouncer.commit(a, "a"));
        assert!(!debouncer.commit(ad, "ad"));
        assert_eq!(debouncer.committed(), "");
        assert!(debouncer.commit(ada, "ada"));
        assert_eq!(debouncer.committed(), "ada");
    }

    #[test]
    fn flush_cancels_pending() {
        let mut debouncer = Debouncer::new();
        let pending = debouncer.input();
        debouncer.flush("grace");
        assert!(!debouncer.commit(pending, "gr"));
        assert_eq!(debouncer.committed(), "grace");
    }
}
