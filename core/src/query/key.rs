//! Query keys
//!
//! A key is a tuple of string segments. Invalidation works on prefixes, so
//! `["adventures"]` covers both `["adventures", "current"]` and
//! `["adventures", "history"]`.

use std::fmt;

use habitquest_types::{AdventureId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self(segments.into_iter().map(|s| s.to_string()).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True when `prefix` matches the leading segments of this key
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Every key the client uses, in one place.
pub mod keys {
    use super::*;

    pub fn me() -> QueryKey {
        QueryKey::new(["user", "me"])
    }

    pub fn tasks() -> QueryKey {
        QueryKey::new(["tasks"])
    }

    pub fn monsters() -> QueryKey {
        QueryKey::new(["monsters", "available"])
    }

    pub fn adventure(id: AdventureId) -> QueryKey {
        QueryKey::new(["adventure".to_string(), id.to_string()])
    }

    /// Prefix of every `adventures/*` list key
    pub fn adventures() -> QueryKey {
        QueryKey::new(["adventures"])
    }

    pub fn current_adventure() -> QueryKey {
        QueryKey::new(["adventures", "current"])
    }

    pub fn adventure_history() -> QueryKey {
        QueryKey::new(["adventures", "history"])
    }

    /// Prefix of every `friends/*` key
    pub fn friends() -> QueryKey {
        QueryKey::new(["friends"])
    }

    pub fn friend_list() -> QueryKey {
        QueryKey::new(["friends", "list"])
    }

    pub fn friend_requests() -> QueryKey {
        QueryKey::new(["friends", "requests"])
    }

    /// Prefix of every user search key
    pub fn user_searches() -> QueryKey {
        QueryKey::new(["users", "search"])
    }

    pub fn user_search(query: &str) -> QueryKey {
        QueryKey::new(["users", "search", query])
    }

    pub fn user(id: UserId) -> QueryKey {
        QueryKey::new(["user".to_string(), id.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        assert!(keys::current_adventure().starts_with(&keys::adventures()));
        assert!(keys::adventure_history().starts_with(&keys::adventures()));
        assert!(!keys::adventure(3).starts_with(&keys::adventures()));
        assert!(keys::tasks().starts_with(&keys::tasks()));
        assert!(!keys::tasks().starts_with(&keys::current_adventure()));
    }

    #[test]
    fn user_keys_do_not_collide() {
        assert_ne!(keys::me(), keys::user(1));
        assert!(!keys::user(1).starts_with(&keys::me()));
    }

    #[test]
    fn searches_share_a_prefix() {
        assert!(keys::user_search("ada").starts_with(&keys::user_searches()));
        assert!(!keys::me().starts_with(&keys::user_searches()));
    }

    #[test]
    fn display_lists_segments() {
        assert_eq!(keys::adventure(42).to_string(), "[adventure, 42]");
    }
}
