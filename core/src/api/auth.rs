//! Bearer token handling
//!
//! Tokens are issued elsewhere; the client only carries one. API methods take
//! `&AuthToken`, so a request cannot be built without one.

use std::fmt;

/// Opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Accept a raw token, tolerating surrounding whitespace and a pasted
    /// `Bearer ` prefix. Returns `None` for an empty token.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim_start();
        let raw = raw
            .strip_prefix("Bearer ")
            .or_else(|| raw.strip_prefix("bearer "))
            .unwrap_or(raw)
            .trim();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_prefix_and_whitespace() {
        let token = AuthToken::parse("  Bearer abc.def  ").unwrap();
        assert_eq!(token.expose(), "abc.def");
    }

    #[test]
    fn empty_token_is_none() {
        assert!(AuthToken::parse("").is_none());
        assert!(AuthToken::parse("   ").is_none());
        assert!(AuthToken::parse("Bearer ").is_none());
    }

    #[test]
    fn debug_is_redacted() {
        let token = AuthToken::parse("secret").unwrap();
        assert_eq!(format!("{token:?}"), "AuthToken(****)");
    }
}
