use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Principal is a normalized identifier for the entity being authorized.
///
/// Raw identifiers arriving at the transport boundary may be wrapped in a
/// mention form (`<@42>`, `<@!42>`, `<@&42>`). `Principal::parse` strips that
/// wrapper so the rest of the crate only ever sees the bare id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    const MENTION_PREFIXES: [&'static str; 3] = ["<@!", "<@&", "<@"];

    /// Parses and normalizes a raw principal identifier.
    pub fn parse(raw: &str) -> Result<Principal> {
        let raw = raw.trim();

        let id = match raw.strip_suffix('>') {
            Some(inner) => Self::MENTION_PREFIXES
                .iter()
                .find_map(|prefix| inner.strip_prefix(prefix))
                .ok_or_else(|| Error::InvalidPrincipal(format!("malformed mention `{raw}`")))?,
            None => raw,
        };

        if id.is_empty() {
            return Err(Error::InvalidPrincipal(
                "principal cannot be empty".to_string(),
            ));
        }
        if id.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
            return Err(Error::InvalidPrincipal(format!(
                "principal `{raw}` contains invalid characters"
            )));
        }

        Ok(Principal(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_id() {
        assert_eq!(Principal::parse("42").unwrap().as_str(), "42");
        assert_eq!(Principal::parse("  alice ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_parse_mention_forms() {
        assert_eq!(Principal::parse("<@42>").unwrap().as_str(), "42");
        assert_eq!(Principal::parse("<@!42>").unwrap().as_str(), "42");
        assert_eq!(Principal::parse("<@&42>").unwrap().as_str(), "42");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(
            Principal::parse(""),
            Err(Error::InvalidPrincipal(_))
        ));
        assert!(matches!(
            Principal::parse("<@>"),
            Err(Error::InvalidPrincipal(_))
        ));
        assert!(matches!(
            Principal::parse("<#42>"),
            Err(Error::InvalidPrincipal(_))
        ));
        assert!(matches!(
            Principal::parse("two words"),
            Err(Error::InvalidPrincipal(_))
        ));
    }
}
