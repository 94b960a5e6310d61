//! Preview addressing.
//!
//! A form is reachable at the locator `preview/<id>`, usually carried as the
//! fragment of the page hosting the builder:
//! `https://example.com/builder/#preview/<id>`.

use std::fmt;
use std::str::FromStr;

use crate::error::BuilderError;

/// Locator prefix.
const PREFIX: &str = "preview/";

/// Address of one form's preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRoute {
    form_id: String,
}

impl PreviewRoute {
    #[must_use]
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
        }
    }

    #[must_use]
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Parse `preview/<id>`, `#preview/<id>` or a full URL whose fragment is
    /// `preview/<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidRoute`] when the input (or its fragment)
    /// is not a preview locator or the id is empty.
    pub fn parse(input: &str) -> Result<Self, BuilderError> {
        let trimmed = input.trim();
        let locator = trimmed
            .split_once('#')
            .map_or(trimmed, |(_, fragment)| fragment);

        let id = locator
            .strip_prefix(PREFIX)
            .map(|id| id.trim_end_matches('/'))
            .filter(|id| is_plain_id(id))
            .ok_or_else(|| BuilderError::InvalidRoute(input.to_owned()))?;

        Ok(Self::new(id))
    }

    /// Like [`parse`](Self::parse), but a bare form id is accepted as well.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidRoute`] when the input is neither a
    /// preview locator nor a bare id.
    pub fn resolve(input: &str) -> Result<Self, BuilderError> {
        let trimmed = input.trim();
        if is_plain_id(trimmed) {
            return Ok(Self::new(trimmed));
        }
        Self::parse(input)
    }

    /// Shareable link: `base` with its fragment replaced by this locator.
    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        let base = base.split_once('#').map_or(base, |(page, _)| page);
        format!("{base}#{self}")
    }
}

impl fmt::Display for PreviewRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.form_id)
    }
}

impl FromStr for PreviewRoute {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Build the shareable preview link for form `id`.
#[must_use]
pub fn share_url(base: &str, id: &str) -> String {
    PreviewRoute::new(id).share_url(base)
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '#', '?']) && !id.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_forms() {
        for input in [
            "preview/15cbc5d",
            "#preview/15cbc5d",
            "https://example.com/builder/#preview/15cbc5d",
            "http://localhost:8080/?admin=true#preview/15cbc5d/",
            "  preview/15cbc5d\n",
        ] {
            let route = PreviewRoute::parse(input).unwrap();
            assert_eq!(route.form_id(), "15cbc5d", "{input}");
        }
    }

    #[test]
    fn test_parse_rejects() {
        for input in [
            "",
            "preview/",
            "#edit/15cbc5d",
            "https://example.com/builder/",
            "preview/a/b",
            "15cbc5d",
        ] {
            assert!(PreviewRoute::parse(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_resolve_accepts_bare_id() {
        assert_eq!(PreviewRoute::resolve("abc").unwrap().form_id(), "abc");
        assert_eq!(
            PreviewRoute::resolve("#preview/abc").unwrap().form_id(),
            "abc"
        );
        assert!(PreviewRoute::resolve("a b").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(PreviewRoute::new("abc").to_string(), "preview/abc");
    }

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://example.com/builder/", "abc"),
            "https://example.com/builder/#preview/abc"
        );
        assert_eq!(
            share_url("https://example.com/builder/#preview/old", "abc"),
            "https://example.com/builder/#preview/abc"
        );
    }

    #[test]
    fn test_share_url_parses_back() {
        let url = share_url("http://localhost:8080/", "f00d");
        let route: PreviewRoute = url.parse().unwrap();
        assert_eq!(route.form_id(), "f00d");
    }
}
