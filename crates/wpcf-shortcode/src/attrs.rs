//! Shortcode attribute parsing.
//!
//! Parses the `key:value` tokens that trail a tag's field name, e.g. the
//! ` maxlength:10 min:1` in `[number* age maxlength:10 min:1]`.

/// A single `key:value` attribute token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Text before the first colon.
    pub key: String,
    /// Text after the first colon (may itself contain colons).
    pub value: String,
}

/// Attributes parsed from a shortcode fragment, in source order.
///
/// Tokens are separated by runs of whitespace. Only tokens containing a `:`
/// are kept; everything else (`use_label_element`, stray words) is dropped
/// without complaint. Keys and values are not validated.
///
/// # Example
///
/// ```
/// use wpcf_shortcode::Attributes;
///
/// let attrs = Attributes::parse(" maxlength:10 decorative min:1");
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs.get("maxlength"), Some("10"));
/// assert_eq!(attrs.to_html(), r#"maxlength="10" min="1""#);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Parse a raw attribute fragment.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let items = fragment
            .split_whitespace()
            .filter_map(|token| {
                let (key, value) = token.split_once(':')?;
                Some(Attribute {
                    key: key.to_owned(),
                    value: value.to_owned(),
                })
            })
            .collect();

        Self { items }
    }

    /// Get the value of the first attribute with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    /// Iterate over attributes in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter()
    }

    /// Number of recognized attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no token qualified as an attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render as space-joined `key="value"` pairs, or an empty string.
    ///
    /// Values are emitted verbatim. Use the renderer with
    /// [`MarkupPolicy::Escaped`](crate::MarkupPolicy::Escaped) for escaped output.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.items
            .iter()
            .map(|attr| format!(r#"{}="{}""#, attr.key, attr.value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fragment() {
        let attrs = Attributes::parse("");
        assert!(attrs.is_empty());
        assert_eq!(attrs.to_html(), "");
    }

    #[test]
    fn test_whitespace_only() {
        let attrs = Attributes::parse("   \t ");
        assert!(attrs.is_empty());
        assert_eq!(attrs.to_html(), "");
    }

    #[test]
    fn test_single_attribute() {
        let attrs = Attributes::parse(" maxlength:10");
        assert_eq!(attrs.get("maxlength"), Some("10"));
        assert_eq!(attrs.to_html(), r#"maxlength="10""#);
    }

    #[test]
    fn test_multiple_attributes_keep_order() {
        let attrs = Attributes::parse(" min:10 max:99");
        let keys: Vec<_> = attrs.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["min", "max"]);
        assert_eq!(attrs.to_html(), r#"min="10" max="99""#);
    }

    #[test]
    fn test_tokens_without_colon_dropped() {
        let attrs = Attributes::parse("use_label_element min:1 foo bar max:5 baz");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.to_html(), r#"min="1" max="5""#);
    }

    #[test]
    fn test_runs_of_whitespace() {
        let attrs = Attributes::parse("  a:1 \t\t b:2  ");
        assert_eq!(attrs.to_html(), r#"a="1" b="2""#);
    }

    #[test]
    fn test_split_at_first_colon() {
        let attrs = Attributes::parse("placeholder:http://example.com");
        assert_eq!(attrs.get("placeholder"), Some("http://example.com"));
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let attrs = Attributes::parse("min:000001 max:999999");
        assert_eq!(attrs.get("min"), Some("000001"));
    }

    #[test]
    fn test_empty_value() {
        let attrs = Attributes::parse("placeholder:");
        assert_eq!(attrs.get("placeholder"), Some(""));
        assert_eq!(attrs.to_html(), r#"placeholder="""#);
    }

    #[test]
    fn test_get_nonexistent() {
        let attrs = Attributes::parse("min:1");
        assert_eq!(attrs.get("max"), None);
    }

    #[test]
    fn test_counts_colon_tokens_only() {
        let fragment = "a:1 x b:2 y z c:3";
        let attrs = Attributes::parse(fragment);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.to_html().matches("=\"").count(), 3);
    }
}
