//! Whole-step rendering.

use tracing::debug;

use crate::grammar::Node;
use crate::parser::parse;
use crate::render::{HtmlRenderer, MarkupPolicy};

/// Renders one step's raw shortcode content to display markup.
///
/// Pure: the same content always yields the same markup, and the input is
/// never modified.
///
/// # Example
///
/// ```
/// use wpcf_shortcode::StepRenderer;
///
/// let html = StepRenderer::new().render("[text* your-name]\n[submit \"Send\"]");
/// assert!(html.contains(r#"name="your-name""#));
/// assert!(html.contains("<br />"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StepRenderer {
    renderer: HtmlRenderer,
}

impl StepRenderer {
    /// Create a step renderer with the default markup policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.renderer = self.renderer.with_policy(policy);
        self
    }

    /// Active markup policy.
    #[must_use]
    pub fn policy(&self) -> MarkupPolicy {
        self.renderer.policy()
    }

    /// Render step content.
    #[must_use]
    pub fn render(&self, content: &str) -> String {
        let nodes = parse(content);
        let html = self.renderer.render(&nodes);

        let unrecognized = nodes
            .iter()
            .filter(|node| matches!(node, Node::Unrecognized(_)))
            .count();
        debug!(
            nodes = nodes.len(),
            unrecognized,
            bytes = html.len(),
            "Rendered step content"
        );

        html
    }
}

/// Render step content with the default [`StepRenderer`].
#[must_use]
pub fn render_step(content: &str) -> String {
    StepRenderer::new().render(content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_name_and_submit_example() {
        let html = render_step("[text* your-name maxlength:10]\n[submit \"Send\"]");

        let (input, rest) = html.split_once("<br />").unwrap();
        assert!(input.starts_with(r#"<input type="text" name="your-name""#));
        assert!(input.contains(" required"));
        assert!(input.contains(r#"maxlength="10""#));
        assert!(rest.starts_with(r#"<button type="submit""#));
        assert!(rest.ends_with(">Send</button>"));
    }

    #[test]
    fn test_required_iff_star() {
        for (content, required) in [
            ("[text name]", false),
            ("[text* name]", true),
            ("[text name min:1]", false),
            ("[text* name min:1]", true),
        ] {
            let html = render_step(content);
            assert!(html.contains(r#"type="text" name="name""#), "{content}");
            assert_eq!(html.contains(" required"), required, "{content}");
        }
    }

    #[test]
    fn test_render_is_pure() {
        let content = "<label>Name</label>\n[text* your-name]\n[hidden x]";
        let before = content.to_owned();
        let first = render_step(content);
        let second = render_step(content);
        assert_eq!(first, second);
        assert_eq!(content, before);
    }

    #[test]
    fn test_malformed_does_not_halt_rendering() {
        let html = render_step("[bogus a] [text] [select s] [submit \"Go\"]");
        assert!(html.starts_with("[bogus a] [text] <select"));
        assert!(html.ends_with(">Go</button>"));
    }

    #[test]
    fn test_starter_template() {
        let content = "<label> Your name (required)\n    [text* your-name maxlength:10] </label>\n\n\
                       <label> Gender\n    [radio sex use_label_element \"Male\" \"Female\"] </label>\n\n\
                       [submit \"Send\"]";
        let html = render_step(content);
        assert_eq!(html.matches("<input ").count(), 3);
        assert_eq!(html.matches("<br />").count(), 6);
        assert!(html.contains(">Send</button>"));
    }

    #[test]
    fn test_escaped_policy() {
        let renderer = StepRenderer::new().with_policy(MarkupPolicy::Escaped);
        assert_eq!(renderer.policy(), MarkupPolicy::Escaped);
        assert_eq!(renderer.render("<i>x</i>\n"), "&lt;i&gt;x&lt;/i&gt;<br />");
    }
}
