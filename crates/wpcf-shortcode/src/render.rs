//! HTML rendering of parsed shortcode nodes.
//!
//! Rendering is separate from recognition: [`parse`](crate::parse) decides
//! what a piece of content is, [`HtmlRenderer`] decides how it looks.

use std::fmt::Write;

use crate::grammar::{
    AcceptanceTag, ChoiceKind, ChoiceTag, InputKind, InputTag, Node, QuizTag, SubmitTag,
};

/// Line break emitted for every `\r\n`, `\r` or `\n` in author text.
pub const LINE_BREAK: &str = "<br />";

/// How author-supplied text is written into the output.
///
/// Step content is written by trusted editors and routinely contains its own
/// HTML (`<label>`, `<b>`), so [`Trusted`](Self::Trusted) copies it raw.
/// [`Escaped`](Self::Escaped) HTML-escapes every author string, including
/// field names, option texts and labels, at the cost of showing inline
/// markup as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarkupPolicy {
    #[default]
    Trusted,
    Escaped,
}

/// Renders [`Node`]s as preview HTML.
///
/// # Example
///
/// ```
/// use wpcf_shortcode::{HtmlRenderer, parse};
///
/// let html = HtmlRenderer::new().render(&parse(r#"[submit "Send"]"#));
/// assert!(html.starts_with(r#"<button type="submit""#));
/// assert!(html.contains(">Send</button>"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    policy: MarkupPolicy,
}

impl HtmlRenderer {
    /// Create a renderer with the default [`MarkupPolicy::Trusted`] policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active markup policy.
    #[must_use]
    pub fn policy(&self) -> MarkupPolicy {
        self.policy
    }

    /// Render a sequence of nodes into one HTML string.
    #[must_use]
    pub fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.render_node(node, &mut out);
        }
        out
    }

    /// Append the HTML for one node.
    pub fn render_node(&self, node: &Node, out: &mut String) {
        match node {
            Node::Literal(text) | Node::Unrecognized(text) => self.push_text(out, text),
            Node::Input(tag) => self.input(tag, out),
            Node::Choice(tag) => match tag.kind {
                ChoiceKind::Select => self.select(tag, out),
                ChoiceKind::Checkbox | ChoiceKind::Radio => self.toggles(tag, out),
            },
            Node::Acceptance(tag) => self.acceptance(tag, out),
            Node::Quiz(tag) => self.quiz(tag, out),
            Node::Submit(tag) => self.submit(tag, out),
            // Conditional logic is evaluated elsewhere
            Node::GroupBoundary(_) => {}
        }
    }

    fn input(&self, tag: &InputTag, out: &mut String) {
        let type_name = tag.kind.input_type().unwrap_or("textarea");
        match tag.kind.input_type() {
            Some(input_type) => {
                let _ = write!(out, r#"<input type="{input_type}" name=""#);
            }
            None => out.push_str(r#"<textarea name=""#),
        }
        self.push_attr(out, &tag.name);
        out.push('"');
        push_class(out, type_name, tag.required);
        if tag.required {
            out.push_str(" required");
        }
        for attr in tag.attrs.iter() {
            out.push(' ');
            self.push_attr(out, &attr.key);
            out.push_str("=\"");
            self.push_attr(out, &attr.value);
            out.push('"');
        }
        if tag.kind == InputKind::Textarea {
            out.push_str("></textarea>");
        } else {
            out.push_str(" />");
        }
    }

    fn select(&self, tag: &ChoiceTag, out: &mut String) {
        out.push_str(r#"<select name=""#);
        self.push_attr(out, &tag.name);
        out.push('"');
        push_class(out, "select", tag.required);
        if tag.required {
            out.push_str(" required");
        }
        out.push('>');
        for option in &tag.options {
            out.push_str(r#"<option value=""#);
            self.push_attr(out, option);
            out.push_str(r#"">"#);
            self.push_text(out, option);
            out.push_str("</option>");
        }
        out.push_str("</select>");
    }

    /// Checkbox and radio groups: one labelled control per option.
    fn toggles(&self, tag: &ChoiceTag, out: &mut String) {
        let (input_type, field_suffix, separator) = match tag.kind {
            ChoiceKind::Checkbox => ("checkbox", "[]", LINE_BREAK),
            _ => ("radio", "", ""),
        };

        out.push_str("<div");
        push_class(out, input_type, tag.required);
        out.push('>');
        for (idx, option) in tag.options.iter().enumerate() {
            if idx > 0 {
                out.push_str(separator);
            }
            let _ = write!(out, r#"<label><input type="{input_type}" name=""#);
            self.push_attr(out, &tag.name);
            out.push_str(field_suffix);
            out.push_str(r#"" value=""#);
            self.push_attr(out, option);
            out.push('"');
            if tag.required && tag.kind == ChoiceKind::Radio {
                out.push_str(" required");
            }
            out.push_str(" /><span>");
            self.push_text(out, option);
            out.push_str("</span></label>");
        }
        out.push_str("</div>");
    }

    fn acceptance(&self, tag: &AcceptanceTag, out: &mut String) {
        out.push_str(r#"<label class="wpcf7-acceptance"><input type="checkbox" name=""#);
        self.push_attr(out, &tag.name);
        out.push_str(r#"" value="1" required /><span>"#);
        self.push_text(out, &tag.label);
        out.push_str("</span></label>");
    }

    fn quiz(&self, tag: &QuizTag, out: &mut String) {
        out.push_str(r#"<label class="wpcf7-quiz-label">"#);
        self.push_text(out, &tag.question);
        out.push_str(r#"</label><input type="text" name=""#);
        self.push_attr(out, &tag.name);
        out.push('"');
        push_class(out, "quiz", true);
        out.push_str(" required />");
    }

    fn submit(&self, tag: &SubmitTag, out: &mut String) {
        out.push_str(r#"<button type="submit""#);
        push_class(out, "submit", false);
        out.push('>');
        self.push_text(out, &tag.label);
        out.push_str("</button>");
    }

    /// Write author text, converting line breaks.
    fn push_text(&self, out: &mut String, text: &str) {
        match self.policy {
            MarkupPolicy::Trusted => push_line_broken(out, text),
            MarkupPolicy::Escaped => push_line_broken(out, &html_escape::encode_text(text)),
        }
    }

    /// Write a double-quoted attribute value.
    fn push_attr(&self, out: &mut String, value: &str) {
        match self.policy {
            MarkupPolicy::Trusted => out.push_str(value),
            MarkupPolicy::Escaped => {
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
            }
        }
    }
}

fn push_class(out: &mut String, control: &str, required: bool) {
    let _ = write!(out, r#" class="wpcf7-form-control wpcf7-{control}"#);
    if required {
        out.push_str(" wpcf7-validates-as-required");
    }
    out.push('"');
}

/// Append `text`, replacing each `\r\n`, `\r` or `\n` with [`LINE_BREAK`].
fn push_line_broken(out: &mut String, text: &str) {
    let mut chars = text.char_indices().peekable();
    let mut segment_start = 0;

    while let Some((i, c)) = chars.next() {
        if c != '\r' && c != '\n' {
            continue;
        }
        out.push_str(&text[segment_start..i]);
        out.push_str(LINE_BREAK);
        segment_start = i + 1;
        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            segment_start += 1;
        }
    }

    out.push_str(&text[segment_start..]);
}
