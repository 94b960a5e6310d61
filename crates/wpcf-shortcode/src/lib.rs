//! Contact Form 7 shortcode parser and preview renderer.
//!
//! Converts the shortcode markup authored in a form step
//! (`[text* your-name maxlength:10]`, `[select menu "A" "B"]`, ...) into
//! non-submitting HTML form controls.
//!
//! # Architecture
//!
//! Processing happens in two separate passes:
//!
//! 1. **Recognition** ([`parse`]): a left-to-right scan turns raw content into
//!    typed [`Node`]s. Unknown or malformed shortcodes become
//!    [`Node::Unrecognized`] and are kept verbatim.
//! 2. **Rendering** ([`HtmlRenderer`]): every node maps to an HTML fragment;
//!    line breaks in author text become `<br />`.
//!
//! [`StepRenderer`] runs both passes for one step.
//!
//! # Example
//!
//! ```
//! use wpcf_shortcode::StepRenderer;
//!
//! let html = StepRenderer::new().render(r#"[select* menu "Tea" "Coffee"]"#);
//! assert!(html.contains(r#"<option value="Tea">Tea</option>"#));
//! ```

mod attrs;
mod grammar;
mod parser;
mod render;
mod step;

pub use attrs::{Attribute, Attributes};
pub use grammar::{
    AcceptanceTag, ChoiceKind, ChoiceTag, GroupBoundary, InputKind, InputTag, Node, QuizTag,
    SubmitTag, TagKind,
};
pub use parser::{field_names, parse};
pub use render::{HtmlRenderer, LINE_BREAK, MarkupPolicy};
pub use step::{StepRenderer, render_step};
