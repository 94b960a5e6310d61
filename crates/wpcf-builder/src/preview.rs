//! Live, non-submitting form preview.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::debug;
use wpcf_shortcode::{MarkupPolicy, StepRenderer};
use wpcf_storage::{FormDefinition, FormStore, Step};

use crate::error::BuilderError;
use crate::navigator::Navigator;
use crate::route::PreviewRoute;

/// Text shown for a form without steps.
pub const EMPTY_STATE: &str = "No form content to preview.";

/// One open preview of a form snapshot.
///
/// Each session starts on the first step; navigation state is never shared
/// between sessions.
#[derive(Debug, Clone)]
pub struct PreviewSession {
    form: FormDefinition,
    navigator: Navigator,
    renderer: StepRenderer,
}

impl PreviewSession {
    /// Open a preview of `form` on its first step.
    #[must_use]
    pub fn open(form: FormDefinition) -> Self {
        let navigator = Navigator::new(form.steps.len(), &form.multi_step_settings);
        debug!(id = %form.id, steps = form.steps.len(), "Opened preview");
        Self {
            form,
            navigator,
            renderer: StepRenderer::new(),
        }
    }

    /// Load the form addressed by `route` and open a preview of it.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Storage`] if the form cannot be fetched.
    pub fn load(store: &dyn FormStore, route: &PreviewRoute) -> Result<Self, BuilderError> {
        let form = store.get(route.form_id())?;
        Ok(Self::open(form))
    }

    /// Set the markup policy for step content.
    #[must_use]
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.renderer = self.renderer.with_policy(policy);
        self
    }

    #[must_use]
    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Step currently displayed, `None` for a form without steps.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.form.steps.get(self.navigator.index())
    }

    /// Rendered markup of the current step.
    #[must_use]
    pub fn current_markup(&self) -> Option<String> {
        self.current_step()
            .map(|step| self.renderer.render(&step.content))
    }

    pub fn advance(&mut self) -> bool {
        self.navigator.advance()
    }

    pub fn retreat(&mut self) -> bool {
        self.navigator.retreat()
    }

    /// Jump to the 1-based step `position` by walking from the first step.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::StepOutOfRange`] if no such step exists.
    pub fn show_step(&mut self, position: usize) -> Result<(), BuilderError> {
        let count = self.navigator.len();
        if position == 0 || position > count {
            return Err(BuilderError::StepOutOfRange {
                requested: position,
                count,
            });
        }
        self.navigator.reset();
        while self.navigator.index() + 1 < position && self.navigator.advance() {}
        Ok(())
    }

    /// Render the whole preview page for the current step.
    #[must_use]
    pub fn render_page(&self) -> String {
        let Some(markup) = self.current_markup() else {
            return format!(
                "<section class=\"wpcf7-preview wpcf7-preview-empty\"><p>{EMPTY_STATE}</p></section>"
            );
        };

        let mut page = String::new();
        let _ = writeln!(
            page,
            r#"<section class="wpcf7-preview" data-form="{}">"#,
            encode_double_quoted_attribute(&self.form.id)
        );
        let _ = writeln!(page, "<h2>{} - Preview</h2>", encode_text(&self.form.title));
        page.push_str("<form class=\"wpcf7-form\" action=\"#\" onsubmit=\"return false;\" novalidate>\n");
        let _ = writeln!(
            page,
            r#"<div class="wpcf7-step" data-step="{}">{markup}</div>"#,
            self.current_step().map_or(0, |step| step.id)
        );
        self.write_navigation(&mut page);
        page.push_str("</form>\n</section>");
        page
    }

    fn write_navigation(&self, page: &mut String) {
        let nav = &self.navigator;
        if !nav.shows_controls() {
            return;
        }

        page.push_str("<nav class=\"wpcf7-steps-nav\">");
        if nav.can_retreat() {
            let _ = write!(
                page,
                r#"<button type="button" class="wpcf7-prev">{}</button>"#,
                encode_text(nav.prev_label())
            );
        } else {
            page.push_str("<span></span>");
        }
        if nav.can_advance() {
            let _ = write!(
                page,
                r#"<button type="button" class="wpcf7-next">{}</button>"#,
                encode_text(nav.next_label())
            );
        }
        page.push_str("</nav>\n");
    }
}
