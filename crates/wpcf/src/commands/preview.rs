//! `wpcf preview` and `wpcf render` command implementations.

use std::path::PathBuf;

use clap::Args;
use wpcf_builder::{PreviewRoute, PreviewSession};
use wpcf_shortcode::StepRenderer;

use super::{Context, GlobalArgs, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the preview command.
#[derive(Args)]
pub(crate) struct PreviewArgs {
    /// Form id, `preview/<id>` locator, or share link.
    reference: String,

    /// 1-based step to show.
    #[arg(short, long, default_value_t = 1)]
    step: usize,

    /// Print the page for every step in order.
    #[arg(long, conflicts_with = "step")]
    all: bool,
}

impl PreviewArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;

        let route = PreviewRoute::resolve(&self.reference)?;
        let mut session = PreviewSession::load(&ctx.store, &route)?.with_policy(ctx.markup());

        if self.all {
            loop {
                if let Some(heading) = step_heading(&session) {
                    output.highlight(&heading);
                }
                output.emit(&session.render_page());
                if !session.advance() {
                    break;
                }
            }
            return Ok(());
        }

        // An empty form still renders its empty state.
        if !session.navigator().is_empty() {
            session.show_step(self.step)?;
        }
        output.emit(&session.render_page());
        Ok(())
    }
}

/// Position heading for `--all`, `None` for a form without steps.
fn step_heading(session: &PreviewSession) -> Option<String> {
    let nav = session.navigator();
    (!nav.is_empty()).then(|| format!("Step {} of {}", nav.index() + 1, nav.len()))
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// File with shortcode content, or `-` for stdin.
    source: PathBuf,
}

impl RenderArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;

        let content = read_input(&self.source)?;
        let renderer = StepRenderer::new().with_policy(ctx.markup());
        output.emit(&renderer.render(&content));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use wpcf_storage::{FormDefinition, Step};

    use super::*;

    #[test]
    fn test_step_heading() {
        let mut form = FormDefinition::blank("abc", "Survey", Utc::now());
        form.steps.push(Step::new(2, "[email e]"));
        let mut session = PreviewSession::open(form);

        assert_eq!(step_heading(&session).as_deref(), Some("Step 1 of 2"));
        session.advance();
        assert_eq!(step_heading(&session).as_deref(), Some("Step 2 of 2"));
    }

    #[test]
    fn test_no_step_heading_without_steps() {
        let mut form = FormDefinition::blank("abc", "Empty", Utc::now());
        form.steps.clear();

        assert_eq!(step_heading(&PreviewSession::open(form)), None);
    }
}
