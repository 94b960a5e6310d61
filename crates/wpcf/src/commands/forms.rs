//! `wpcf list|new|duplicate|delete` command implementations.

use chrono::Utc;
use clap::Args;
use wpcf_builder::{FormLibrary, share_url};
use wpcf_storage::FormDefinition;

use super::{Context, GlobalArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Also print each form's preview link.
    #[arg(long)]
    links: bool,
}

impl ListArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;
        let library = FormLibrary::new(&ctx.store, &ctx.identity);

        let forms = library.list()?;
        if forms.is_empty() {
            output.info(&format!(
                "No forms in {}",
                ctx.config.storage_resolved.forms_dir.display()
            ));
            return Ok(());
        }

        for form in &forms {
            output.emit(&summary_line(form));
            if self.links {
                output.detail(&format!("  {}", share_url(ctx.base_url(), &form.id)));
            }
        }
        Ok(())
    }
}

/// One tab-separated listing row: id, title, step count, last modified.
fn summary_line(form: &FormDefinition) -> String {
    let steps = form.steps.len();
    format!(
        "{}\t{}\t{steps} step{}\t{}",
        form.id,
        form.title,
        if steps == 1 { "" } else { "s" },
        form.modified
    )
}

/// Arguments for the new command.
#[derive(Args)]
pub(crate) struct NewArgs {
    /// Form title (default: "New contact form N").
    #[arg(short, long)]
    title: Option<String>,

    /// Start from the ready-made contact form instead of an empty step.
    #[arg(long, conflicts_with = "title")]
    starter: bool,
}

impl NewArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;
        let library = FormLibrary::new(&ctx.store, &ctx.identity);

        let form = if self.starter {
            library.create_starter(Utc::now())?
        } else {
            library.create_blank(self.title.as_deref(), Utc::now())?
        };

        output.success(&format!("Created \"{}\"", form.title));
        output.emit(&form.id);
        Ok(())
    }
}

/// Arguments for the duplicate command.
#[derive(Args)]
pub(crate) struct DuplicateArgs {
    /// Id of the form to copy.
    id: String,
}

impl DuplicateArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;
        let library = FormLibrary::new(&ctx.store, &ctx.identity);

        let copy = library.duplicate(&self.id, Utc::now())?;

        output.success(&format!("Created \"{}\"", copy.title));
        output.emit(&copy.id);
        Ok(())
    }
}

/// Arguments for the delete command.
#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// Id of the form to delete.
    id: String,
}

impl DeleteArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;
        let library = FormLibrary::new(&ctx.store, &ctx.identity);

        library.delete(&self.id)?;

        output.success(&format!("Deleted {}", self.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use wpcf_storage::{FormDate, Step};

    use super::*;

    #[test]
    fn test_summary_line() {
        let now = Utc.with_ymd_and_hms(2025, 9, 30, 21, 44, 0).unwrap();
        let mut form = FormDefinition::blank("abc", "Contact", now);
        assert_eq!(summary_line(&form), "abc\tContact\t1 step\t2025-09-30 21:44");

        form.steps.push(Step::new(2, ""));
        assert!(summary_line(&form).contains("\t2 steps\t"));

        form.modified = FormDate::Text("2025/09/30 9:44 pm".to_owned());
        assert!(summary_line(&form).ends_with("\t2025/09/30 9:44 pm"));
    }
}
