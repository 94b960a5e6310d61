//! `wpcf step` command implementations.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Subcommand};
use wpcf_builder::{EditorSession, FormLibrary, PaletteEntry, TAG_PALETTE};

use super::{Context, GlobalArgs, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Step editing subcommands.
#[derive(Subcommand)]
pub(crate) enum StepCommand {
    /// Append an empty step.
    Add(AddArgs),
    /// Remove a step (the last remaining step cannot be removed).
    Remove(RemoveArgs),
    /// Replace a step's content from a file or stdin.
    Set(SetArgs),
    /// Insert a palette tag into a step.
    Insert(InsertArgs),
    /// List the insertable tag templates.
    Palette,
}

impl StepCommand {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        match self {
            Self::Add(args) => args.execute(global),
            Self::Remove(args) => args.execute(global),
            Self::Set(args) => args.execute(global),
            Self::Insert(args) => args.execute(global),
            Self::Palette => {
                let output = Output::new();
                for entry in TAG_PALETTE {
                    output.emit(&format!("{}\t{}", entry.label, entry.snippet.escape_debug()));
                }
                Ok(())
            }
        }
    }
}

/// Open an editor on `id`, apply `edit`, and save.
fn edit_form(
    global: &GlobalArgs,
    id: &str,
    edit: impl FnOnce(&mut EditorSession) -> Result<(), CliError>,
) -> Result<EditorSession, CliError> {
    let ctx = Context::load(global)?;
    let library = FormLibrary::new(&ctx.store, &ctx.identity);

    let mut editor = library.edit(id)?;
    edit(&mut editor)?;
    editor.save(&ctx.store, &ctx.identity, Utc::now())?;
    Ok(editor)
}

/// Arguments for the step add command.
#[derive(Args)]
pub(crate) struct AddArgs {
    /// Form id.
    id: String,

    /// Initial content file, or `-` for stdin.
    #[arg(long)]
    content: Option<PathBuf>,
}

impl AddArgs {
    fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let content = self.content.as_deref().map(read_input).transpose()?;

        let mut added = 0;
        edit_form(global, &self.id, |editor| {
            added = editor.add_step();
            if let Some(content) = content {
                editor.set_content(added, content)?;
            }
            Ok(())
        })?;

        output.success(&format!("Added step {added} to {}", self.id));
        Ok(())
    }
}

/// Arguments for the step remove command.
#[derive(Args)]
pub(crate) struct RemoveArgs {
    /// Form id.
    id: String,

    /// Step id.
    step: u32,
}

impl RemoveArgs {
    fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let editor = edit_form(global, &self.id, |editor| {
            Ok(editor.remove_step(self.step)?)
        })?;

        output.success(&format!(
            "Removed step {} from {} ({} left)",
            self.step,
            self.id,
            editor.steps().len()
        ));
        Ok(())
    }
}

/// Arguments for the step set command.
#[derive(Args)]
pub(crate) struct SetArgs {
    /// Form id.
    id: String,

    /// Step id.
    step: u32,

    /// Content file, or `-` for stdin.
    source: PathBuf,
}

impl SetArgs {
    fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let content = read_input(&self.source)?;

        edit_form(global, &self.id, |editor| {
            Ok(editor.set_content(self.step, content)?)
        })?;

        output.success(&format!("Updated step {} of {}", self.step, self.id));
        Ok(())
    }
}

/// Arguments for the step insert command.
#[derive(Args)]
pub(crate) struct InsertArgs {
    /// Form id.
    id: String,

    /// Step id.
    step: u32,

    /// Tag keyword from the palette (e.g. `email`, `select`, `group`).
    tag: String,

    /// Byte offset to insert at (default: end of content).
    #[arg(long)]
    at: Option<usize>,
}

impl InsertArgs {
    fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let entry = palette_entry(&self.tag).ok_or_else(|| {
            CliError::Validation(format!(
                "Unknown tag \"{}\" (see `wpcf step palette`)",
                self.tag
            ))
        })?;

        edit_form(global, &self.id, |editor| {
            editor.set_active_step(self.step)?;
            let at = self.at.unwrap_or(usize::MAX);
            editor.insert_tag(entry.snippet, at..at)?;
            Ok(())
        })?;

        output.success(&format!(
            "Inserted {} into step {} of {}",
            entry.snippet.lines().next().unwrap_or_default(),
            self.step,
            self.id
        ));
        Ok(())
    }
}

/// Find the palette template whose tag keyword is `keyword`.
fn palette_entry(keyword: &str) -> Option<PaletteEntry> {
    TAG_PALETTE.into_iter().find(|entry| {
        entry
            .snippet
            .strip_prefix('[')
            .and_then(|rest| rest.split([' ', '*', ']']).next())
            == Some(keyword)
    })
}
