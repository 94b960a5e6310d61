//! `wpcf embed` and `wpcf snippet` command implementations.

use clap::Args;
use wpcf_builder::{db_insert_snippet, form_field_names, iframe_embed, require_editor};
use wpcf_storage::FormStore;

use super::{Context, GlobalArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the embed command.
#[derive(Args)]
pub(crate) struct EmbedArgs {
    /// Form id.
    id: String,
}

impl EmbedArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;
        require_editor(&ctx.identity, "export embed codes")?;

        let form = ctx.store.get(&self.id)?;
        output.emit(&iframe_embed(ctx.base_url(), &form));
        Ok(())
    }
}

/// Arguments for the snippet command.
#[derive(Args)]
pub(crate) struct SnippetArgs {
    /// Form id.
    id: String,
}

impl SnippetArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = Context::load(global)?;
        require_editor(&ctx.identity, "export snippets")?;

        let form = ctx.store.get(&self.id)?;
        let fields = form_field_names(&form);
        if fields.is_empty() {
            output.info("Form has no posted fields");
        } else {
            output.detail(&format!("Fields: {}", fields.join(", ")));
        }
        output.emit(&db_insert_snippet(&form));
        Ok(())
    }
}
