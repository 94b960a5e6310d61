//! CLI command implementations.

mod export;
mod forms;
mod preview;
mod step;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use wpcf_builder::StaticIdentity;
use wpcf_config::{CliSettings, Config, MarkupPolicy};
use wpcf_storage::FsFormStore;

use crate::error::CliError;

pub(crate) use export::{EmbedArgs, SnippetArgs};
pub(crate) use forms::{DeleteArgs, DuplicateArgs, ListArgs, NewArgs};
pub(crate) use preview::{PreviewArgs, RenderArgs};
pub(crate) use step::StepCommand;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover wpcf.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding form records (overrides config).
    #[arg(long, global = true)]
    forms_dir: Option<PathBuf>,

    /// Page hosting the preview, used for share links (overrides config).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Act as an authorized editor (overrides config).
    #[arg(long, global = true, env = "WPCF_EDITOR")]
    editor: Option<bool>,

    /// HTML-escape author text in previews (overrides config).
    #[arg(long, global = true)]
    escape_markup: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            forms_dir: self.forms_dir.clone(),
            base_url: self.base_url.clone(),
            editor: self.editor,
            markup: self.escape_markup.then_some(MarkupPolicy::Escaped),
        }
    }
}

/// Loaded configuration and the collaborators built from it.
pub(crate) struct Context {
    pub config: Config,
    pub store: FsFormStore,
    pub identity: StaticIdentity,
}

impl Context {
    /// Load configuration and build the store and identity.
    pub(crate) fn load(global: &GlobalArgs) -> Result<Self, CliError> {
        let config = Config::load(global.config.as_deref(), Some(&global.cli_settings()))?;
        tracing::debug!(
            forms_dir = %config.storage_resolved.forms_dir.display(),
            editor = config.access_resolved.editor,
            "Loaded configuration"
        );
        Ok(Self {
            store: FsFormStore::new(config.storage_resolved.forms_dir.clone()),
            identity: StaticIdentity::new(config.access_resolved.editor),
            config,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.config.preview.base_url
    }

    pub(crate) fn markup(&self) -> MarkupPolicy {
        self.config.preview.markup
    }
}

/// Read shortcode content from a file, or stdin for `-`.
fn read_input(source: &Path) -> Result<String, CliError> {
    if source == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}
