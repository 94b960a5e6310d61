//! wpcf CLI - Contact Form 7 shortcode builder.
//!
//! Provides commands for:
//! - `list`, `new`, `duplicate`, `delete`: manage stored forms
//! - `preview`: render a form's preview page, one step at a time
//! - `render`: render raw shortcode content
//! - `embed`, `snippet`: integration code for a form
//! - `step add|remove|set|insert`: edit a form's steps
//! - `step palette`: list the insertable tag templates

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    DeleteArgs, DuplicateArgs, EmbedArgs, GlobalArgs, ListArgs, NewArgs, PreviewArgs, RenderArgs,
    SnippetArgs, StepCommand,
};
use output::Output;

/// wpcf - Contact Form 7 shortcode builder.
#[derive(Parser)]
#[command(name = "wpcf", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored forms.
    List(ListArgs),
    /// Create a new form.
    New(NewArgs),
    /// Copy a form under a new id.
    Duplicate(DuplicateArgs),
    /// Delete a form.
    Delete(DeleteArgs),
    /// Render the preview page of a form.
    Preview(PreviewArgs),
    /// Render shortcode content from a file or stdin.
    Render(RenderArgs),
    /// Print the iframe embed code of a form.
    Embed(EmbedArgs),
    /// Print the PHP database-insert hook of a form.
    Snippet(SnippetArgs),
    /// Edit the steps of a form.
    #[command(subcommand)]
    Step(StepCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::List(args) => args.execute(&cli.global),
        Commands::New(args) => args.execute(&cli.global),
        Commands::Duplicate(args) => args.execute(&cli.global),
        Commands::Delete(args) => args.execute(&cli.global),
        Commands::Preview(args) => args.execute(&cli.global),
        Commands::Render(args) => args.execute(&cli.global),
        Commands::Embed(args) => args.execute(&cli.global),
        Commands::Snippet(args) => args.execute(&cli.global),
        Commands::Step(cmd) => cmd.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
