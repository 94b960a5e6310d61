//! Form library, editor sessions and multi-step previews.
//!
//! Builds on [`wpcf_shortcode`] for rendering and [`wpcf_storage`] for
//! persistence:
//!
//! - [`FormLibrary`] lists forms and runs create, duplicate and delete
//! - [`EditorSession`] holds a draft and saves it back
//! - [`PreviewSession`] renders one step at a time behind a [`Navigator`]
//! - [`PreviewRoute`] parses and builds `#preview/<id>` addresses
//! - [`iframe_embed`] and [`db_insert_snippet`] produce integration code
//!
//! Mutations are gated on an [`Identity`]; previews are open to everyone.

mod editor;
mod error;
mod export;
mod identity;
mod library;
mod navigator;
mod preview;
mod route;

pub use editor::{EditorSession, EditorTab, PaletteEntry, TAG_PALETTE};
pub use error::BuilderError;
pub use export::{db_insert_snippet, form_field_names, iframe_embed};
pub use identity::{Identity, StaticIdentity, require_editor};
pub use library::FormLibrary;
pub use navigator::Navigator;
pub use preview::{EMPTY_STATE, PreviewSession};
pub use route::{PreviewRoute, share_url};
