//! Configuration management for the shortcode builder.
//!
//! Parses `wpcf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `storage.dir`
//! - `preview.base_url`
//! - `access.editor` (when given as a string)

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use wpcf_shortcode::MarkupPolicy;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override form records directory.
    pub forms_dir: Option<PathBuf>,
    /// Override preview base URL.
    pub base_url: Option<String>,
    /// Override the editor authorization flag.
    pub editor: Option<bool>,
    /// Override markup policy.
    pub markup: Option<MarkupPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wpcf.toml";

/// Default preview page address.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration (paths are relative strings from TOML).
    storage: StorageConfigRaw,
    /// Preview configuration.
    pub preview: PreviewConfig,
    /// Access configuration (flag may be a string needing expansion).
    access: AccessConfigRaw,

    /// Resolved storage configuration (set after loading).
    #[serde(skip)]
    pub storage_resolved: StorageConfig,
    /// Resolved access configuration (set after loading).
    #[serde(skip)]
    pub access_resolved: AccessConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    dir: Option<String>,
}

/// Resolved storage configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StorageConfig {
    /// Directory holding one JSON record per form.
    pub forms_dir: PathBuf,
}

/// Preview configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Page address that hosts the preview; links are `<base_url>#preview/<id>`.
    pub base_url: String,
    /// How author-supplied text is inserted into preview markup.
    pub markup: MarkupPolicy,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            markup: MarkupPolicy::default(),
        }
    }
}

/// Editor flag as written in TOML: a boolean or a string such as
/// `"${WPCF_EDITOR:-false}"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AccessConfigRaw {
    editor: Option<FlagValue>,
}

/// Resolved access configuration.
#[derive(Debug, Default)]
pub struct AccessConfig {
    /// Whether the caller is an authorized editor.
    pub editor: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`preview.base_url`").
        field: String,
        /// Error message (e.g., "${`WPCF_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Interpret a textual boolean flag.
fn parse_flag(value: &str, field: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Validation(format!(
            "{field} must be true or false, got \"{other}\""
        ))),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wpcf.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(forms_dir) = &settings.forms_dir {
            self.storage_resolved.forms_dir.clone_from(forms_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.preview.base_url.clone_from(base_url);
        }
        if let Some(editor) = settings.editor {
            self.access_resolved.editor = editor;
        }
        if let Some(markup) = settings.markup {
            self.preview.markup = markup;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            storage: StorageConfigRaw::default(),
            preview: PreviewConfig::default(),
            access: AccessConfigRaw::default(),
            storage_resolved: StorageConfig {
                forms_dir: base.join("forms"),
            },
            access_resolved: AccessConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_preview()?;
        self.validate_storage()?;
        Ok(())
    }

    fn validate_preview(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.preview.base_url, "preview.base_url")?;
        require_http_url(&self.preview.base_url, "preview.base_url")?;
        Ok(())
    }

    fn validate_storage(&self) -> Result<(), ConfigError> {
        if self.storage_resolved.forms_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.storage.dir {
            self.storage.dir = Some(expand::expand_env(dir, "storage.dir")?);
        }

        self.preview.base_url = expand::expand_env(&self.preview.base_url, "preview.base_url")?;

        if let Some(FlagValue::Text(ref mut editor)) = self.access.editor {
            *editor = expand::expand_env(editor, "access.editor")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and interpret flags.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.storage_resolved = StorageConfig {
            forms_dir: config_dir.join(self.storage.dir.as_deref().unwrap_or("forms")),
        };

        let editor = match &self.access.editor {
            None => false,
            Some(FlagValue::Bool(flag)) => *flag,
            Some(FlagValue::Text(text)) => parse_flag(text, "access.editor")?,
        };
        self.access_resolved = AccessConfig { editor };

        Ok(())
    }
}
