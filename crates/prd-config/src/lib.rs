//! Configuration management for the PRD generator.
//!
//! Parses `prd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset or empty
//! - `${VAR:-default}` - expands to VAR if set and non-empty, otherwise uses default
//!
//! Expanded fields:
//! - `generator.base_url`
//! - `generator.model`
//! - `output.dir`
//! - `document.label`, `document.byline`, `document.attribution`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override generator server URL.
    pub base_url: Option<String>,
    /// Override generator model name.
    pub model: Option<String>,
    /// Override export directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "prd.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text generator connection.
    pub generator: GeneratorConfig,
    /// Export configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Fixed text printed in exported documents.
    pub document: DocumentConfig,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Text generator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Model name passed with every request.
    pub model: String,
    /// Overall request timeout in seconds, covering the whole stream.
    pub timeout_secs: u64,
}

impl GeneratorConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_owned(),
            model: "llama3.1:8b".to_owned(),
            timeout_secs: 300,
        }
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory exported files are written to.
    pub dir: PathBuf,
}

/// Fixed document text.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Small-caps label above the title.
    pub label: String,
    /// Byline printed with the generation date.
    pub byline: String,
    /// Footer attribution line.
    pub attribution: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            label: "PRODUCT REQUIREMENTS DOCUMENT".to_owned(),
            byline: "PRD Generator · AI Co-Pilot".to_owned(),
            attribution: "PRD Generator · AI Product Co-Pilot".to_owned(),
        }
    }
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
        /// Config field path (e.g., "`generator.base_url`").
        field: String,
        /// Error message (e.g., "${`OLLAMA_HOST`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `prd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, then the
    /// result is validated, so an override can repair an invalid file value.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
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
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.generator.base_url.clone_from(base_url);
        }
        if let Some(model) = &settings.model {
            self.generator.model.clone_from(model);
        }
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its ancestors.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            generator: GeneratorConfig::default(),
            output: OutputConfigRaw::default(),
            document: DocumentConfig::default(),
            output_resolved: OutputConfig {
                dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_generator()
    }

    fn validate_generator(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.generator.base_url, "generator.base_url")?;
        require_http_url(&self.generator.base_url, "generator.base_url")?;
        require_non_empty(&self.generator.model, "generator.model")?;
        if self.generator.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "generator.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.generator.base_url =
            expand::expand_env(&self.generator.base_url, "generator.base_url")?;
        self.generator.model = expand::expand_env(&self.generator.model, "generator.model")?;
        self.output.dir = self
            .output
            .dir
            .as_deref()
            .map(|dir| expand::expand_env(dir, "output.dir"))
            .transpose()?;
        let document = &mut self.document;
        document.label = expand::expand_env(&document.label, "document.label")?;
        document.byline = expand::expand_env(&document.byline, "document.byline")?;
        document.attribution = expand::expand_env(&document.attribution, "document.attribution")?;
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: config_dir.join(self.output.dir.as_deref().unwrap_or(".")),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.generator.base_url, "http://localhost:11434");
        assert_eq!(config.generator.model, "llama3.1:8b");
        assert_eq!(config.generator.timeout(), Duration::from_secs(300));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test"));
        assert_eq!(config.document.label, "PRODUCT REQUIREMENTS DOCUMENT");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.generator.model, "llama3.1:8b");
        assert_eq!(config.generator.timeout_secs, 300);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[generator]
base_url = "http://gpu-box:11434"
model = "qwen2.5:14b"
timeout_secs = 60

[output]
dir = "exports"

[document]
label = "PRODUCT BRIEF"
byline = "Acme Product"
attribution = "Acme Corp"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.generator.base_url, "http://gpu-box:11434");
        assert_eq!(config.generator.model, "qwen2.5:14b");
        assert_eq!(config.generator.timeout_secs, 60);
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/exports"));
        assert_eq!(config.document.label, "PRODUCT BRIEF");
        assert_eq!(config.document.byline, "Acme Product");
        assert_eq!(config.document.attribution, "Acme Corp");
    }

    #[test]
    fn test_partial_document_section_keeps_defaults() {
        let config: Config = toml::from_str("[document]\nbyline = \"Team X\"\n").unwrap();
        assert_eq!(config.document.byline, "Team X");
        assert_eq!(config.document.label, "PRODUCT REQUIREMENTS DOCUMENT");
    }

    #[test]
    fn test_output_dir_defaults_to_config_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/."));
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let err = toml::from_str::<Config>("[generator]\ntimeout_secs = \"soon\"\n").unwrap_err();
        let err = ConfigError::from(err);
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            model: Some("phi3".to_owned()),
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.generator.model, "phi3");
        assert_eq!(config.output_resolved.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.generator.base_url, "http://localhost:11434"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.generator.model, "llama3.1:8b");
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test"));
    }

    #[test]
    fn test_expand_env_vars_generator() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PRD_TEST_OLLAMA_HOST", "http://10.0.0.5:11434");
        }

        let toml = r#"
[generator]
base_url = "${PRD_TEST_OLLAMA_HOST}"
model = "${PRD_TEST_UNSET_MODEL:-llama3.1:8b}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.generator.base_url, "http://10.0.0.5:11434");
        assert_eq!(config.generator.model, "llama3.1:8b");

        unsafe {
            std::env::remove_var("PRD_TEST_OLLAMA_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_output_and_document() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PRD_TEST_EXPORT_DIR", "exports");
            std::env::set_var("PRD_TEST_COMPANY", "");
        }

        let toml = r#"
[output]
dir = "${PRD_TEST_EXPORT_DIR}/prds"

[document]
attribution = "${PRD_TEST_COMPANY:-Acme} Product"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/work"));

        assert_eq!(config.output_resolved.dir, PathBuf::from("/work/exports/prds"));
        assert_eq!(config.document.attribution, "Acme Product");

        let toml = "[document]\nbyline = \"${PRD_TEST_COMPANY}\"\n";
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(&err, ConfigError::EnvVar { field, .. } if field == "document.byline"));

        unsafe {
            std::env::remove_var("PRD_TEST_EXPORT_DIR");
            std::env::remove_var("PRD_TEST_COMPANY");
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[generator]\nmodel = \"gemma2\"\n\n[output]\ndir = \"out\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.generator.model, "gemma2");
        assert_eq!(config.output_resolved.dir, dir.path().join("out"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[generator]\nmodel = \"gemma2\"\n").unwrap();
        let settings = CliSettings {
            model: Some("phi3".to_owned()),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.generator.model, "phi3");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/prd.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("/nonexistent/prd.toml"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[generator]\nbase_url = \"localhost:11434\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("generator.base_url"));
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.generator.base_url = "ftp://ollama".to_owned();
        assert_validation_error(&config, &["base_url", "http"]);
    }

    #[test]
    fn test_validate_model_blank() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.generator.model = "  ".to_owned();
        assert_validation_error(&config, &["generator.model", "empty"]);
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.generator.timeout_secs = 0;
        assert_validation_error(&config, &["timeout_secs", "greater than 0"]);
    }
}
