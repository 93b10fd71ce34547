use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::utils::aux_naming::DEFAULT_IDENTIFIER_MAX_LENGTH;

/// Default formatter command line; the schema path is appended
pub const DEFAULT_FORMATTER_COMMAND: &str = "npx prisma format --schema";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Which view of the data model to generate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// What the database stores: delegate bases linked to concrete tables
    #[default]
    Physical,
    /// Inheritance-aware view with polymorphic relations widened per subtype
    Logical,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Physical => write!(f, "physical"),
            GenerationMode::Logical => write!(f, "logical"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown generation mode '{0}', expected 'physical' or 'logical'")]
pub struct UnknownModeError(String);

impl FromStr for GenerationMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "physical" => Ok(GenerationMode::Physical),
            "logical" => Ok(GenerationMode::Logical),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// Compiler configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Output schema file; required when generating
    pub output: Option<PathBuf>,

    pub mode: GenerationMode,

    /// Run the external formatter on the written file
    pub format: bool,

    /// Forced `output` of `prisma-client-js` generator blocks
    pub override_client_output: Option<String>,

    #[validate(length(min = 1, message = "Formatter command cannot be empty"))]
    pub formatter_command: String,

    /// Kill the formatter after this many seconds (1-3600)
    #[validate(range(
        min = 1,
        max = 3600,
        message = "Formatter timeout must be between 1 and 3600 seconds"
    ))]
    pub formatter_timeout_secs: Option<u64>,

    /// Maximum identifier length, auxiliary prefix included (20-255)
    #[validate(range(
        min = 20,
        max = 255,
        message = "Identifier max length must be between 20 and 255"
    ))]
    pub identifier_max_length: usize,

    /// Where the installed target tool is looked up
    pub project_root: PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            output: None,
            mode: GenerationMode::Physical,
            format: true,
            override_client_output: None,
            formatter_command: DEFAULT_FORMATTER_COMMAND.to_string(),
            formatter_timeout_secs: None,
            identifier_max_length: DEFAULT_IDENTIFIER_MAX_LENGTH,
            project_root: PathBuf::from("."),
        }
    }
}

impl CompilerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::env_values()?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation.
    ///
    /// Settings not given on the command line keep their defaults.
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self::default().with_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// `POLYSCHEMA_*` variables overridden by whatever the command line sets
    pub fn from_env_and_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self::env_values()?.with_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    fn env_values() -> Result<Self, ConfigError> {
        Ok(Self {
            output: env::var("POLYSCHEMA_OUTPUT").ok().map(PathBuf::from),
            mode: parse_env_var("POLYSCHEMA_MODE", "physical")?,
            format: parse_env_var("POLYSCHEMA_FORMAT", "true")?,
            override_client_output: env::var("POLYSCHEMA_CLIENT_OUTPUT").ok(),
            formatter_command: env::var("POLYSCHEMA_FORMATTER")
                .unwrap_or_else(|_| DEFAULT_FORMATTER_COMMAND.to_string()),
            formatter_timeout_secs: parse_optional_env_var("POLYSCHEMA_FORMATTER_TIMEOUT")?,
            identifier_max_length: parse_env_var(
                "POLYSCHEMA_IDENTIFIER_MAX_LENGTH",
                &DEFAULT_IDENTIFIER_MAX_LENGTH.to_string(),
            )?,
            project_root: env::var("POLYSCHEMA_PROJECT_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }

    fn with_overrides(mut self, cli: CliConfig) -> Self {
        if cli.output.is_some() {
            self.output = cli.output;
        }
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.override_client_output.is_some() {
            self.override_client_output = cli.override_client_output;
        }
        if let Some(command) = cli.formatter_command {
            self.formatter_command = command;
        }
        if cli.formatter_timeout_secs.is_some() {
            self.formatter_timeout_secs = cli.formatter_timeout_secs;
        }
        if let Some(length) = cli.identifier_max_length {
            self.identifier_max_length = length;
        }
        if let Some(root) = cli.project_root {
            self.project_root = root;
        }
        self
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn formatter_timeout(&self) -> Option<Duration> {
        self.formatter_timeout_secs.map(Duration::from_secs)
    }
}

/// CLI configuration (parsed from command line arguments).
///
/// `None` means the flag was not given.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub output: Option<PathBuf>,
    pub mode: Option<GenerationMode>,
    pub format: Option<bool>,
    pub override_client_output: Option<String>,
    pub formatter_command: Option<String>,
    pub formatter_timeout_secs: Option<u64>,
    pub identifier_max_length: Option<usize>,
    pub project_root: Option<PathBuf>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}

/// Parse an environment variable that may be absent
fn parse_optional_env_var<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|e| ConfigError::Parse {
            field: key.to_string(),
            value,
            source: Box::new(e),
        }),
        Err(_) => Ok(None),
    }
}
