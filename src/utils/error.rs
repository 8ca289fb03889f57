use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No handler registered for section '{section}'")]
    UnknownSection { section: String },

    #[error("Provisioning of section '{section}' failed: {source}")]
    SectionFailed {
        section: String,
        #[source]
        source: Box<ProvisionError>,
    },
}

impl ProvisionError {
    /// True for errors the user can fix by correcting flags or config files,
    /// used to pick the CLI exit code.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. }
                | Self::MissingConfigError { .. }
                | Self::InvalidConfigValueError { .. }
                | Self::TomlError(_)
                | Self::UrlError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
