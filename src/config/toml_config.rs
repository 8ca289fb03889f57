use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Settings file for TOML-driven runs. CLI flags win where both supply the
/// same setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub site: SiteConfig,
    pub template: Option<TemplateConfig>,
    pub ordering: Option<OrderingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: String,
}

/// Overrides merged on top of the default sort table; listed names replace
/// their default priority, unlisted names keep it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    pub priorities: HashMap<String, i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ProvisionError::ConfigError {
                message: format!("Cannot read config file {}: {}", path.display(), e),
            })?;
        let config: TomlConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("site.url", &self.site.url)?;

        if let Some(template) = &self.template {
            validate_non_empty_string("template.path", &template.path)?;
        }

        if let Some(monitoring) = &self.monitoring {
            if let Some(format) = &monitoring.log_format {
                match format.as_str() {
                    "compact" | "json" => {}
                    other => {
                        return Err(ProvisionError::InvalidConfigValueError {
                            field: "monitoring.log_format".to_string(),
                            value: other.to_string(),
                            reason: "Supported formats: compact, json".to_string(),
                        })
                    }
                }
            }
        }

        Ok(())
    }
}
