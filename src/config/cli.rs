use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "site-provisioner")]
#[command(about = "Applies a provisioning template to a remote collaboration site")]
pub struct CliConfig {
    #[arg(long, help = "Base URL of the target site")]
    pub site_url: Option<String>,

    #[arg(long, help = "Path to the JSON template file")]
    pub template: Option<String>,

    #[arg(long, help = "Path to a TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.site_url {
            validate_url("site_url", url)?;
        }
        if let Some(path) = &self.template {
            validate_path("template", path)?;
        }
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        Ok(())
    }
}
