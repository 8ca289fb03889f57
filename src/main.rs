use clap::Parser;
use site_provisioner::utils::{logger, validation::Validate};
use site_provisioner::{
    default_handler_map, default_handler_sort, CliConfig, Site, SiteProvisioner, Template,
    TomlConfig,
};
use std::collections::HashMap;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Settings file first: its monitoring section decides the log format.
    let settings = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(settings) => Some(settings),
            Err(e) => {
                eprintln!("❌ Failed to load config file: {}", e);
                std::process::exit(2);
            }
        },
        None => None,
    };

    let log_format = settings
        .as_ref()
        .and_then(|s| s.monitoring.as_ref())
        .and_then(|m| m.log_format.as_deref())
        .unwrap_or("compact");
    if log_format == "json" {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting site-provisioner CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    let site_url = cli
        .site_url
        .clone()
        .or_else(|| settings.as_ref().map(|s| s.site.url.clone()));
    let Some(site_url) = site_url else {
        eprintln!("❌ No site URL given (use --site-url or [site].url in the config file)");
        std::process::exit(2);
    };

    let template_path = cli.template.clone().or_else(|| {
        settings
            .as_ref()
            .and_then(|s| s.template.as_ref().map(|t| t.path.clone()))
    });
    let Some(template_path) = template_path else {
        eprintln!("❌ No template given (use --template or [template].path in the config file)");
        std::process::exit(2);
    };

    let headers: HashMap<String, String> = settings
        .as_ref()
        .and_then(|s| s.site.headers.clone())
        .unwrap_or_default();
    let timeout = settings
        .as_ref()
        .and_then(|s| s.site.timeout_seconds)
        .map(Duration::from_secs);

    let monitor_enabled = cli.monitor
        || settings
            .as_ref()
            .and_then(|s| s.monitoring.as_ref())
            .map(|m| m.enabled)
            .unwrap_or(false);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let template = match Template::from_file(&template_path) {
        Ok(template) => template,
        Err(e) => {
            tracing::error!("❌ Failed to load template {}: {}", template_path, e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let site = match Site::with_options(&site_url, headers, timeout) {
        Ok(site) => site,
        Err(e) => {
            tracing::error!("❌ Invalid site URL {}: {}", site_url, e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let mut priorities = default_handler_sort();
    if let Some(ordering) = settings.as_ref().and_then(|s| s.ordering.as_ref()) {
        priorities.extend(ordering.priorities.clone());
    }

    let provisioner = SiteProvisioner::with_handlers(site, default_handler_map(), priorities)
        .with_monitoring(monitor_enabled);

    let run_id = format!("run_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
    tracing::info!(
        "{}: applying {} sections to {}",
        run_id,
        template.len(),
        site_url
    );

    match provisioner.apply_template(&template).await {
        Ok(()) => {
            tracing::info!("✅ Provisioning completed successfully!");
            println!("✅ Provisioning of {} completed", site_url);
        }
        Err(e) => {
            tracing::error!("❌ Provisioning failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(if e.is_config_error() { 2 } else { 1 });
        }
    }

    Ok(())
}
