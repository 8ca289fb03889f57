use crate::app::handlers::{default_handler_map, default_handler_sort};
use crate::core::ordering::order_sections;
use crate::domain::model::{Site, Template};
use crate::domain::ports::{HandlerMap, PriorityMap};
use crate::utils::error::{ProvisionError, Result};
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

/// Applies templates to a site by dispatching each section to its registered
/// handler, strictly one at a time in priority order.
pub struct SiteProvisioner {
    site: Site,
    handlers: HandlerMap,
    priorities: PriorityMap,
    monitor: Option<SystemMonitor>,
}

impl SiteProvisioner {
    /// Provisioner with the default handler map and sort order.
    pub fn new(site: Site) -> Self {
        Self::with_handlers(site, default_handler_map(), default_handler_sort())
    }

    /// Provisioner with a caller-supplied registry and priority table. The
    /// registry's keys must cover every section name a template will carry.
    pub fn with_handlers(site: Site, handlers: HandlerMap, priorities: PriorityMap) -> Self {
        Self {
            site,
            handlers,
            priorities,
            monitor: None,
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        if enabled {
            self.monitor = Some(SystemMonitor::new(enabled));
        }
        self
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Applies the supplied template to the site used to create this
    /// provisioner. Sections run in priority order, each awaited to
    /// completion before the next starts; the first failure stops the run
    /// and is returned tagged with the failing section's name. Nothing
    /// already applied is rolled back.
    pub async fn apply_template(&self, template: &Template) -> Result<()> {
        let start_time = Instant::now();
        tracing::info!("Beginning processing of site [{}]", self.site.url());

        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Provisioning started");
        }

        let names = template.section_names();
        let ordered = order_sections(&names, &self.priorities);
        tracing::debug!("Section order: {:?}", ordered);

        for name in &ordered {
            let handler =
                self.handlers
                    .get(name)
                    .ok_or_else(|| ProvisionError::UnknownSection {
                        section: name.clone(),
                    })?;

            // Names come from the template itself, so the lookup holds.
            let Some(config) = template.section(name) else {
                continue;
            };

            tracing::info!("Provisioning section: {}", name);
            let section_start = Instant::now();

            handler
                .provision(&self.site, config)
                .await
                .map_err(|e| ProvisionError::SectionFailed {
                    section: name.clone(),
                    source: Box::new(e),
                })?;

            tracing::debug!(
                "Section {} done ({:?})",
                name,
                section_start.elapsed()
            );
        }

        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Provisioning completed");
        }

        tracing::info!(
            "Done processing of site [{}] ({} sections, {:?})",
            self.site.url(),
            ordered.len(),
            start_time.elapsed()
        );
        Ok(())
    }
}
