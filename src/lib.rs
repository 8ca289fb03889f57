pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use app::handlers::{default_handler_map, default_handler_sort};
pub use core::ordering::{order_sections, DEFAULT_PRIORITY};
pub use core::provisioner::SiteProvisioner;
pub use domain::model::{Site, Template};
pub use domain::ports::{HandlerMap, PriorityMap, SectionHandler};
pub use utils::error::{ProvisionError, Result};
