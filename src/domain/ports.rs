use crate::domain::model::Site;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// One capability per handler: provision a single section's objects on the
/// target site and complete once the remote calls are done. The section's
/// configuration value is passed through unexamined.
#[async_trait]
pub trait SectionHandler: Send + Sync {
    async fn provision(&self, site: &Site, config: &serde_json::Value) -> Result<()>;
}

/// Open registry keyed by section name. Names present in a template must
/// resolve here at dispatch time; a missing entry fails the run.
pub type HandlerMap = HashMap<String, Box<dyn SectionHandler>>;

/// Section name to sort priority, lower runs first. Names absent from the
/// map take `crate::core::ordering::DEFAULT_PRIORITY`.
pub type PriorityMap = HashMap<String, i32>;
