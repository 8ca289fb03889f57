pub mod ordering;
pub mod provisioner;

pub use crate::domain::model::{Site, Template};
pub use crate::domain::ports::{HandlerMap, PriorityMap, SectionHandler};
pub use crate::utils::error::Result;
