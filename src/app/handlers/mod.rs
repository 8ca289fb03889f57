pub mod rest_handler;

use crate::domain::ports::{HandlerMap, PriorityMap, SectionHandler};
use self::rest_handler::RestSectionHandler;

/// The conventional section names with their REST endpoints, in default
/// execution order. Order matters: fields and lists must exist before the
/// navigation and custom actions that reference them.
const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("Features", "_api/web/features"),
    ("WebSettings", "_api/web/websettings"),
    ("ComposedLook", "_api/web/composedlook"),
    ("Lists", "_api/web/lists"),
    ("Files", "_api/web/files"),
    ("Navigation", "_api/web/navigation"),
    ("CustomActions", "_api/web/usercustomactions"),
    ("PropertyBagEntries", "_api/web/allproperties"),
];

/// Default registry: one thin REST-backed handler per conventional section
/// name. The keys must match the property names used in templates.
pub fn default_handler_map() -> HandlerMap {
    DEFAULT_SECTIONS
        .iter()
        .map(|(name, path)| {
            (
                name.to_string(),
                Box::new(RestSectionHandler::new(name, path)) as Box<dyn SectionHandler>,
            )
        })
        .collect()
}

/// Default sort table matching `default_handler_map`. Unlisted names fall
/// back to `crate::core::ordering::DEFAULT_PRIORITY` and run last.
pub fn default_handler_sort() -> PriorityMap {
    DEFAULT_SECTIONS
        .iter()
        .enumerate()
        .map(|(index, (name, _))| (name.to_string(), index as i32 + 1))
        .collect()
}
