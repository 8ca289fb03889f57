use crate::domain::ports::PriorityMap;

/// Priority used for section names absent from the sort table. Callers that
/// assign explicit priorities of 99 or above must list every name they want
/// ordered relative to the defaults.
pub const DEFAULT_PRIORITY: i32 = 99;

/// Produces the execution order for a template's section names: ascending by
/// priority, lower first, unlisted names last at `DEFAULT_PRIORITY`.
///
/// The backing map enumerates keys in no stable order, so names are sorted
/// lexicographically first; the priority sort is stable, which keeps the
/// relative order of equal-priority names reproducible across runs.
pub fn order_sections(names: &[String], priorities: &PriorityMap) -> Vec<String> {
    let mut ordered: Vec<String> = names.to_vec();
    ordered.sort();
    ordered.sort_by_key(|name| priorities.get(name).copied().unwrap_or(DEFAULT_PRIORITY));
    ordered
}
