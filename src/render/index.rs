//! Index page: title, optional preamble, a toctree of every module, and the
//! standard "Indices and tables" trailer.

use super::{finish, push_title, DATE_PLACEHOLDER};
use crate::model::IndexEntry;

/// Document name of the index page inside the workspace.
pub const INDEX_NAME: &str = "index";

/// Spacing between synthetic order values, leaving room for manual insertions.
pub const ORDER_STEP: i64 = 10;

const TRAILER: &[&str] = &[
    "Indices and tables",
    "==================",
    "",
    "* :ref:`genindex`",
    "* :ref:`modindex`",
    "* :ref:`search`",
];

/// Give every undeclared entry an order above all others, in encounter order.
///
/// The base is the largest declared order (or 0); each undeclared entry takes
/// the next multiple of [`ORDER_STEP`] above whatever was assigned last,
/// capped at `i64::MAX`.
pub fn resolve_orders(entries: &[IndexEntry]) -> Vec<(String, i64)> {
    let mut last = entries
        .iter()
        .filter_map(|e| e.order)
        .max()
        .unwrap_or(0)
        .max(0);
    entries
        .iter()
        .map(|entry| {
            let order = entry.order.unwrap_or_else(|| {
                last = last.saturating_add(ORDER_STEP);
                last
            });
            (entry.name.clone(), order)
        })
        .collect()
}

/// Module names in index order: ascending order value, ties in encounter order.
///
/// A declared entry sorts before an undeclared one with the same value, which
/// only happens once synthetic orders are capped.
pub fn sorted_names(entries: &[IndexEntry]) -> Vec<String> {
    let mut resolved: Vec<(String, i64, bool)> = resolve_orders(entries)
        .into_iter()
        .zip(entries)
        .map(|((name, order), entry)| (name, order, entry.order.is_none()))
        .collect();
    // stable: equal keys keep discovery order
    resolved.sort_by_key(|(_, order, synthetic)| (*order, *synthetic));
    resolved.into_iter().map(|(name, _, _)| name).collect()
}

/// Render the index document.
pub fn render(title: &str, preamble: Option<&str>, entries: &[IndexEntry]) -> String {
    let mut lines = Vec::new();
    push_title(&mut lines, title, '=');
    lines.push(String::new());
    lines.push(format!(":Date: {}", DATE_PLACEHOLDER));
    lines.push(String::new());

    if let Some(text) = preamble {
        lines.push(text.trim_end().to_string());
        lines.push(String::new());
    }

    lines.push(".. toctree::".to_string());
    lines.push("   :maxdepth: 2".to_string());
    lines.push(String::new());
    for name in sorted_names(entries) {
        lines.push(format!("   {}", name));
    }
    lines.push(String::new());

    lines.extend(TRAILER.iter().map(|l| l.to_string()));
    finish(lines)
}
