//! Module page: title, field list, automodule binding, then one block per event.

use super::{finish, push_title, DATE_PLACEHOLDER};
use crate::model::{display_title, MarkupEvent, ModuleRecord};

/// Render the full document for one module.
pub fn render(record: &ModuleRecord) -> String {
    let mut lines = header(record);
    for event in &record.events {
        push_event(&mut lines, event);
    }
    finish(lines)
}

fn header(record: &ModuleRecord) -> Vec<String> {
    let mut lines = Vec::new();
    push_title(&mut lines, display_title(&record.name), '=');
    lines.push(String::new());
    lines.push(format!(":Date: {}", DATE_PLACEHOLDER));
    if let Some(ref version) = record.version {
        lines.push(format!(":Version: {}", version));
    }
    lines.push(String::new());
    lines.push(format!(".. automodule:: {}", record.name));
    lines.push(format!(".. currentmodule:: {}", record.name));
    lines
}

fn push_event(lines: &mut Vec<String>, event: &MarkupEvent) {
    match event {
        MarkupEvent::Heading { level, text } => {
            lines.push(String::new());
            push_title(lines, text, level.underline());
            lines.push(String::new());
        }
        MarkupEvent::Function { name } => {
            lines.push(format!(".. autofunction:: {}", name));
        }
        MarkupEvent::Class { name } => {
            lines.push(format!(".. autoclass:: {}", name));
            lines.push("   :members:".to_string());
        }
        MarkupEvent::Data { name } => {
            lines.push(format!(".. autodata:: {}", name));
        }
    }
}
