//! Scanner — one forward pass over a source file.

pub mod detect;
pub mod metadata;

use crate::error::ScanError;
use crate::model::{ModuleRecord, SourceFile};
use detect::{Window, DETECTORS};

/// Scan a source file into a [`ModuleRecord`].
///
/// Every line is examined once, in order, with its neighbours as context.
/// Events from all matching detectors are kept in detector order.
pub fn scan(file: &SourceFile) -> Result<ModuleRecord, ScanError> {
    let meta = metadata::extract(&file.path, &file.lines)?;

    let mut events = Vec::new();
    for (idx, line) in file.lines.iter().enumerate() {
        let window = Window {
            prev: idx
                .checked_sub(1)
                .and_then(|i| file.lines.get(i))
                .map_or("", String::as_str),
            line: line.as_str(),
            next: file.lines.get(idx + 1).map_or("", String::as_str),
        };
        events.extend(DETECTORS.iter().filter_map(|detect| detect(&window)));
    }

    Ok(ModuleRecord {
        name: file.module_name(),
        version: meta.version,
        order: meta.order,
        events,
    })
}
