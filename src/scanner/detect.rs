//! Pure line detectors — each looks at one three-line window and reports at
//! most one [`MarkupEvent`].
//!
//! Only top-level code is recognized: every pattern is anchored at column 0.

use crate::model::{HeadingLevel, MarkupEvent};
use regex::Regex;
use std::sync::LazyLock;

/// The previous, current and next line. Missing neighbours at file edges are empty.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub prev: &'a str,
    pub line: &'a str,
    pub next: &'a str,
}

pub type Detector = fn(&Window) -> Option<MarkupEvent>;

/// Detectors in evaluation order. Every detector runs on every window.
pub const DETECTORS: &[Detector] = &[
    detect_section,
    detect_subsection,
    detect_function,
    detect_class,
    detect_data,
];

// -- Regex patterns -----------------------------------------------------------

// `NAME =` but not `NAME ==`
static RE_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)[ \t]*=(?:[^=]|$)").unwrap());

const DEF_TOKEN: &str = "def ";
const CLASS_TOKEN: &str = "class ";
const DATA_GATE_BEFORE: &str = "#:";
const DATA_GATE_AFTER: &str = "\"\"\"";

// -- Headings -----------------------------------------------------------------

pub fn detect_section(w: &Window) -> Option<MarkupEvent> {
    detect_heading(w, HeadingLevel::Section)
}

pub fn detect_subsection(w: &Window) -> Option<MarkupEvent> {
    detect_heading(w, HeadingLevel::Subsection)
}

/// A heading is a comment line fenced above and below by the level's marker:
///
/// ```text
/// #
/// # Title
/// #
/// ```
fn detect_heading(w: &Window, level: HeadingLevel) -> Option<MarkupEvent> {
    let marker = level.marker();
    if !w.prev.starts_with(marker) || !w.next.starts_with(marker) {
        return None;
    }
    let text = w.line.strip_prefix(marker)?.strip_prefix(' ')?.trim();
    if text.is_empty() {
        return None;
    }
    Some(MarkupEvent::Heading {
        level,
        text: text.to_string(),
    })
}

// -- Definitions --------------------------------------------------------------

/// `def name(...)` at top level. Names starting with `_` are private and skipped.
pub fn detect_function(w: &Window) -> Option<MarkupEvent> {
    let rest = w.line.strip_prefix(DEF_TOKEN)?;
    let name = rest.split('(').next().unwrap_or(rest).trim();
    if name.is_empty() || name.starts_with('_') {
        return None;
    }
    Some(MarkupEvent::Function {
        name: name.to_string(),
    })
}

/// `class Name(...)` or `class Name:` at top level. No privacy filter.
pub fn detect_class(w: &Window) -> Option<MarkupEvent> {
    let rest = w.line.strip_prefix(CLASS_TOKEN)?;
    let name = rest.split(['(', ':']).next().unwrap_or(rest).trim();
    if name.is_empty() {
        return None;
    }
    Some(MarkupEvent::Class {
        name: name.to_string(),
    })
}

// -- Module data --------------------------------------------------------------

/// Module-level assignment, documented only when annotated: a `#:` comment
/// directly above or a `"""` docstring directly below.
pub fn detect_data(w: &Window) -> Option<MarkupEvent> {
    let caps = RE_ASSIGNMENT.captures(w.line)?;
    let gated = w.prev.starts_with(DATA_GATE_BEFORE) || w.next.starts_with(DATA_GATE_AFTER);
    if !gated {
        return None;
    }
    Some(MarkupEvent::Data {
        name: caps[1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win<'a>(prev: &'a str, line: &'a str, next: &'a str) -> Window<'a> {
        Window { prev, line, next }
    }

    fn run_all(w: &Window) -> Vec<MarkupEvent> {
        DETECTORS.iter().filter_map(|d| d(w)).collect()
    }

    #[test]
    fn section_heading() {
        let event = detect_section(&win("#", "# Title", "#"));
        assert_eq!(
            event,
            Some(MarkupEvent::Heading {
                level: HeadingLevel::Section,
                text: "Title".into()
            })
        );
    }

    #[test]
    fn subsection_heading() {
        let w = win("##", "## Sub", "##");
        assert_eq!(
            detect_subsection(&w),
            Some(MarkupEvent::Heading {
                level: HeadingLevel::Subsection,
                text: "Sub".into()
            })
        );
        // `## Sub` is not `# ` followed by text, so level 1 stays quiet
        assert_eq!(detect_section(&w), None);
    }

    #[test]
    fn heading_needs_both_fences() {
        assert_eq!(detect_section(&win("", "# Title", "#")), None);
        assert_eq!(detect_section(&win("#", "# Title", "x = 1")), None);
        assert_eq!(detect_section(&win("#", "#Title", "#")), None);
    }

    #[test]
    fn heading_text_is_trimmed() {
        let event = detect_section(&win("####", "#   Spaced out  ", "####"));
        assert_eq!(
            event,
            Some(MarkupEvent::Heading {
                level: HeadingLevel::Section,
                text: "Spaced out".into()
            })
        );
    }

    #[test]
    fn empty_heading_ignored() {
        assert_eq!(detect_section(&win("#", "# ", "#")), None);
    }

    #[test]
    fn public_function() {
        assert_eq!(
            detect_function(&win("", "def parse(text, strict=False):", "")),
            Some(MarkupEvent::Function {
                name: "parse".into()
            })
        );
    }

    #[test]
    fn private_function_skipped() {
        assert_eq!(detect_function(&win("", "def _helper(x):", "")), None);
        assert_eq!(detect_function(&win("", "def __dunder__(self):", "")), None);
    }

    #[test]
    fn indented_function_skipped() {
        assert_eq!(detect_function(&win("", "    def method(self):", "")), None);
    }

    #[test]
    fn class_with_bases() {
        assert_eq!(
            detect_class(&win("", "class Parser(Base, Mixin):", "")),
            Some(MarkupEvent::Class {
                name: "Parser".into()
            })
        );
    }

    #[test]
    fn class_without_bases() {
        assert_eq!(
            detect_class(&win("", "class Token:", "")),
            Some(MarkupEvent::Class {
                name: "Token".into()
            })
        );
    }

    #[test]
    fn private_class_kept() {
        assert_eq!(
            detect_class(&win("", "class _Cache(object):", "")),
            Some(MarkupEvent::Class {
                name: "_Cache".into()
            })
        );
    }

    #[test]
    fn data_gate_combinations() {
        let line = "TIMEOUT = 30";
        let expected = Some(MarkupEvent::Data {
            name: "TIMEOUT".into(),
        });
        assert_eq!(detect_data(&win("", line, "")), None);
        assert_eq!(detect_data(&win("#: seconds", line, "")), expected);
        assert_eq!(detect_data(&win("", line, "\"\"\"Seconds.\"\"\"")), expected);
        assert_eq!(detect_data(&win("#: seconds", line, "\"\"\"")), expected);
    }

    #[test]
    fn data_ignores_comparison_and_indentation() {
        assert_eq!(detect_data(&win("#:", "x == 1", "")), None);
        assert_eq!(detect_data(&win("#:", "    x = 1", "")), None);
    }

    #[test]
    fn data_without_spaces() {
        assert_eq!(
            detect_data(&win("#:", "_LIMIT=5", "")),
            Some(MarkupEvent::Data {
                name: "_LIMIT".into()
            })
        );
    }

    #[test]
    fn plain_comment_block_is_not_data() {
        assert!(run_all(&win("# a", "# b", "")).is_empty());
    }
}
