//! reStructuredText emission for module pages and the index page.

pub mod index;
pub mod module;

/// Extension of every generated document.
pub const DOC_EXTENSION: &str = "rst";

/// Static substitution Sphinx replaces with the build date.
pub const DATE_PLACEHOLDER: &str = "|today|";

/// Push a title and its underline, sized in characters.
fn push_title(lines: &mut Vec<String>, title: &str, underline: char) {
    lines.push(title.to_string());
    lines.push(underline.to_string().repeat(title.chars().count()));
}

/// Join lines into a document with a trailing newline.
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
