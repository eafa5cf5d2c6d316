//! Text cleanup for fragments pulled out of legacy pages.

use crate::rules::Rules;

/// Ideographic (full-width) space.
pub const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Clean a raw text fragment.
///
/// Repairs the corpus's known broken words first, since each of them is
/// split by a full-width space that the next step would turn into an
/// ordinary one. Then every full-width space becomes ASCII, whitespace runs
/// collapse to one space, and the ends are trimmed.
///
/// ```
/// use shiori::{Rules, clean_text};
///
/// let rules = Rules::default();
/// assert_eq!(clean_text(Some("  A\u{3000}Verda\u{3000}de\n\t"), &rules), "A Verdade");
/// assert_eq!(clean_text(None, &rules), "");
/// ```
pub fn clean_text(text: Option<&str>, rules: &Rules) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let mut text = text.to_string();
    for repair in &rules.repairs {
        if text.contains(repair.broken.as_str()) {
            text = text.replace(repair.broken.as_str(), &repair.fixed);
        }
    }

    collapse_whitespace(&text)
}

/// Collapse every whitespace run (full-width spaces included) to one ASCII
/// space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    // split_whitespace treats U+3000 as whitespace, as well as \n and \t.
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
