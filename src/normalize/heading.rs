//! Deciding what a piece of link-free text is.

use std::sync::LazyLock;

use regex::Regex;

use crate::rules::Rules;

static VOLUME_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Volume\s+\d+[:\-]?\s*").unwrap());

/// Outcome of evaluating cleaned, link-free text as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingVerdict {
    /// Attribution or credits; dropped silently.
    Boilerplate,
    /// "No category" placeholder; dropped.
    ///
    /// Text that was nothing but label phrases lands here too: it is dropped
    /// rather than registered as a header with an empty title.
    Placeholder,
    /// A volume's digest of themes, already shown in the page banner.
    ThematicList,
    Heading {
        title: String,
        dropdown_title: String,
    },
}

/// Evaluate text that may be a section heading.
///
/// Checks run in a fixed order: boilerplate on the raw text, then label
/// stripping, placeholder, thematic digest.
pub fn judge_heading(text: &str, rules: &Rules) -> HeadingVerdict {
    if rules.is_boilerplate(text) {
        return HeadingVerdict::Boilerplate;
    }

    let title = rules.strip_labels(text);
    if title.is_empty() || rules.is_placeholder(&title) {
        return HeadingVerdict::Placeholder;
    }

    if rules.is_thematic_list(&title) {
        return HeadingVerdict::ThematicList;
    }

    let dropdown_title = strip_volume_prefix(&title).to_string();
    HeadingVerdict::Heading {
        title,
        dropdown_title,
    }
}

/// Drop a leading "Volume <n>:" / "Volume <n>-" for compact navigation.
pub fn strip_volume_prefix(title: &str) -> &str {
    match VOLUME_PREFIX_RE.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}
