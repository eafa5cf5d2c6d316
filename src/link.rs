//! Classification of anchor targets on legacy index pages.
//!
//! Index pages mix three kinds of links: topic pages (`204.html`,
//! `../shumeic2/301.html`), navigation back to other indexes, and the odd
//! external or in-page link. Only the first kind becomes a topic card.

use percent_encoding::{
    AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode, utf8_percent_encode,
};

use crate::rules::Rules;

/// Characters left as-is inside reader query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// A parsed anchor href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    /// No href attribute, or an empty one.
    Missing,
    /// In-page jump (`#top`).
    Fragment(String),
    /// Absolute URL or non-navigational scheme.
    External(String),
    /// Link to an index page of the site itself.
    SiteNav(String),
    /// Link to a content page; `file` is its trailing path segment.
    Content { file: String },
}

impl Href {
    /// Classify a raw href value.
    pub fn parse(href: Option<&str>, rules: &Rules) -> Href {
        let Some(href) = href.map(str::trim).filter(|h| !h.is_empty()) else {
            return Href::Missing;
        };

        if href.starts_with('#') {
            return Href::Fragment(href.to_string());
        }

        let lower = href.to_ascii_lowercase();
        if lower.starts_with("http")
            || lower.contains("://")
            || lower.starts_with("mailto:")
            || lower.starts_with("javascript:")
        {
            return Href::External(href.to_string());
        }

        if !rules.self_nav_marker.is_empty() && href.contains(rules.self_nav_marker.as_str()) {
            return Href::SiteNav(href.to_string());
        }

        // Query and fragment are not part of the file name.
        let path = href.split(['#', '?']).next().unwrap_or(href);
        let file = path.rsplit('/').next().unwrap_or(path);
        Href::Content {
            file: file.to_string(),
        }
    }

    /// Content file id, for links that become topics.
    pub fn content_file(&self) -> Option<&str> {
        match self {
            Href::Content { file } => Some(file.as_str()),
            _ => None,
        }
    }
}

/// Where a topic card points: `<level_up><endpoint>?vol=<volume>&file=<file>`.
///
/// Both query values are percent-encoded; a file name that already carries
/// escapes is decoded first so it is not encoded twice. Decoding works on
/// bytes, so escapes that are not UTF-8 (`%FF`) come out unchanged.
pub fn reader_target(level_up: &str, endpoint: &str, volume: &str, file: &str) -> String {
    let file: Vec<u8> = percent_decode_str(file).collect();
    format!(
        "{level_up}{endpoint}?vol={}&file={}",
        utf8_percent_encode(volume, QUERY_VALUE),
        percent_encode(&file, QUERY_VALUE),
    )
}
