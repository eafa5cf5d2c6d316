//! Source decoding helpers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-]+)"#).unwrap()
});

/// Decode page bytes to a string, handling the encodings legacy hosts served.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the charset declared in a `<meta>` tag
/// 3. Falls back to Shift_JIS, the default of the hosting service
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_page(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(label) = sniff_meta_charset(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::SHIFT_JIS.decode(bytes);
    result
}

/// Find the charset label declared in the first kilobytes of a page.
///
/// Both `<meta charset="...">` and the older
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">` forms match.
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(4096)];
    // Markup is ASCII in every encoding we care about, so lossy is fine here.
    let head = String::from_utf8_lossy(head);
    META_CHARSET_RE
        .captures(&head)
        .map(|caps| caps[1].to_ascii_lowercase())
}
