//! Parsing legacy pages into an arena tree.
//!
//! ```
//! use shiori::dom::parse_html;
//!
//! let dom = parse_html("<body><font><a href=\"204.html\">・Guia</a></font></body>");
//! let a = dom.find_by_tag("a").unwrap();
//! assert_eq!(dom.attr(a, "href"), Some("204.html"));
//! ```

mod arena;
mod role_map;
mod tree_sink;

use std::sync::LazyLock;

pub use arena::{Attribute, Children, Node, NodeData, NodeId, PageDom};
pub use role_map::{NodeKind, node_kind};
pub use tree_sink::{NodeHandle, PageSink};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use regex::Regex;

use crate::util::decode_page;

static GEOGUIDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!-- geoguide start -->.*?<!-- geoguide end -->").unwrap());
static HOST_TRAILER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!-- text below generated by geocities\.jp -->.*$").unwrap());

/// Remove the markup the hosting service injected into every page.
///
/// Guide widgets sit between start/end comments; the trailer runs from its
/// marker comment to the end of the file.
pub fn strip_host_artifacts(html: &str) -> String {
    let html = GEOGUIDE_RE.replace_all(html, "");
    HOST_TRAILER_RE.replace(&html, "").into_owned()
}

/// Parse HTML text into a [`PageDom`].
pub fn parse_html(html: &str) -> PageDom {
    parse_document(PageSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Decode raw page bytes, strip hosting artifacts and parse.
pub fn parse_page(bytes: &[u8]) -> PageDom {
    let html = decode_page(bytes);
    parse_html(&strip_host_artifacts(&html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_geoguide_block() {
        let html = "<body>A<!-- geoguide start --><div>ad</div><!-- geoguide end -->B</body>";
        assert_eq!(strip_host_artifacts(html), "<body>AB</body>");
    }

    #[test]
    fn test_strip_trailer_to_end() {
        let html = "<body>Topics</body>\n<!-- text below generated by geocities.jp -->\n<script>track()</script></html>";
        assert_eq!(strip_host_artifacts(html), "<body>Topics</body>\n");
    }

    #[test]
    fn test_parse_page_decodes_shift_jis() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("<body><p>信仰編</p></body>");
        let dom = parse_page(&bytes);
        let p = dom.find_by_tag("p").expect("should find p");
        assert_eq!(dom.flattened_text(p, &crate::Rules::default()), "信仰編");
    }

    #[test]
    fn test_body_falls_back_to_document() {
        let dom = PageDom::new();
        assert_eq!(dom.body(), dom.document());
    }
}
