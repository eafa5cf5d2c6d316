//! Block markup for the modern index layout.
//!
//! Emits the card / heading / spacer fragment that the page template drops
//! into its topic list, and the `<option>` list for the jump-navigation
//! selector. Class names match the site stylesheet.
//!
//! # Example
//!
//! ```
//! use shiori::Block;
//! use shiori::render::render_blocks;
//!
//! let html = render_blocks(&[Block::GroupSpacer, Block::PlainText { text: "a < b".into() }]);
//! assert_eq!(html, "<div class=\"group-spacer\"></div>\n<div class=\"plain-text\">a &lt; b</div>\n");
//! ```

use std::fmt::Write;

use crate::normalize::{Block, HeaderEntry, NormalizedPage};

/// Fragment shown in place of a page whose source could not be read.
pub const NOT_FOUND_PLACEHOLDER: &str =
    "<div class=\"plain-text not-found\">Conteúdo não encontrado.</div>\n";

/// Rendered page pieces, ready for templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Topic list body.
    pub body: String,
    /// Jump-navigation options; empty when the page has no headers.
    pub jump_nav: String,
}

pub fn render_page(page: &NormalizedPage, nav_label: &str) -> RenderedPage {
    RenderedPage {
        body: render_blocks(&page.blocks),
        jump_nav: render_jump_nav(&page.headers, nav_label),
    }
}

/// Serialize blocks in order, one element per line.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block);
        out.push('\n');
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    // Writing to a String cannot fail.
    let _ = match block {
        Block::TopicLink {
            sequence_number,
            title,
            target_reference,
        } => write!(
            out,
            "<a href=\"{}\" class=\"topic-card\"><div class=\"topic-card__icon\">{}</div><div class=\"topic-card__title\">{}</div></a>",
            escape_html(target_reference),
            sequence_number,
            escape_html(title)
        ),
        Block::SectionHeader {
            id, title, element, ..
        } => {
            let element = header_element(element);
            write!(
                out,
                "<{element} id=\"{}\" class=\"section-header\">{}</{element}>",
                escape_html(id),
                escape_html(title)
            )
        }
        Block::GroupSpacer => write!(out, "<div class=\"group-spacer\"></div>"),
        Block::MinorBreak => write!(out, "<div style=\"height: 12px;\"></div>"),
        Block::Divider => write!(
            out,
            "<hr style=\"border:none; border-top:1px solid var(--border); margin: 32px 0; opacity: 0.5;\">"
        ),
        Block::PlainText { text } => {
            write!(out, "<div class=\"plain-text\">{}</div>", escape_html(text))
        }
    };
}

/// Tag a header renders with: its source element, or `div` when that is not
/// a plain tag name.
fn header_element(element: &str) -> &str {
    if !element.is_empty() && element.bytes().all(|b| b.is_ascii_alphanumeric()) {
        element
    } else {
        "div"
    }
}

/// Options for the jump-navigation `<select>`.
///
/// The first option carries `label` and an empty value. Returns an empty
/// string when there are no headers, so the template can leave the selector
/// out.
pub fn render_jump_nav(headers: &[HeaderEntry], label: &str) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "<option value=\"\">{}</option>", escape_html(label));
    for header in headers {
        let _ = writeln!(
            out,
            "<option value=\"#{}\">{}</option>",
            escape_html(&header.id),
            escape_html(&header.dropdown_title)
        );
    }
    out
}

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
