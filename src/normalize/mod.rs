//! Structure recovery for legacy index pages.
//!
//! The pages this targets have no reliable structural markup: headings are
//! loose text or arbitrary tags, groups of topics are separated by doubled
//! `<br>`s, and attribution boilerplate is mixed into the content. The
//! normalizer walks the tree depth-first and classifies every child into a
//! [`Block`], collecting a registry of section headers on the way.
//!
//! # Classification order
//!
//! For each child of a container, the first matching rule wins:
//!
//! 1. comments and script-like elements are dropped;
//! 2. `<a>` to a content page becomes a [`Block::TopicLink`];
//! 3. `<br>` becomes a spacer depending on the previous sibling;
//! 4. `<hr>` becomes a [`Block::Divider`] unless a header was just emitted;
//! 5. a container holding a link (or no text) is recursed into, otherwise
//!    its text is judged as a heading;
//! 6. loose text is a heading when short and [`Block::PlainText`] otherwise.
//!
//! Elements outside the corpus vocabulary are read as loose text.
//!
//! # Preconditions
//!
//! A container that holds any `<a>` is never read as a heading. The source
//! pages never put a heading and a link in the same container; pages that
//! do will have the heading text lost to recursion.
//!
//! # Example
//!
//! ```
//! use shiori::{Block, Normalizer, PageContext, Rules};
//! use shiori::dom::parse_html;
//!
//! let dom = parse_html(
//!     "<body><font>Volume 2: Johrei</font><a href=\"204.html\">・Guia</a><br><br></body>",
//! );
//! let rules = Rules::default();
//! let page = Normalizer::new(&rules).normalize_page(&dom, &PageContext::new("shumeic2", "../"));
//!
//! assert_eq!(page.headers[0].dropdown_title, "Johrei");
//! assert!(matches!(&page.blocks[1], Block::TopicLink { sequence_number: 1, title, .. } if title == "Guia"));
//! assert_eq!(page.blocks[2], Block::GroupSpacer);
//! ```

mod heading;
mod state;

pub use heading::{HeadingVerdict, judge_heading, strip_volume_prefix};
pub use state::TraversalState;

use serde::Serialize;
use tracing::{debug, trace};

use crate::clean::clean_text;
use crate::dom::{Children, NodeId, NodeKind, PageDom, node_kind};
use crate::link::{Href, reader_target};
use crate::rules::Rules;

/// One recovered unit of page structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A linked topic; `sequence_number` counts from 1 across the document.
    TopicLink {
        sequence_number: u32,
        title: String,
        target_reference: String,
    },
    SectionHeader {
        id: String,
        title: String,
        dropdown_title: String,
        /// Tag the heading came from; `div` for loose text.
        element: String,
    },
    /// Deliberate gap between topic groups.
    GroupSpacer,
    /// Small gap from a lone break after content.
    MinorBreak,
    Divider,
    PlainText { text: String },
}

/// Jump-navigation entry for one section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    pub id: String,
    pub dropdown_title: String,
}

/// Everything recovered from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedPage {
    pub blocks: Vec<Block>,
    /// One entry per [`Block::SectionHeader`], in the same order.
    pub headers: Vec<HeaderEntry>,
}

impl NormalizedPage {
    pub fn topic_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::TopicLink { .. }))
            .count()
    }
}

/// Per-page inputs that end up in topic link targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Volume id passed to the reader (`vol=`).
    pub volume: String,
    /// Relative path from the page back to the site root.
    pub level_up: String,
}

impl PageContext {
    pub fn new(volume: impl Into<String>, level_up: impl Into<String>) -> Self {
        Self {
            volume: volume.into(),
            level_up: level_up.into(),
        }
    }
}

/// Document-scoped output, threaded through every recursive call.
struct DocumentState {
    page: NormalizedPage,
    topics: u32,
}

impl DocumentState {
    fn emit(&mut self, block: Block) {
        self.page.blocks.push(block);
    }

    fn last_is_header(&self) -> bool {
        matches!(self.page.blocks.last(), Some(Block::SectionHeader { .. }))
    }

    fn register_header(&mut self, title: String, dropdown_title: String, element: &str) {
        let id = format!("section-{}", self.page.headers.len());
        self.page.headers.push(HeaderEntry {
            id: id.clone(),
            dropdown_title: dropdown_title.clone(),
        });
        self.emit(Block::SectionHeader {
            id,
            title,
            dropdown_title,
            element: element.to_string(),
        });
    }
}

/// Element for headings read from loose text.
const LOOSE_HEADING_ELEMENT: &str = "div";

/// One container level of the walk.
struct Frame<'d> {
    children: Children<'d>,
    state: TraversalState,
    /// Block count when the level was entered.
    emitted_before: usize,
}

impl<'d> Frame<'d> {
    fn enter(dom: &'d PageDom, container: NodeId, doc: &DocumentState) -> Self {
        Self {
            children: dom.children(container),
            state: TraversalState::Start,
            emitted_before: doc.page.blocks.len(),
        }
    }
}

/// Walks page trees and recovers their structure.
///
/// Holds only the rules; each call to [`Normalizer::normalize`] starts from
/// fresh state, so one normalizer can serve many pages, on many threads.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'r> {
    rules: &'r Rules,
}

impl<'r> Normalizer<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r Rules {
        self.rules
    }

    /// Normalize the `<body>` of a page.
    pub fn normalize_page(&self, dom: &PageDom, ctx: &PageContext) -> NormalizedPage {
        self.normalize(dom, dom.body(), ctx)
    }

    /// Normalize the children of `root`.
    pub fn normalize(&self, dom: &PageDom, root: NodeId, ctx: &PageContext) -> NormalizedPage {
        let mut doc = DocumentState {
            page: NormalizedPage::default(),
            topics: 0,
        };
        self.walk(dom, root, ctx, &mut doc);
        doc.page
    }

    /// Depth-first walk over the children of `root`.
    ///
    /// Levels live on an explicit stack; every unclosed `<font>` in a page
    /// adds one.
    fn walk(&self, dom: &PageDom, root: NodeId, ctx: &PageContext, doc: &mut DocumentState) {
        // Sibling state is per level: group gaps never span container boundaries.
        let mut stack = vec![Frame::enter(dom, root, doc)];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.children.next() else {
                let emitted_before = frame.emitted_before;
                stack.pop();
                // A container that emitted counts as content for its siblings.
                if doc.page.blocks.len() > emitted_before
                    && let Some(parent) = stack.last_mut()
                {
                    parent.state = TraversalState::AfterOther;
                }
                continue;
            };
            let state = frame.state;

            let next = match node_kind(dom, child, self.rules) {
                NodeKind::Ignored => state,
                NodeKind::Anchor => self.visit_anchor(dom, child, ctx, doc).unwrap_or(state),
                NodeKind::Break => {
                    if let Some(block) = state.break_block() {
                        doc.emit(block);
                    }
                    state.after_break()
                }
                NodeKind::Rule => {
                    if doc.last_is_header() {
                        trace!("rule right after a header, suppressed");
                    } else {
                        doc.emit(Block::Divider);
                    }
                    TraversalState::AfterOther
                }
                NodeKind::Container => match self.container_heading(dom, child) {
                    Some(text) => {
                        let element = dom.tag_name(child).unwrap_or(LOOSE_HEADING_ELEMENT);
                        self.visit_heading(&text, element, doc).unwrap_or(state)
                    }
                    None => {
                        stack.push(Frame::enter(dom, child, doc));
                        continue;
                    }
                },
                NodeKind::Text => {
                    let raw = dom.text(child).unwrap_or_default();
                    self.visit_text(raw, doc).unwrap_or(state)
                }
                NodeKind::Opaque => {
                    let raw = dom.flattened_text(child, self.rules);
                    self.visit_text(&raw, doc).unwrap_or(state)
                }
            };

            if let Some(frame) = stack.last_mut() {
                frame.state = next;
            }
        }
    }

    /// Returns the new sibling state, or `None` when the anchor was dropped.
    fn visit_anchor(
        &self,
        dom: &PageDom,
        anchor: NodeId,
        ctx: &PageContext,
        doc: &mut DocumentState,
    ) -> Option<TraversalState> {
        let href = Href::parse(dom.attr(anchor, "href"), self.rules);
        let Some(file) = href.content_file() else {
            debug!(?href, "skipping non-topic link");
            return None;
        };

        let mut visible = dom.flattened_text(anchor, self.rules);
        if !self.rules.title_bullet.is_empty() {
            visible = visible.replace(self.rules.title_bullet.as_str(), "");
        }

        doc.topics += 1;
        doc.emit(Block::TopicLink {
            sequence_number: doc.topics,
            title: clean_text(Some(&visible), self.rules),
            target_reference: reader_target(
                &ctx.level_up,
                &self.rules.reader_endpoint,
                &ctx.volume,
                file,
            ),
        });
        Some(TraversalState::AfterTopic)
    }

    /// Cleaned text of a container that reads as a heading, or `None` when
    /// the container must be walked into (it holds a link, or no text).
    fn container_heading(&self, dom: &PageDom, container: NodeId) -> Option<String> {
        let text = clean_text(Some(&dom.flattened_text(container, self.rules)), self.rules);
        (!text.is_empty() && !dom.has_descendant_tag(container, "a")).then_some(text)
    }

    /// Loose text: too short to matter, a heading candidate, or prose.
    fn visit_text(&self, raw: &str, doc: &mut DocumentState) -> Option<TraversalState> {
        let text = clean_text(Some(raw), self.rules);
        let len = text.chars().count();
        if len <= 1 {
            return None;
        }

        // Credits are dropped at any length, prose included.
        if self.rules.is_boilerplate(&text) {
            debug!(%text, "dropping boilerplate");
            return None;
        }

        if len < self.rules.heading_max_chars {
            self.visit_heading(&text, LOOSE_HEADING_ELEMENT, doc)
        } else {
            doc.emit(Block::PlainText { text });
            Some(TraversalState::AfterOther)
        }
    }

    fn visit_heading(
        &self,
        text: &str,
        element: &str,
        doc: &mut DocumentState,
    ) -> Option<TraversalState> {
        match judge_heading(text, self.rules) {
            HeadingVerdict::Boilerplate => {
                debug!(text, "dropping boilerplate");
                None
            }
            HeadingVerdict::Placeholder => {
                debug!(text, "dropping placeholder heading");
                None
            }
            HeadingVerdict::ThematicList => {
                debug!(text, "dropping thematic summary");
                Some(TraversalState::AfterOther)
            }
            HeadingVerdict::Heading {
                title,
                dropdown_title,
            } => {
                doc.register_header(title, dropdown_title, element);
                Some(TraversalState::AfterOther)
            }
        }
    }
}
