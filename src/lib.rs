//! # shiori
//!
//! Recovers the implicit structure of legacy, hand-authored HTML index pages
//! so it can be re-rendered into a modern layout.
//!
//! ## Features
//!
//! - Topic links become numbered cards pointing at a reader page
//! - Loose short text becomes section headers, with a jump-navigation registry
//! - Doubled line breaks become group spacers; lone breaks become small gaps
//! - Attribution boilerplate, "no category" placeholders and thematic digests
//!   are filtered out
//! - Legacy encodings (Shift_JIS and friends) are decoded before parsing
//!
//! ## Quick Start
//!
//! ```
//! use shiori::{Normalizer, PageContext, Rules};
//! use shiori::dom::parse_html;
//! use shiori::render::render_page;
//!
//! let dom = parse_html(r#"
//!     <body>
//!       <font size="4">Volume 1: Mundo Espiritual</font><br>
//!       <a href="101.html">・O Mundo Espiritual</a><br>
//!       <a href="102.html">・Espírito Precede a Matéria</a><br><br>
//!     </body>
//! "#);
//!
//! let rules = Rules::default();
//! let page = Normalizer::new(&rules).normalize_page(&dom, &PageContext::new("shumeic1", "../"));
//! assert_eq!(page.topic_count(), 2);
//! assert_eq!(page.headers[0].dropdown_title, "Mundo Espiritual");
//!
//! let html = render_page(&page, "Navegação por Temas");
//! assert!(html.body.contains("../reader.html?vol=shumeic1&amp;file=101.html"));
//! ```

pub mod batch;
pub mod clean;
pub mod dom;
pub mod error;
pub mod link;
pub mod normalize;
pub mod render;
pub mod rules;
pub(crate) mod util;

pub use clean::clean_text;
pub use error::{Error, Result};
pub use normalize::{Block, HeaderEntry, NormalizedPage, Normalizer, PageContext};
pub use rules::Rules;
