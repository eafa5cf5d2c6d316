//! Structural properties that hold for any page shape.

use proptest::prelude::*;

use shiori::dom::parse_html;
use shiori::{Block, NormalizedPage, Normalizer, PageContext, Rules};

/// A piece of generated page markup.
#[derive(Debug, Clone)]
enum Piece {
    Topic(u16),
    NavLink,
    Break,
    Rule,
    Word(&'static str),
    Prose,
    Container(&'static str, Vec<Piece>),
}

const WORDS: &[&str] = &[
    "Johrei",
    "Mundo Espiritual",
    "Volume 3: Arte",
    "Outros",
    "Saúde e Fé",
    "x",
];

const CONTAINERS: &[&str] = &["div", "blockquote", "font"];

fn piece() -> impl Strategy<Value = Piece> {
    let leaf = prop_oneof![
        (1u16..999).prop_map(Piece::Topic),
        Just(Piece::NavLink),
        Just(Piece::Break),
        Just(Piece::Rule),
        prop::sample::select(WORDS).prop_map(Piece::Word),
        Just(Piece::Prose),
    ];
    leaf.prop_recursive(3, 48, 6, |inner| {
        (
            prop::sample::select(CONTAINERS),
            prop::collection::vec(inner, 0..6),
        )
            .prop_map(|(tag, children)| Piece::Container(tag, children))
    })
}

fn write(piece: &Piece, out: &mut String) {
    match piece {
        Piece::Topic(n) => out.push_str(&format!("<a href=\"{n}.html\">・Tema {n}</a>")),
        Piece::NavLink => out.push_str("<a href=\"../index2.html\">Voltar</a>"),
        Piece::Break => out.push_str("<br>"),
        Piece::Rule => out.push_str("<hr>"),
        Piece::Word(w) => out.push_str(w),
        Piece::Prose => out.push_str(
            "Texto corrido que descreve a coleção e passa bem do limite de um título.",
        ),
        Piece::Container(tag, children) => {
            out.push_str(&format!("<{tag}>"));
            for child in children {
                write(child, out);
            }
            out.push_str(&format!("</{tag}>"));
        }
    }
}

fn count_topics(piece: &Piece) -> usize {
    match piece {
        Piece::Topic(_) => 1,
        Piece::Container(_, children) => children.iter().map(count_topics).sum(),
        _ => 0,
    }
}

fn normalize(pieces: &[Piece]) -> NormalizedPage {
    let mut html = String::from("<html><body>");
    for p in pieces {
        write(p, &mut html);
        // Keep adjacent words apart.
        html.push('\n');
    }
    html.push_str("</body></html>");

    let dom = parse_html(&html);
    let rules = Rules::default();
    Normalizer::new(&rules).normalize_page(&dom, &PageContext::new("shumeic2", "../"))
}

proptest! {
    #[test]
    fn topic_numbers_are_contiguous(pieces in prop::collection::vec(piece(), 0..12)) {
        let page = normalize(&pieces);
        let numbers: Vec<u32> = page
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::TopicLink { sequence_number, .. } => Some(*sequence_number),
                _ => None,
            })
            .collect();

        let expected = pieces.iter().map(count_topics).sum::<usize>();
        prop_assert_eq!(numbers.len(), expected);
        for (i, n) in numbers.iter().enumerate() {
            prop_assert_eq!(*n as usize, i + 1);
        }
    }

    #[test]
    fn headers_match_registry(pieces in prop::collection::vec(piece(), 0..12)) {
        let page = normalize(&pieces);
        let headers: Vec<(&str, &str)> = page
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::SectionHeader { id, dropdown_title, .. } => {
                    Some((id.as_str(), dropdown_title.as_str()))
                }
                _ => None,
            })
            .collect();

        prop_assert_eq!(headers.len(), page.headers.len());
        for (i, ((id, dropdown), entry)) in headers.iter().zip(&page.headers).enumerate() {
            let expected_id = format!("section-{i}");
            prop_assert_eq!(*id, expected_id.as_str());
            prop_assert_eq!(*id, entry.id.as_str());
            prop_assert_eq!(*dropdown, entry.dropdown_title.as_str());
        }
    }

    #[test]
    fn no_divider_right_after_header(pieces in prop::collection::vec(piece(), 0..12)) {
        let page = normalize(&pieces);
        for pair in page.blocks.windows(2) {
            let header_then_divider = matches!(
                pair,
                [Block::SectionHeader { .. }, Block::Divider]
            );
            prop_assert!(!header_then_divider);
        }
    }

    #[test]
    fn page_never_opens_with_spacer(pieces in prop::collection::vec(piece(), 0..12)) {
        let page = normalize(&pieces);
        // A spacer needs an earlier break, and every break before it emitted.
        if let Some(first) = page.blocks.first() {
            prop_assert!(!matches!(first, Block::GroupSpacer));
        }
    }

    #[test]
    fn placeholders_and_nav_never_surface(pieces in prop::collection::vec(piece(), 0..12)) {
        let page = normalize(&pieces);
        for block in &page.blocks {
            match block {
                Block::SectionHeader { title, .. } => {
                    prop_assert_ne!(title.as_str(), "Outros");
                }
                Block::TopicLink { title, target_reference, .. } => {
                    prop_assert!(!title.contains('・'));
                    prop_assert!(!target_reference.contains("index"));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn normalization_is_deterministic(pieces in prop::collection::vec(piece(), 0..12)) {
        prop_assert_eq!(normalize(&pieces), normalize(&pieces));
    }
}
