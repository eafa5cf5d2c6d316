//! Maps page nodes to the kinds the normalizer distinguishes.
//!
//! The legacy corpus uses a small, fixed vocabulary. Anything outside it is
//! [`NodeKind::Opaque`] and read as plain text.

use super::arena::{NodeData, NodeId, PageDom};
use crate::rules::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Comments, doctypes, scripts and other non-content.
    Ignored,
    /// `<a>`
    Anchor,
    /// `<br>`
    Break,
    /// `<hr>`
    Rule,
    /// font/p/div/blockquote, or whatever the rules list.
    Container,
    /// A bare text node.
    Text,
    /// An element outside the vocabulary.
    Opaque,
}

/// Classify a node against the corpus vocabulary.
pub fn node_kind(dom: &PageDom, id: NodeId, rules: &Rules) -> NodeKind {
    let Some(node) = dom.get(id) else {
        return NodeKind::Ignored;
    };

    match &node.data {
        NodeData::Text(_) => NodeKind::Text,
        NodeData::Element { name, .. } => match &*name.local {
            "a" => NodeKind::Anchor,
            "br" => NodeKind::Break,
            "hr" => NodeKind::Rule,
            tag if rules.is_ignored(tag) => NodeKind::Ignored,
            tag if rules.is_container(tag) => NodeKind::Container,
            _ => NodeKind::Opaque,
        },
        NodeData::Document => NodeKind::Container,
        NodeData::Comment(_) | NodeData::Doctype(_) | NodeData::Other => NodeKind::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn body_kinds(html: &str, rules: &Rules) -> Vec<NodeKind> {
        let dom = parse_html(html);
        let body = dom.body();
        dom.children(body)
            .map(|c| node_kind(&dom, c, rules))
            .collect()
    }

    #[test]
    fn test_fixed_vocabulary() {
        let kinds = body_kinds(
            "<a href=x>t</a><br><hr><font>f</font><p>p</p><div>d</div><blockquote>q</blockquote>",
            &Rules::default(),
        );
        assert_eq!(
            kinds,
            vec![
                NodeKind::Anchor,
                NodeKind::Break,
                NodeKind::Rule,
                NodeKind::Container,
                NodeKind::Container,
                NodeKind::Container,
                NodeKind::Container,
            ]
        );
    }

    #[test]
    fn test_scripts_and_comments_ignored() {
        let kinds = body_kinds(
            "<body><!-- c --><script>x()</script>text</body>",
            &Rules::default(),
        );
        assert_eq!(
            kinds,
            vec![NodeKind::Ignored, NodeKind::Ignored, NodeKind::Text]
        );
    }

    #[test]
    fn test_unknown_elements_are_opaque() {
        let kinds = body_kinds("<center>Seção</center><b>Fé</b>", &Rules::default());
        assert_eq!(kinds, vec![NodeKind::Opaque, NodeKind::Opaque]);
    }

    #[test]
    fn test_rules_extend_containers() {
        let mut rules = Rules::default();
        rules.container_tags.push("center".to_string());
        let kinds = body_kinds("<center>Seção</center>", &rules);
        assert_eq!(kinds, vec![NodeKind::Container]);
    }
}
