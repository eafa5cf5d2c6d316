//! Corpus rules: the closed lists and thresholds the normalizer relies on.
//!
//! None of these values are derived; they describe one corpus of legacy
//! index pages. They load from TOML so the lists can grow without code
//! changes, and `data/rules.toml` mirrors [`Rules::default`] for audit.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One broken-word repair: `broken` is replaced verbatim by `fixed`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repair {
    pub broken: String,
    pub fixed: String,
}

impl Repair {
    fn new(broken: &str, fixed: &str) -> Self {
        Self {
            broken: broken.to_string(),
            fixed: fixed.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Words split by an inserted full-width space in the source pages.
    pub repairs: Vec<Repair>,

    /// Decorative bullet stripped from topic titles before cleaning.
    pub title_bullet: String,

    /// Attribution / credits substrings; text containing any is dropped.
    pub boilerplate: Vec<String>,

    /// Label phrases removed from heading text ("Correspondence Course").
    pub label_phrases: Vec<String>,

    /// Heading values meaning "no category"; dropped.
    pub placeholders: Vec<String>,

    /// Separators that mark a thematic summary list.
    pub thematic_separators: Vec<String>,

    /// A separator-bearing text longer than this many characters is a
    /// thematic summary list.
    pub thematic_min_chars: usize,

    /// Loose text shorter than this many characters is a heading; anything
    /// longer is prose.
    pub heading_max_chars: usize,

    /// Hrefs containing this substring are site navigation, not topics.
    pub self_nav_marker: String,

    /// Reader page that topic links point at.
    pub reader_endpoint: String,

    /// Elements that group content (recursed into or read as headings).
    pub container_tags: Vec<String>,

    /// Elements dropped together with everything inside them, both as
    /// siblings in the walk and inside another element's text.
    pub ignored_tags: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            repairs: vec![
                Repair::new("Verda\u{3000}de", "Verdade"),
                Repair::new("Supersti\u{3000}ção", "Superstição"),
                Repair::new("Budis\u{3000}mo", "Budismo"),
                Repair::new("Fan\u{3000}tasma", "Fantasma"),
                Repair::new("Espí\u{3000}rito", "Espírito"),
            ],
            title_bullet: "・".to_string(),
            boilerplate: strings(&[
                "editada por membros da Shinji Shumeikai",
                "Operado por um indivíduo e sem relação",
                "Coletânea de Ensinamentos de Meishu-sama",
                "por membros da Shinji Shumeikai",
                "Mestre Mokichi Okada",
                "edited by community members",
                "Operated by an individual",
                "Collection of Meishu-sama's Teachings",
                "Master Mokichi Okada",
            ]),
            label_phrases: strings(&["Curso por Correspondência", "Correspondence Course"]),
            placeholders: strings(&["Outros", "Others"]),
            thematic_separators: strings(&["・", " • "]),
            thematic_min_chars: 20,
            heading_max_chars: 50,
            self_nav_marker: "index".to_string(),
            reader_endpoint: "reader.html".to_string(),
            container_tags: strings(&["font", "p", "div", "blockquote"]),
            ignored_tags: strings(&["script", "style", "noscript", "template", "title"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Rules {
    /// Parse rules from TOML; missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    pub fn is_container(&self, tag: &str) -> bool {
        self.container_tags.iter().any(|t| t == tag)
    }

    pub fn is_ignored(&self, tag: &str) -> bool {
        self.ignored_tags.iter().any(|t| t == tag)
    }

    pub fn is_boilerplate(&self, text: &str) -> bool {
        self.boilerplate.iter().any(|b| text.contains(b.as_str()))
    }

    pub fn is_placeholder(&self, text: &str) -> bool {
        self.placeholders.iter().any(|p| p == text)
    }

    /// Remove every label phrase and trim what is left.
    pub fn strip_labels(&self, text: &str) -> String {
        let mut out = text.to_string();
        for label in &self.label_phrases {
            if !label.is_empty() {
                out = out.replace(label.as_str(), "");
            }
        }
        out.trim().to_string()
    }

    /// Whether text is a volume's one-line digest of themes.
    pub fn is_thematic_list(&self, text: &str) -> bool {
        self.thematic_separators
            .iter()
            .any(|sep| text.contains(sep.as_str()))
            && text.chars().count() > self.thematic_min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_rules_match_defaults() {
        let bundled = include_str!("../data/rules.toml");
        let rules = Rules::from_toml_str(bundled).expect("bundled rules should parse");
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let rules = Rules::from_toml_str("heading_max_chars = 80\nplaceholders = [\"Diversos\"]")
            .expect("should parse");
        assert_eq!(rules.heading_max_chars, 80);
        assert_eq!(rules.placeholders, vec!["Diversos".to_string()]);
        assert_eq!(rules.thematic_min_chars, 20);
        assert!(rules.is_container("blockquote"));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Rules::from_toml_str("heading_max_chars = \"many\"").is_err());
    }

    #[test]
    fn test_strip_labels() {
        let rules = Rules::default();
        assert_eq!(
            rules.strip_labels("Curso por Correspondência Seção da Fé"),
            "Seção da Fé"
        );
        assert_eq!(rules.strip_labels("Correspondence Course Others"), "Others");
    }

    #[test]
    fn test_thematic_list_needs_separator_and_length() {
        let rules = Rules::default();
        assert!(rules.is_thematic_list(
            "Spiritual World・Spirit Precedes Matter・Night-to-Day Transition・Ancestor Worship"
        ));
        assert!(rules.is_thematic_list("Johrei • Divine Health Method • Natural Agriculture"));
        // Short enough to be a heading even with a separator.
        assert!(!rules.is_thematic_list("Johrei・Health"));
        assert!(!rules.is_thematic_list("Volume 2: Johrei and Natural Agriculture"));
    }

    #[test]
    fn test_thematic_length_counts_characters() {
        let rules = Rules::default();
        let text = "霊界・霊主体従・夜昼転換・祖霊祭祀の大切さを説く";
        assert_eq!(text.chars().count(), 24);
        assert!(rules.is_thematic_list(text));
        // 17 characters: a heading, not a digest.
        assert!(!rules.is_thematic_list("霊界・霊主体従・夜昼転換・祖霊祭祀"));
    }
}
