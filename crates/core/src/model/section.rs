use serde::{Deserialize, Serialize};
use thiserror::Error;
use waypost_protocol::SectionId;

use crate::layout::LayoutMode;

/// Which layouts render a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Always,
    /// Rendered only in the compact (phone/tablet) layout.
    CompactOnly,
}

/// A section declaration as written in a page manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDecl {
    /// Identifier; `href`-style anchors (`"#home"`) are accepted.
    #[serde(alias = "href")]
    pub id: SectionId,
    /// Link label. Defaults to the capitalized identifier.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl SectionDecl {
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            visibility: Visibility::Always,
        }
    }

    pub fn compact_only(mut self) -> Self {
        self.visibility = Visibility::CompactOnly;
        self
    }
}

/// A named, ordered content region of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
    /// Position in the navigation list (0-based declaration order).
    pub order: usize,
    pub visibility: Visibility,
}

impl Section {
    pub fn is_rendered_in(&self, layout: LayoutMode) -> bool {
        match self.visibility {
            Visibility::Always => true,
            Visibility::CompactOnly => layout == LayoutMode::Compact,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionListError {
    #[error("no sections declared")]
    Empty,
    #[error("section {position} has an empty identifier")]
    EmptyId { position: usize },
    #[error("section identifier `{0}` is declared more than once")]
    DuplicateId(SectionId),
}

/// The page's section declarations, fixed for the lifetime of the page.
///
/// Construction validates that the list is non-empty and that identifiers
/// are non-empty and unique; there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    pub fn new(decls: Vec<SectionDecl>) -> Result<Self, SectionListError> {
        if decls.is_empty() {
            return Err(SectionListError::Empty);
        }

        let mut sections: Vec<Section> = Vec::with_capacity(decls.len());
        for (order, decl) in decls.into_iter().enumerate() {
            if decl.id.is_empty() {
                return Err(SectionListError::EmptyId { position: order });
            }
            if sections.iter().any(|s| s.id == decl.id) {
                return Err(SectionListError::DuplicateId(decl.id));
            }
            let label = decl.label.unwrap_or_else(|| capitalize(&decl.id));
            sections.push(Section {
                id: decl.id,
                label,
                order,
                visibility: decl.visibility,
            });
        }

        Ok(Self { sections })
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sections rendered in `layout`, in declaration order.
    pub fn rendered_in(&self, layout: LayoutMode) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|s| s.is_rendered_in(layout))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio() -> Vec<SectionDecl> {
        vec![
            SectionDecl::new("home", "Home"),
            SectionDecl::new("about", "About").compact_only(),
            SectionDecl::new("skills", "Skills"),
            SectionDecl::new("contact", "Contact"),
        ]
    }

    #[test]
    fn assigns_declaration_order() {
        let list = SectionList::new(portfolio()).expect("valid sections");
        let orders: Vec<usize> = list.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
        assert_eq!(list.len(), 4);
        assert!(list.contains("skills"));
    }

    #[test]
    fn rejects_duplicates() {
        let mut decls = portfolio();
        decls.push(SectionDecl::new("#home", "Again"));
        assert_eq!(
            SectionList::new(decls),
            Err(SectionListError::DuplicateId(SectionId::from("home")))
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(SectionList::new(vec![]), Err(SectionListError::Empty));
        assert_eq!(
            SectionList::new(vec![SectionDecl::new("#", "Nothing")]),
            Err(SectionListError::EmptyId { position: 0 })
        );
    }

    #[test]
    fn label_defaults_to_capitalized_id() {
        let decl = SectionDecl {
            id: SectionId::from("certifications"),
            label: None,
            visibility: Visibility::Always,
        };
        let list = SectionList::new(vec![decl]).expect("valid sections");
        assert_eq!(list.as_slice()[0].label, "Certifications");
    }

    #[test]
    fn compact_only_sections_are_filtered() {
        let list = SectionList::new(portfolio()).expect("valid sections");
        let regular: Vec<String> = list
            .rendered_in(LayoutMode::Regular)
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(regular, vec!["home", "skills", "contact"]);
        assert_eq!(list.rendered_in(LayoutMode::Compact).len(), 4);
    }
}
