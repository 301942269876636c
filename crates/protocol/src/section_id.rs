use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable identifier of a page section (`"home"`, `"contact"`, ...).
///
/// Wraps `Arc<str>` so the tracker can hand the active id to the nav bar on
/// every scroll event without allocating. Anchor spellings (`"#home"`) are
/// normalized on construction, so `SectionId::from("#home") == "home"`.
#[derive(Debug, Clone, Eq)]
pub struct SectionId(Arc<str>);

impl SectionId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment form used for in-page links and DOM lookups.
    pub fn anchor(&self) -> String {
        format!("#{}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn normalize(raw: &str) -> Arc<str> {
        Arc::from(raw.trim().trim_start_matches('#'))
    }
}

impl PartialEq for SectionId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<str> for SectionId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Ord for SectionId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for SectionId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for SectionId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

impl std::ops::Deref for SectionId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SectionId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        SectionId(Self::normalize(s))
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        SectionId(Self::normalize(&s))
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled to avoid serde's `rc` feature.
impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SectionId::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_prefix_is_stripped() {
        assert_eq!(SectionId::from("#contact"), "contact");
        assert_eq!(SectionId::from("  skills "), "skills");
        assert_eq!(SectionId::from("#about"), SectionId::from("about"));
    }

    #[test]
    fn anchor_form() {
        assert_eq!(SectionId::from("projects").anchor(), "#projects");
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(SectionId::from("home"), 0.0_f64);
        assert_eq!(map.get("home"), Some(&0.0));
    }

    #[test]
    fn deserializes_escaped_and_anchor_strings() {
        let id: SectionId =
            serde_json::from_str("\"#edu\\u0063ation\"").unwrap_or_else(|_| SectionId::from(""));
        assert_eq!(id, "education");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"education\"");
    }

    #[test]
    fn empty_after_normalization() {
        assert!(SectionId::from("#").is_empty());
    }
}
