use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::loader::SplashConfig;
use crate::model::{SectionDecl, SectionList, SectionListError};
use crate::tracker::TrackerConfig;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sections: {0}")]
    Sections(#[from] SectionListError),
}

/// Everything a page declares up front: its sections and tracker tuning.
#[derive(Debug, Clone)]
pub struct PageManifest {
    pub sections: SectionList,
    pub tracker: TrackerConfig,
    pub splash: SplashConfig,
}

#[derive(Deserialize)]
struct RawManifest {
    sections: Vec<SectionDecl>,
    #[serde(default)]
    tracker: TrackerConfig,
    #[serde(default)]
    splash: SplashConfig,
}

/// Parse a page manifest.
///
/// Two shapes are accepted: an object with a `sections` array (plus
/// optional `tracker` and `splash` tables), or a bare array of section
/// declarations, which is how nav item lists are usually written:
///
/// ```json
/// [{ "href": "#home", "label": "Home" }, { "href": "#contact" }]
/// ```
pub fn parse_manifest(data: &[u8]) -> Result<PageManifest, ManifestError> {
    let value: serde_json::Value = serde_json::from_slice(data)?;

    let raw = if value.is_array() {
        RawManifest {
            sections: serde_json::from_value(value)?,
            tracker: TrackerConfig::default(),
            splash: SplashConfig::default(),
        }
    } else {
        serde_json::from_value(value)?
    };

    let sections = SectionList::new(raw.sections)?;
    info!(sections = sections.len(), "loaded page manifest");
    Ok(PageManifest {
        sections,
        tracker: raw.tracker,
        splash: raw.splash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_form_with_tuning() {
        let json = br#"{
            "sections": [
                {"id": "home", "label": "Home"},
                {"id": "about", "label": "About", "visibility": "compact-only"},
                {"id": "contact", "label": "Contact"}
            ],
            "tracker": {"lookahead_px": 90},
            "splash": {"hold_ms": 0}
        }"#;
        let manifest = parse_manifest(json).expect("valid manifest");
        assert_eq!(manifest.sections.len(), 3);
        assert_eq!(manifest.tracker.lookahead_px, 90.0);
        assert_eq!(manifest.tracker.top_threshold_px, 100.0);
        assert_eq!(manifest.splash.hold_ms, 0.0);
        assert_eq!(manifest.splash.reveal_ms, 500.0);
    }

    #[test]
    fn array_of_nav_items() {
        let json = br##"[{"href": "#home", "label": "Home"}, {"href": "#contact"}]"##;
        let manifest = parse_manifest(json).expect("valid manifest");
        let labels: Vec<&str> = manifest
            .sections
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Home", "Contact"]);
        assert_eq!(manifest.tracker, TrackerConfig::default());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_manifest(b"{"), Err(ManifestError::Json(_))));
        assert!(matches!(
            parse_manifest(br#"{"sections": []}"#),
            Err(ManifestError::Sections(SectionListError::Empty))
        ));
        assert!(matches!(
            parse_manifest(br#"[{"id": "a"}, {"id": "a"}]"#),
            Err(ManifestError::Sections(SectionListError::DuplicateId(_)))
        ));
    }
}
