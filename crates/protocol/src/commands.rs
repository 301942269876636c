use serde::{Deserialize, Serialize};

use crate::section_id::SectionId;
use crate::theme::ThemeToken;

/// A single, stateless nav bar instruction.
///
/// The core emits a `Vec<NavCommand>` whenever the active section, theme,
/// layout, or menu state changes. Front ends consume the list in order;
/// each command carries everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavCommand {
    /// The bar container itself.
    Bar {
        background: ThemeToken,
        border: ThemeToken,
    },

    /// A link to a section. `active` links are drawn highlighted.
    Link {
        target: SectionId,
        label: String,
        active: bool,
        color: ThemeToken,
    },

    /// Indicator drawn under the active link.
    Underline { target: SectionId, color: ThemeToken },

    /// Button that opens the compact-layout menu overlay.
    MenuButton { color: ThemeToken },

    /// Start of the menu overlay. Links until `EndMenu` belong to it.
    BeginMenu { background: ThemeToken },

    /// End of the menu overlay.
    EndMenu,
}

impl NavCommand {
    /// Section targeted by this command, if it is a link.
    pub fn link_target(&self) -> Option<&SectionId> {
        match self {
            NavCommand::Link { target, .. } => Some(target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let cmd = NavCommand::Link {
            target: SectionId::from("about"),
            label: "About".into(),
            active: true,
            color: ThemeToken::LinkActive,
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert!(json.contains("\"kind\":\"link\""));
        assert!(json.contains("\"target\":\"about\""));
        assert_eq!(cmd.link_target().map(SectionId::as_str), Some("about"));
        assert_eq!(NavCommand::EndMenu.link_target(), None);
    }
}
