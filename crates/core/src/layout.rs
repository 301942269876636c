use serde::{Deserialize, Serialize};

/// Viewports narrower than this use the compact (phone/tablet) layout.
pub const COMPACT_BREAKPOINT: f64 = 1024.0;
/// Viewports at least this wide use the extra-large layout.
pub const EXTRA_LARGE_BREAKPOINT: f64 = 1680.0;

/// Page layout selected from the viewport width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    Compact,
    #[default]
    Regular,
    ExtraLarge,
}

impl LayoutMode {
    pub fn from_width(width: f64) -> Self {
        if width < COMPACT_BREAKPOINT {
            LayoutMode::Compact
        } else if width >= EXTRA_LARGE_BREAKPOINT {
            LayoutMode::ExtraLarge
        } else {
            LayoutMode::Regular
        }
    }

    /// Compact layouts collapse the nav links into a menu overlay.
    pub fn uses_menu_overlay(self) -> bool {
        self == LayoutMode::Compact
    }
}
