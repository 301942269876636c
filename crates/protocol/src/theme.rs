use serde::{Deserialize, Serialize};

/// Light or dark page theme, toggled by the visitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Semantic color tokens resolved by the front end's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Nav bar shell
    NavBackgroundDark,
    NavBackgroundLight,
    NavBorder,

    // Links
    LinkIdle,
    LinkActive,
    ActiveUnderline,

    // Compact menu
    MenuButton,
    MenuOverlay,
    MenuText,
}

impl ThemeToken {
    /// Translucent bar background matching the page theme.
    pub fn nav_background(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => ThemeToken::NavBackgroundDark,
            ThemeMode::Light => ThemeToken::NavBackgroundLight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn theme_mode_serde_is_kebab_case() {
        let json = serde_json::to_string(&ThemeMode::Light).unwrap_or_default();
        assert_eq!(json, "\"light\"");
    }
}
