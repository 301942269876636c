use tracing::debug;
use waypost_protocol::{NavCommand, SectionId, ThemeMode, ThemeToken};

use crate::layout::LayoutMode;
use crate::model::Section;

/// Keys a focused nav link responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Enter,
    Space,
    Other,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` (or a similar name) to a nav key.
    pub fn from_key_name(key: &str) -> Self {
        match key {
            "Enter" => NavKey::Enter,
            " " | "Space" | "Spacebar" => NavKey::Space,
            _ => NavKey::Other,
        }
    }

    pub fn activates(self) -> bool {
        matches!(self, NavKey::Enter | NavKey::Space)
    }
}

/// Navigation bar state that is not derived from scrolling: whether the
/// compact-layout menu overlay is open.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    menu_open: bool,
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Called when a link was activated; picking a destination dismisses
    /// the overlay.
    pub fn link_activated(&mut self, target: &SectionId) {
        if self.menu_open {
            debug!(%target, "closing menu after link activation");
        }
        self.menu_open = false;
    }

    /// Build the nav bar for the given state.
    ///
    /// Wide layouts get one link per rendered section with an underline
    /// below the active one. Compact layouts get a menu button, and the
    /// overlay grid of links while the menu is open.
    pub fn render(
        &self,
        sections: &[Section],
        active: Option<&SectionId>,
        theme: ThemeMode,
        layout: LayoutMode,
    ) -> Vec<NavCommand> {
        let mut commands = Vec::with_capacity(sections.len() + 4);
        commands.push(NavCommand::Bar {
            background: ThemeToken::nav_background(theme),
            border: ThemeToken::NavBorder,
        });

        if layout.uses_menu_overlay() {
            commands.push(NavCommand::MenuButton {
                color: ThemeToken::MenuButton,
            });
            if self.menu_open {
                commands.push(NavCommand::BeginMenu {
                    background: ThemeToken::MenuOverlay,
                });
                for section in sections {
                    commands.push(NavCommand::Link {
                        target: section.id.clone(),
                        label: section.label.clone(),
                        active: false,
                        color: ThemeToken::MenuText,
                    });
                }
                commands.push(NavCommand::EndMenu);
            }
            return commands;
        }

        for section in sections {
            let is_active = active.is_some_and(|a| *a == section.id);
            commands.push(NavCommand::Link {
                target: section.id.clone(),
                label: section.label.clone(),
                active: is_active,
                color: if is_active {
                    ThemeToken::LinkActive
                } else {
                    ThemeToken::LinkIdle
                },
            });
            if is_active {
                commands.push(NavCommand::Underline {
                    target: section.id.clone(),
                    color: ThemeToken::ActiveUnderline,
                });
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SectionDecl, SectionList};

    fn sections() -> SectionList {
        SectionList::new(vec![
            SectionDecl::new("home", "Home"),
            SectionDecl::new("skills", "Skills"),
            SectionDecl::new("contact", "Contact"),
        ])
        .expect("valid sections")
    }

    #[test]
    fn key_names() {
        assert!(NavKey::from_key_name("Enter").activates());
        assert!(NavKey::from_key_name(" ").activates());
        assert!(NavKey::from_key_name("Spacebar").activates());
        assert!(!NavKey::from_key_name("Tab").activates());
        assert!(!NavKey::from_key_name("a").activates());
    }

    #[test]
    fn wide_layout_highlights_active_link() {
        let list = sections();
        let active = SectionId::from("skills");
        let cmds = NavBar::new().render(
            list.as_slice(),
            Some(&active),
            ThemeMode::Dark,
            LayoutMode::Regular,
        );

        let links: Vec<(&str, bool)> = cmds
            .iter()
            .filter_map(|c| match c {
                NavCommand::Link { target, active, .. } => Some((target.as_str(), *active)),
                _ => None,
            })
            .collect();
        assert_eq!(
            links,
            vec![("home", false), ("skills", true), ("contact", false)]
        );

        let underlines = cmds
            .iter()
            .filter(|c| matches!(c, NavCommand::Underline { .. }))
            .count();
        assert_eq!(underlines, 1);
        assert!(matches!(
            cmds[0],
            NavCommand::Bar {
                background: ThemeToken::NavBackgroundDark,
                ..
            }
        ));
    }

    #[test]
    fn no_underline_when_nothing_active() {
        let list = sections();
        let cmds = NavBar::new().render(
            list.as_slice(),
            None,
            ThemeMode::Light,
            LayoutMode::ExtraLarge,
        );
        assert!(!cmds.iter().any(|c| matches!(c, NavCommand::Underline { .. })));
    }

    #[test]
    fn compact_layout_uses_menu() {
        let list = sections();
        let mut nav = NavBar::new();
        let closed = nav.render(list.as_slice(), None, ThemeMode::Dark, LayoutMode::Compact);
        assert_eq!(closed.len(), 2);
        assert!(closed.iter().all(|c| c.link_target().is_none()));

        nav.open_menu();
        let open = nav.render(list.as_slice(), None, ThemeMode::Dark, LayoutMode::Compact);
        assert_eq!(open.iter().filter(|c| c.link_target().is_some()).count(), 3);
        assert_eq!(open.last(), Some(&NavCommand::EndMenu));

        nav.link_activated(&SectionId::from("contact"));
        assert!(!nav.is_menu_open());
    }
}
