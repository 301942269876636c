use waypost_protocol::{NavCommand, SectionId, ThemeMode, ViewportState};

use crate::layout::LayoutMode;
use crate::loader::{LoaderPhase, SplashLoader};
use crate::manifest::{ManifestError, PageManifest, parse_manifest};
use crate::nav::{NavBar, NavKey};
use crate::tracker::{ScrollHost, SectionGeometry, SectionScrollTracker};

/// One page visit: the tracker plus the nav bar, theme, and splash state
/// that front ends render from.
#[derive(Debug, Clone)]
pub struct PageSession {
    tracker: SectionScrollTracker,
    nav: NavBar,
    theme: ThemeMode,
    loader: SplashLoader,
}

impl PageSession {
    pub fn new(manifest: PageManifest) -> Self {
        Self {
            tracker: SectionScrollTracker::new(manifest.sections, manifest.tracker),
            nav: NavBar::new(),
            theme: ThemeMode::default(),
            loader: SplashLoader::new(manifest.splash),
        }
    }

    pub fn from_json(data: &[u8]) -> Result<Self, ManifestError> {
        Ok(Self::new(parse_manifest(data)?))
    }

    pub fn tracker(&self) -> &SectionScrollTracker {
        &self.tracker
    }

    pub fn active_section(&self) -> Option<&SectionId> {
        self.tracker.active_section()
    }

    pub fn layout(&self) -> LayoutMode {
        self.tracker.layout()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn is_menu_open(&self) -> bool {
        self.nav.is_menu_open()
    }

    pub fn open_menu(&mut self) {
        if self.layout().uses_menu_overlay() {
            self.nav.open_menu();
        }
    }

    pub fn close_menu(&mut self) {
        self.nav.close_menu();
    }

    pub fn loader_phase(&self, elapsed_ms: f64) -> LoaderPhase {
        self.loader.phase_at(elapsed_ms)
    }

    /// Apply a viewport width change. Returns whether the active section
    /// changed as a result.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        let layout = LayoutMode::from_width(width);
        if !layout.uses_menu_overlay() {
            self.nav.close_menu();
        }
        self.tracker.set_layout(layout)
    }

    pub fn on_scroll<G: SectionGeometry + ?Sized>(
        &mut self,
        viewport: &ViewportState,
        geometry: &G,
    ) -> bool {
        self.tracker.on_scroll(viewport, geometry)
    }

    /// A link was clicked or tapped.
    pub fn follow_link<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: &SectionId,
    ) -> bool {
        self.nav.link_activated(target);
        self.tracker.scroll_to_section(host, target)
    }

    /// A key was pressed on a focused link. Only Enter and Space navigate.
    pub fn handle_key<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: NavKey,
        target: &SectionId,
    ) -> bool {
        if !key.activates() {
            return false;
        }
        self.follow_link(host, target)
    }

    pub fn nav_commands(&self) -> Vec<NavCommand> {
        self.nav.render(
            self.tracker.rendered_sections(),
            self.tracker.active_section(),
            self.theme,
            self.tracker.layout(),
        )
    }
}
