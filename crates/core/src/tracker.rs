use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};
use tracing::debug;
use waypost_protocol::{SectionBounds, SectionId, ViewportState};

use crate::layout::LayoutMode;
use crate::model::{Section, SectionList};

/// Distance the fixed nav bar covers at the top of the viewport.
pub const DEFAULT_LOOKAHEAD_PX: f64 = 150.0;
/// Scroll offsets below this count as "at the top of the page".
pub const DEFAULT_TOP_THRESHOLD_PX: f64 = 100.0;
/// Slack before the document end at which the last section is forced active.
pub const DEFAULT_BOTTOM_THRESHOLD_PX: f64 = 100.0;

/// Tuning for active-section detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_lookahead")]
    pub lookahead_px: f64,
    #[serde(default = "default_top_threshold")]
    pub top_threshold_px: f64,
    #[serde(default = "default_bottom_threshold")]
    pub bottom_threshold_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lookahead_px: DEFAULT_LOOKAHEAD_PX,
            top_threshold_px: DEFAULT_TOP_THRESHOLD_PX,
            bottom_threshold_px: DEFAULT_BOTTOM_THRESHOLD_PX,
        }
    }
}

fn default_lookahead() -> f64 {
    DEFAULT_LOOKAHEAD_PX
}

fn default_top_threshold() -> f64 {
    DEFAULT_TOP_THRESHOLD_PX
}

fn default_bottom_threshold() -> f64 {
    DEFAULT_BOTTOM_THRESHOLD_PX
}

/// Source of per-section layout geometry.
///
/// `None` means the section's element is not rendered (or not laid out)
/// yet; the tracker skips it for that pass.
pub trait SectionGeometry {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds>;
}

impl<S: BuildHasher> SectionGeometry for HashMap<SectionId, SectionBounds, S> {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.get(id).copied()
    }
}

impl<G: SectionGeometry + ?Sized> SectionGeometry for &G {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        (**self).bounds(id)
    }
}

/// The environment that owns the rendered page and can scroll it.
pub trait ScrollHost {
    /// Handle to a rendered section element.
    type Element;

    /// Locate the rendered element for `id`, if it exists.
    fn find_section(&self, id: &SectionId) -> Option<Self::Element>;

    /// Start an animated scroll that aligns the element's top with the
    /// viewport top. Must not block; completion is not reported.
    fn smooth_scroll_into_view(&mut self, element: &Self::Element);
}

/// Determine which section is in view.
///
/// Rule precedence, highest first:
/// 1. Near the document end the last section in `sections` is active.
/// 2. Near the document top nothing is active.
/// 3. The last section (in declaration order) whose bounds contain the
///    effective position is active. Sections without bounds are skipped.
/// 4. Otherwise `previous` is kept.
///
/// The result is always `None` or a member of `sections`. A viewport that
/// is not laid out yet keeps `previous`.
pub fn compute_active_section<G: SectionGeometry + ?Sized>(
    config: &TrackerConfig,
    viewport: &ViewportState,
    sections: &[Section],
    geometry: &G,
    previous: Option<&SectionId>,
) -> Option<SectionId> {
    if !viewport.is_laid_out() {
        return retain(sections, previous);
    }

    let effective = viewport.scroll_y + config.lookahead_px;

    if effective + viewport.viewport_height
        >= viewport.document_height - config.bottom_threshold_px
    {
        return sections.last().map(|s| s.id.clone());
    }

    if viewport.scroll_y < config.top_threshold_px {
        return None;
    }

    // Reverse walk: on overlapping bounds the lower section wins.
    sections
        .iter()
        .rev()
        .find(|s| {
            geometry
                .bounds(&s.id)
                .is_some_and(|b| b.contains(effective))
        })
        .map(|s| s.id.clone())
        .or_else(|| retain(sections, previous))
}

fn retain(sections: &[Section], previous: Option<&SectionId>) -> Option<SectionId> {
    previous
        .filter(|p| sections.iter().any(|s| s.id == **p))
        .cloned()
}

/// Owns the page's `ActiveSection` and drives smooth-scroll navigation.
///
/// Constructed once per page session. Geometry is passed in on each call
/// rather than read from the environment, so the tracker works the same in
/// the browser, in the terminal preview, and in tests.
#[derive(Debug, Clone)]
pub struct SectionScrollTracker {
    config: TrackerConfig,
    sections: SectionList,
    layout: LayoutMode,
    rendered: Vec<Section>,
    active: Option<SectionId>,
}

impl SectionScrollTracker {
    pub fn new(sections: SectionList, config: TrackerConfig) -> Self {
        let layout = LayoutMode::default();
        let rendered = sections.rendered_in(layout);
        Self {
            config,
            sections,
            layout,
            rendered,
            active: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.set_layout(layout);
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// Sections rendered in the current layout, in declaration order.
    pub fn rendered_sections(&self) -> &[Section] {
        &self.rendered
    }

    pub fn active_section(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|a| a == id)
    }

    /// Switch layout. A section that stops being rendered cannot stay
    /// active. Returns whether the active section changed.
    pub fn set_layout(&mut self, layout: LayoutMode) -> bool {
        if layout == self.layout {
            return false;
        }
        self.layout = layout;
        self.rendered = self.sections.rendered_in(layout);
        debug!(?layout, sections = self.rendered.len(), "layout changed");

        let kept = retain(&self.rendered, self.active.as_ref());
        self.replace_active(kept)
    }

    /// Active section for this sample without storing it.
    pub fn compute<G: SectionGeometry + ?Sized>(
        &self,
        viewport: &ViewportState,
        geometry: &G,
    ) -> Option<SectionId> {
        compute_active_section(
            &self.config,
            viewport,
            &self.rendered,
            geometry,
            self.active.as_ref(),
        )
    }

    /// Handle one scroll signal. Returns whether the active section changed.
    pub fn on_scroll<G: SectionGeometry + ?Sized>(
        &mut self,
        viewport: &ViewportState,
        geometry: &G,
    ) -> bool {
        let next = self.compute(viewport, geometry);
        self.replace_active(next)
    }

    /// Smooth-scroll to `target`. Returns `false`, and does nothing, when the
    /// section has no rendered element. Never touches the active section;
    /// the resulting scroll events will.
    pub fn scroll_to_section<H: ScrollHost + ?Sized>(
        &self,
        host: &mut H,
        target: &SectionId,
    ) -> bool {
        match host.find_section(target) {
            Some(element) => {
                debug!(%target, "scrolling to section");
                host.smooth_scroll_into_view(&element);
                true
            }
            None => {
                debug!(%target, "no rendered element for section, ignoring");
                false
            }
        }
    }

    fn replace_active(&mut self, next: Option<SectionId>) -> bool {
        if next == self.active {
            return false;
        }
        debug!(
            from = self.active.as_deref().unwrap_or("<none>"),
            to = next.as_deref().unwrap_or("<none>"),
            "active section changed"
        );
        self.active = next;
        true
    }
}
