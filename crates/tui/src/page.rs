use std::collections::HashMap;

use waypost_core::ScrollHost;
use waypost_core::model::Section;
use waypost_core::smooth::SmoothScroll;
use waypost_protocol::{SectionBounds, SectionId, ViewportState};

use crate::config::PreviewConfig;

/// A simulated page: sections stacked top to bottom, followed by a footer.
pub struct SimulatedPage {
    order: Vec<(SectionId, String)>,
    bounds: HashMap<SectionId, SectionBounds>,
    document_height: f64,
    viewport_height: f64,
    scroll_y: f64,
    animation: Option<SmoothScroll>,
}

impl SimulatedPage {
    pub fn lay_out(sections: &[Section], config: &PreviewConfig) -> Self {
        let mut order = Vec::with_capacity(sections.len());
        let mut bounds = HashMap::with_capacity(sections.len());
        let mut top = 0.0;
        for section in sections {
            let height = config.section_height(&section.id);
            bounds.insert(section.id.clone(), SectionBounds::new(top, height));
            order.push((section.id.clone(), section.label.clone()));
            top += height;
        }
        Self {
            order,
            bounds,
            document_height: top + config.footer_height.max(0.0),
            viewport_height: 0.0,
            scroll_y: 0.0,
            animation: None,
        }
    }

    pub fn bounds(&self) -> &HashMap<SectionId, SectionBounds> {
        &self.bounds
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport(&self) -> ViewportState {
        ViewportState::new(self.scroll_y, self.viewport_height, self.document_height)
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        self.scroll_y = self.scroll_y.min(self.viewport().max_scroll());
    }

    /// Manual scroll; cancels any running animation.
    pub fn scroll_by(&mut self, dy: f64) {
        self.animation = None;
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.viewport().max_scroll());
    }

    /// Advance the smooth-scroll animation. Returns whether the page moved.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let Some(anim) = self.animation.as_mut() else {
            return false;
        };
        self.scroll_y = anim.tick(dt_ms);
        if anim.is_finished() {
            self.animation = None;
        }
        true
    }

    /// Section label covering document position `y`, and whether `y` is the
    /// first row of that section.
    pub fn section_at(&self, y: f64, row_px: f64) -> Option<(&SectionId, &str, bool)> {
        self.order.iter().find_map(|(id, label)| {
            let b = self.bounds.get(id)?;
            b.contains(y)
                .then(|| (id, label.as_str(), y - b.top < row_px))
        })
    }
}

impl ScrollHost for SimulatedPage {
    type Element = SectionBounds;

    fn find_section(&self, id: &SectionId) -> Option<SectionBounds> {
        self.bounds.get(id).copied()
    }

    fn smooth_scroll_into_view(&mut self, element: &SectionBounds) {
        let target = element.top.clamp(0.0, self.viewport().max_scroll());
        match self.animation.as_mut() {
            Some(anim) => anim.retarget(target),
            None => self.animation = Some(SmoothScroll::start(self.scroll_y, target)),
        }
    }
}
