use serde::{Deserialize, Serialize};

/// Page-level scroll geometry sampled on each scroll signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Vertical scroll offset of the page (`window.scrollY`).
    pub scroll_y: f64,
    /// Height of the visible area (`window.innerHeight`).
    pub viewport_height: f64,
    /// Total scrollable height (`documentElement.scrollHeight`).
    pub document_height: f64,
}

impl ViewportState {
    pub fn new(scroll_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    /// Whether the geometry describes a page that has been laid out.
    ///
    /// Hosts queried before first layout report zero or NaN heights; such
    /// samples carry no information about which section is in view.
    pub fn is_laid_out(&self) -> bool {
        self.scroll_y.is_finite()
            && self.viewport_height.is_finite()
            && self.document_height.is_finite()
            && self.viewport_height >= 0.0
            && self.document_height > 0.0
    }

    /// Largest scroll offset the page allows.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// Vertical extent of one rendered section within the document
/// (`offsetTop` / `offsetHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= y < top + height`.
    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y < self.bottom()
    }
}
