pub mod layout;
pub mod loader;
pub mod manifest;
pub mod model;
pub mod nav;
pub mod session;
pub mod smooth;
pub mod tracker;

pub use manifest::{PageManifest, parse_manifest};
pub use session::PageSession;
pub use tracker::{ScrollHost, SectionGeometry, SectionScrollTracker, TrackerConfig};
