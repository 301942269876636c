pub mod commands;
pub mod section_id;
pub mod theme;
pub mod types;

pub use commands::NavCommand;
pub use section_id::SectionId;
pub use theme::{ThemeMode, ThemeToken};
pub use types::{SectionBounds, ViewportState};
