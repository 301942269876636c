pub mod section;

pub use section::{Section, SectionDecl, SectionList, SectionListError, Visibility};
