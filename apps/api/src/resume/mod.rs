// Resume model and markdown parsing.
// Everything here is pure and synchronous: markdown in, `StructuredResume` out.

pub mod contact;
pub mod inline;
pub mod model;
pub mod parser;
pub mod summary;

pub use model::{Section, SectionCategory, StructuredResume};
pub use parser::parse_resume;
pub use summary::strip_changes_summary;
