// Resume layout: font metrics, word wrap, per-category formatting rules, and the
// page composer that positions every run before PDF emission.
// Layout is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod rules;
pub mod wrap;

// Re-export the public API consumed by the renderer and the service state.
pub use engine::{layout_resume, LaidOutDocument, LaidOutPage, LinkArea, TextColor};
pub use font_metrics::{default_page_config, FontFamily, FontWeight, PageConfig};
