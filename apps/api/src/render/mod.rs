// PDF rendering: layout a `StructuredResume`, then serialize the pages with pdf-writer.
// Rendering is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod encoding;
pub mod pdf;

use tracing::{debug, info};

use crate::layout::{default_page_config, layout_resume, FontFamily, PageConfig};
use crate::resume::{parse_resume, strip_changes_summary, StructuredResume};

pub use pdf::write_pdf;

/// Renders structured resumes to PDF with a fixed page setup.
///
/// The font family is resolved once at construction; rendering itself cannot fail.
#[derive(Debug, Clone)]
pub struct ResumeRenderer {
    config: PageConfig,
}

impl ResumeRenderer {
    pub fn new(font: FontFamily) -> Self {
        Self::with_config(default_page_config(font))
    }

    /// Builds a renderer from a configured font name. Unknown names fall back to
    /// Helvetica with a warning.
    pub fn from_font_name(name: &str) -> Self {
        Self::new(FontFamily::resolve_or_default(name))
    }

    pub fn with_config(config: PageConfig) -> Self {
        debug!(font = ?config.font, "Resume renderer configured");
        Self { config }
    }

    pub fn page_config(&self) -> &PageConfig {
        &self.config
    }

    pub fn render(&self, doc: &StructuredResume) -> Vec<u8> {
        let layout = layout_resume(doc, &self.config);
        let bytes = write_pdf(&layout, &self.config);
        info!(
            pages = layout.pages.len(),
            sections = doc.sections.len(),
            bytes = bytes.len(),
            "Rendered resume PDF"
        );
        bytes
    }

    /// Strips a trailing Changes Summary, parses, and renders in one step.
    pub fn render_markdown(&self, markdown: &str) -> Vec<u8> {
        let doc = parse_resume(&strip_changes_summary(markdown));
        self.render(&doc)
    }
}

impl Default for ResumeRenderer {
    fn default() -> Self {
        Self::new(FontFamily::Helvetica)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_from_font_name_resolves_aliases() {
        assert_eq!(
            ResumeRenderer::from_font_name("Arial").page_config().font,
            FontFamily::Helvetica
        );
        assert_eq!(
            ResumeRenderer::from_font_name("Times New Roman").page_config().font,
            FontFamily::Times
        );
    }

    #[test]
    fn test_unknown_font_falls_back_to_helvetica() {
        let renderer = ResumeRenderer::from_font_name("Comic Sans");
        assert_eq!(renderer.page_config().font, FontFamily::Helvetica);
    }

    #[test]
    fn test_render_empty_resume_still_produces_pdf() {
        let bytes = ResumeRenderer::default().render(&StructuredResume::default());
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, "/Count 1"));
    }

    #[test]
    fn test_render_markdown_drops_changes_summary() {
        let md = "# Jane Doe\njane@example.com\n## EXPERIENCE\n- Led migration\n\n## Changes Summary\n- Added keywords";
        let bytes = ResumeRenderer::default().render_markdown(md);

        assert!(contains(&bytes, "(- Led migration) Tj"));
        assert!(!contains(&bytes, "Added keywords"));
        assert!(!contains(&bytes, "CHANGES SUMMARY"));
    }
}
