//! Layout engine: positions every text run of a `StructuredResume` on fixed-size pages.
//!
//! The engine is a cursor moving down the page. Every line reserves its height first;
//! if the line would cross the break trigger, a new page is started at the top margin.
//! Vertical gaps (before headings, bullets, sub-headings) never trigger a break on their
//! own, only the next line does.
//!
//! Output is a `LaidOutDocument`: plain data that the PDF writer serializes, and that
//! tests can inspect without decoding PDF bytes.

use tracing::debug;

use crate::layout::font_metrics::{
    get_metrics, FontMetricTable, FontWeight, PageConfig, MM_PER_PT,
};
use crate::layout::rules::{rule_for, LineKind};
use crate::layout::wrap::wrap_text;
use crate::resume::contact::{tokenize_contact, ContactToken, CONTACT_SEPARATOR};
use crate::resume::inline::{clean_markdown, strip_bold_markers};
use crate::resume::{Section, StructuredResume};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    Link,
}

/// A single line of text at an absolute position. Coordinates are millimetres from the
/// top-left corner of the page; `baseline_mm` is the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub size_pt: f32,
    pub weight: FontWeight,
    pub color: TextColor,
}

/// A clickable rectangle. `y_mm` is the top edge, measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    pub url: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub runs: Vec<TextRun>,
    pub links: Vec<LinkArea>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub title: Option<String>,
    pub pages: Vec<LaidOutPage>,
}

// Spacing between blocks, in millimetres.
const CONTACT_TRAILING_GAP_MM: f32 = 2.0;
const SECTION_GAP_MM: f32 = 4.0;
const HEADING_TRAILING_GAP_MM: f32 = 1.0;
const BULLET_GAP_MM: f32 = 0.5;
const BULLET_PREFIX: &str = "- ";

#[derive(Debug, Clone, Copy)]
struct RunStyle {
    size_pt: f32,
    weight: FontWeight,
    color: TextColor,
}

impl RunStyle {
    fn new(size_pt: f32, weight: FontWeight) -> Self {
        Self {
            size_pt,
            weight,
            color: TextColor::Black,
        }
    }

    fn link(self) -> Self {
        Self {
            color: TextColor::Link,
            ..self
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a resume in document order: name, contact line, then each section.
/// Missing name or contact simply skip their block.
pub fn layout_resume(doc: &StructuredResume, config: &PageConfig) -> LaidOutDocument {
    let mut composer = Composer::new(config);

    if let Some(name) = &doc.name {
        composer.name_block(name);
    }
    if let Some(contact) = &doc.contact {
        composer.contact_block(contact);
    }
    for section in &doc.sections {
        composer.section_block(section);
    }

    let pages = composer.finish();
    debug!(
        pages = pages.len(),
        sections = doc.sections.len(),
        "Resume layout complete"
    );

    LaidOutDocument {
        title: doc.name.clone(),
        pages,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

struct Composer<'a> {
    config: &'a PageConfig,
    regular: &'static FontMetricTable,
    bold: &'static FontMetricTable,
    done: Vec<LaidOutPage>,
    page: LaidOutPage,
    /// Top of the next line, from the top edge of the page.
    y: f32,
}

impl<'a> Composer<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            regular: get_metrics(config.font, FontWeight::Regular),
            bold: get_metrics(config.font, FontWeight::Bold),
            done: Vec::new(),
            page: LaidOutPage::default(),
            y: config.margin_top_mm,
        }
    }

    fn metrics(&self, weight: FontWeight) -> &'static FontMetricTable {
        match weight {
            FontWeight::Regular => self.regular,
            FontWeight::Bold => self.bold,
        }
    }

    fn finish(mut self) -> Vec<LaidOutPage> {
        self.done.push(self.page);
        self.done
    }

    // ── cursor ────────────────────────────────────────────────────────────────

    fn gap(&mut self, mm: f32) {
        self.y += mm;
    }

    /// Starts a new page if a line of height `h` does not fit above the break trigger.
    fn reserve(&mut self, h: f32) {
        if self.y + h > self.config.break_trigger_mm() && self.y > self.config.margin_top_mm {
            self.done.push(std::mem::take(&mut self.page));
            self.y = self.config.margin_top_mm;
        }
    }

    /// Baseline for text of `size_pt` vertically centered in a line of height `h`.
    fn baseline(&self, h: f32, size_pt: f32) -> f32 {
        self.y + 0.5 * h + 0.3 * size_pt * MM_PER_PT
    }

    fn place(&mut self, text: String, x_mm: f32, h: f32, style: RunStyle) {
        let baseline_mm = self.baseline(h, style.size_pt);
        self.page.runs.push(TextRun {
            text,
            x_mm,
            baseline_mm,
            size_pt: style.size_pt,
            weight: style.weight,
            color: style.color,
        });
    }

    /// Word-wraps `text` inside the printable width minus `indent_mm` and places each line.
    fn wrapped(&mut self, text: &str, indent_mm: f32, weight: FontWeight) {
        let config = self.config;
        let size = config.body_size_pt;
        let h = config.line_height_mm;
        let x = config.margin_left_mm + indent_mm;
        let max_width = config.printable_width_mm() - indent_mm - 2.0 * config.cell_padding_mm;

        for line in wrap_text(text, self.metrics(weight), size, max_width) {
            self.reserve(h);
            self.place(line, x + config.cell_padding_mm, h, RunStyle::new(size, weight));
            self.gap(h);
        }
    }

    // ── blocks ────────────────────────────────────────────────────────────────

    fn name_block(&mut self, name: &str) {
        let config = self.config;
        let size = config.name_size_pt;
        let h = config.heading_line_height_mm;
        let width = config.printable_width_mm();
        let text = clean_markdown(name);

        for line in wrap_text(&text, self.bold, size, width - 2.0 * config.cell_padding_mm) {
            let line_w = self.bold.measure_mm(&line, size);
            let x = config.margin_left_mm + (width - line_w) / 2.0;
            self.reserve(h);
            self.place(line, x, h, RunStyle::new(size, FontWeight::Bold));
            self.gap(h);
        }
    }

    /// Centers the contact tokens joined by `" | "`. Tokens that would overflow the
    /// printable width continue on a new centered line.
    fn contact_block(&mut self, contact: &str) {
        let config = self.config;
        let size = config.body_size_pt;
        let h = config.line_height_mm;
        let width = config.printable_width_mm();
        let sep_w = self.regular.measure_mm(CONTACT_SEPARATOR, size);
        let plain = RunStyle::new(size, FontWeight::Regular);

        let mut rows: Vec<Vec<(ContactToken, f32)>> = Vec::new();
        let mut row: Vec<(ContactToken, f32)> = Vec::new();
        let mut row_w = 0.0_f32;
        for token in tokenize_contact(contact) {
            let token_w = self.regular.measure_mm(token.text(), size);
            if !row.is_empty() && row_w + sep_w + token_w > width {
                rows.push(std::mem::take(&mut row));
                row_w = 0.0;
            }
            if !row.is_empty() {
                row_w += sep_w;
            }
            row_w += token_w;
            row.push((token, token_w));
        }
        if !row.is_empty() {
            rows.push(row);
        }

        for row in rows {
            let total: f32 = row.iter().map(|(_, w)| w).sum::<f32>()
                + sep_w * row.len().saturating_sub(1) as f32;
            let mut x = config.margin_left_mm + ((width - total) / 2.0).max(0.0);

            self.reserve(h);
            let count = row.len();
            for (i, (token, token_w)) in row.into_iter().enumerate() {
                match token.url() {
                    Some(url) => {
                        self.page.links.push(LinkArea {
                            url: url.to_string(),
                            x_mm: x,
                            y_mm: self.y,
                            width_mm: token_w,
                            height_mm: h,
                        });
                        self.place(token.text().to_string(), x, h, plain.link());
                    }
                    None => {
                        self.place(token.text().to_string(), x, h, plain);
                    }
                }
                x += token_w;

                if i + 1 < count {
                    self.place(CONTACT_SEPARATOR.to_string(), x, h, plain);
                    x += sep_w;
                }
            }
            self.gap(h);
        }
        self.gap(CONTACT_TRAILING_GAP_MM);
    }

    fn section_block(&mut self, section: &Section) {
        let config = self.config;
        let size = config.body_size_pt;
        let h = config.heading_line_height_mm;
        let heading = clean_markdown(&section.heading).to_uppercase();
        let max_width = config.printable_width_mm() - 2.0 * config.cell_padding_mm;

        self.gap(SECTION_GAP_MM);
        for line in wrap_text(&heading, self.bold, size, max_width) {
            self.reserve(h);
            let x = config.margin_left_mm + config.cell_padding_mm;
            self.place(line, x, h, RunStyle::new(size, FontWeight::Bold));
            self.gap(h);
        }
        self.gap(HEADING_TRAILING_GAP_MM);

        let rule = rule_for(section.category());
        for raw in &section.content {
            match rule.classify(raw) {
                LineKind::SubHeading(text) => {
                    self.gap(rule.sub_heading_gap_mm);
                    self.wrapped(&strip_bold_markers(text), 0.0, FontWeight::Bold);
                }
                LineKind::Bullet(text) => {
                    self.gap(BULLET_GAP_MM);
                    let bullet = format!("{BULLET_PREFIX}{}", clean_markdown(text));
                    self.wrapped(&bullet, rule.bullet_indent_mm, FontWeight::Regular);
                }
                LineKind::Detail(text) => {
                    let indent = rule.detail_indent_mm.unwrap_or(0.0);
                    self.wrapped(&clean_markdown(text), indent, FontWeight::Regular);
                }
                LineKind::Paragraph(text) => {
                    self.wrapped(&clean_markdown(text), 0.0, FontWeight::Regular);
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
