//! Serializes a `LaidOutDocument` into PDF bytes.
//!
//! Two un-embedded Type1 base fonts are registered per document (`F1` regular, `F2`
//! bold) with WinAnsiEncoding. Every page gets one uncompressed content stream and
//! one URI link annotation per `LinkArea`.

use chrono::{Datelike, Timelike, Utc};
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::font_metrics::MM_PER_PT;
use crate::layout::{
    FontFamily, FontWeight, LaidOutDocument, LaidOutPage, LinkArea, PageConfig, TextColor,
};
use crate::render::encoding::encode_win_ansi;

const PRODUCER: &str = "ats-optimizer";
const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
const LINK_RGB: (f32, f32, f32) = (0.0, 0.0, 1.0);

fn font_resource(weight: FontWeight) -> Name<'static> {
    match weight {
        FontWeight::Regular => REGULAR_FONT,
        FontWeight::Bold => BOLD_FONT,
    }
}

/// Converts top-left millimetre coordinates to PDF user space (points, origin
/// bottom-left).
struct PageSpace {
    height_pt: f32,
}

impl PageSpace {
    fn new(config: &PageConfig) -> Self {
        Self {
            height_pt: config.page_height_mm / MM_PER_PT,
        }
    }

    fn x(&self, mm: f32) -> f32 {
        mm / MM_PER_PT
    }

    fn y(&self, mm_from_top: f32) -> f32 {
        self.height_pt - mm_from_top / MM_PER_PT
    }

    fn link_rect(&self, link: &LinkArea) -> Rect {
        Rect::new(
            self.x(link.x_mm),
            self.y(link.y_mm + link.height_mm),
            self.x(link.x_mm + link.width_mm),
            self.y(link.y_mm),
        )
    }
}

/// Writes the laid-out pages as a complete PDF file.
pub fn write_pdf(layout: &LaidOutDocument, config: &PageConfig) -> Vec<u8> {
    let space = PageSpace::new(config);
    let page_width_pt = space.x(config.page_width_mm);

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let info_id = alloc.bump();

    let page_ids: Vec<Ref> = layout.pages.iter().map(|_| alloc.bump()).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    write_font(&mut pdf, regular_id, config.font, FontWeight::Regular);
    write_font(&mut pdf, bold_id, config.font, FontWeight::Bold);

    for (page, &page_id) in layout.pages.iter().zip(&page_ids) {
        let content_id = alloc.bump();
        let annot_ids: Vec<Ref> = page.links.iter().map(|_| alloc.bump()).collect();

        let mut writer = pdf.page(page_id);
        writer
            .media_box(Rect::new(0.0, 0.0, page_width_pt, space.height_pt))
            .parent(tree_id)
            .contents(content_id);
        writer
            .resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        if !annot_ids.is_empty() {
            writer.annotations(annot_ids.iter().copied());
        }
        writer.finish();

        for (link, &annot_id) in page.links.iter().zip(&annot_ids) {
            let mut annot = pdf.annotation(annot_id);
            annot
                .subtype(AnnotationType::Link)
                .rect(space.link_rect(link))
                .border(0.0, 0.0, 0.0, None);
            annot
                .action()
                .action_type(ActionType::Uri)
                .uri(Str(link.url.as_bytes()));
            annot.finish();
        }

        let stream = page_content(page, &space);
        pdf.stream(content_id, &stream);
    }

    let now = Utc::now();
    let mut info = pdf.document_info(info_id);
    if let Some(title) = layout.title.as_deref() {
        info.title(TextStr(title));
    }
    info.producer(TextStr(PRODUCER)).creation_date(
        Date::new(now.year() as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8),
    );
    info.finish();

    pdf.finish()
}

fn write_font(pdf: &mut Pdf, id: Ref, family: FontFamily, weight: FontWeight) {
    pdf.type1_font(id)
        .base_font(Name(family.base_font(weight).as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
}

/// Builds the content stream for one page. Link runs switch the fill color to blue
/// and the next black run switches it back.
fn page_content(page: &LaidOutPage, space: &PageSpace) -> Vec<u8> {
    let mut content = Content::new();
    if page.runs.is_empty() {
        return content.finish();
    }

    content.begin_text();
    let mut font: Option<(FontWeight, f32)> = None;
    let mut color = TextColor::Black;

    for run in &page.runs {
        if font != Some((run.weight, run.size_pt)) {
            content.set_font(font_resource(run.weight), run.size_pt);
            font = Some((run.weight, run.size_pt));
        }
        if run.color != color {
            match run.color {
                TextColor::Link => {
                    content.set_fill_rgb(LINK_RGB.0, LINK_RGB.1, LINK_RGB.2);
                }
                TextColor::Black => {
                    content.set_fill_gray(0.0);
                }
            }
            color = run.color;
        }

        let x = space.x(run.x_mm);
        let y = space.y(run.baseline_mm);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encode_win_ansi(&run.text)));
    }

    content.end_text();
    content.finish()
}
