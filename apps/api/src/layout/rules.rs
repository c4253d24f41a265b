//! Per-category formatting rules for section content lines.
//!
//! Each `SectionCategory` maps to a `FormattingRule` record; the layout engine only ever
//! asks the rule how to classify a line. Adding a category means adding a row here.

use crate::resume::SectionCategory;

/// How a category recognizes sub-heading lines (employer/role/date, project name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubHeadingRule {
    /// The category has no sub-headings.
    None,
    /// Any line starting with `**`.
    BoldPrefix,
    /// A line starting with `**` that also contains `|` or `(`.
    BoldPrefixWithDelimiter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormattingRule {
    pub sub_heading: SubHeadingRule,
    /// Vertical gap inserted before a sub-heading.
    pub sub_heading_gap_mm: f32,
    /// Left indent of bulleted list items.
    pub bullet_indent_mm: f32,
    /// Indent for lines that start with leading spaces, if the category treats them as
    /// detail lines.
    pub detail_indent_mm: Option<f32>,
}

/// Classification of one raw content line, carrying the text to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Bold sub-heading; text still contains its `**` markers.
    SubHeading(&'a str),
    /// List item with the `- ` / `* ` marker removed.
    Bullet(&'a str),
    /// Indented detail line, trimmed.
    Detail(&'a str),
    Paragraph(&'a str),
}

const BULLET_INDENT_MM: f32 = 5.0;

static EXPERIENCE_RULE: FormattingRule = FormattingRule {
    sub_heading: SubHeadingRule::BoldPrefixWithDelimiter,
    sub_heading_gap_mm: 2.0,
    bullet_indent_mm: BULLET_INDENT_MM,
    detail_indent_mm: None,
};

static PROJECTS_RULE: FormattingRule = FormattingRule {
    sub_heading: SubHeadingRule::BoldPrefix,
    sub_heading_gap_mm: 1.5,
    bullet_indent_mm: BULLET_INDENT_MM,
    detail_indent_mm: None,
};

static EDUCATION_RULE: FormattingRule = FormattingRule {
    sub_heading: SubHeadingRule::None,
    sub_heading_gap_mm: 0.0,
    bullet_indent_mm: BULLET_INDENT_MM,
    detail_indent_mm: Some(8.0),
};

// SKILLS and CERTIFICATIONS: bullets or plain paragraphs only.
static LIST_ONLY_RULE: FormattingRule = FormattingRule {
    sub_heading: SubHeadingRule::None,
    sub_heading_gap_mm: 0.0,
    bullet_indent_mm: BULLET_INDENT_MM,
    detail_indent_mm: None,
};

static OTHER_RULE: FormattingRule = FormattingRule {
    sub_heading: SubHeadingRule::BoldPrefix,
    sub_heading_gap_mm: 2.0,
    bullet_indent_mm: BULLET_INDENT_MM,
    detail_indent_mm: None,
};

/// Returns the formatting rule for a section category.
pub fn rule_for(category: SectionCategory) -> &'static FormattingRule {
    match category {
        SectionCategory::Experience => &EXPERIENCE_RULE,
        SectionCategory::Projects => &PROJECTS_RULE,
        SectionCategory::Education => &EDUCATION_RULE,
        SectionCategory::Skills | SectionCategory::Certifications => &LIST_ONLY_RULE,
        SectionCategory::Other => &OTHER_RULE,
    }
}

/// Returns the item text if `line` is a `- ` or `* ` list item.
pub fn list_item_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

impl FormattingRule {
    /// Classifies a raw content line. Markers are detected on the left-trimmed line;
    /// indentation only matters for detail lines.
    pub fn classify<'a>(&self, raw: &'a str) -> LineKind<'a> {
        let line = raw.trim_start();

        if let Some(item) = list_item_text(line) {
            return LineKind::Bullet(item);
        }
        if self.is_sub_heading(line) {
            return LineKind::SubHeading(line);
        }
        if self.detail_indent_mm.is_some() && (raw.starts_with("  ") || raw.starts_with('\t')) {
            return LineKind::Detail(line.trim_end());
        }
        LineKind::Paragraph(line.trim_end())
    }

    fn is_sub_heading(&self, line: &str) -> bool {
        match self.sub_heading {
            SubHeadingRule::None => false,
            SubHeadingRule::BoldPrefix => line.starts_with("**"),
            SubHeadingRule::BoldPrefixWithDelimiter => {
                line.starts_with("**") && (line.contains('|') || line.contains('('))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(category: SectionCategory, line: &str) -> LineKind<'_> {
        rule_for(category).classify(line)
    }

    #[test]
    fn test_experience_sub_heading_needs_delimiter() {
        assert_eq!(
            classify(SectionCategory::Experience, "**Acme | Engineer | 2020**"),
            LineKind::SubHeading("**Acme | Engineer | 2020**")
        );
        assert_eq!(
            classify(SectionCategory::Experience, "**Acme** (2019-2020)"),
            LineKind::SubHeading("**Acme** (2019-2020)")
        );
        assert_eq!(
            classify(SectionCategory::Experience, "**Acme Corp**"),
            LineKind::Paragraph("**Acme Corp**")
        );
    }

    #[test]
    fn test_experience_bullets_with_either_marker() {
        assert_eq!(
            classify(SectionCategory::Experience, "- Led migration"),
            LineKind::Bullet("Led migration")
        );
        assert_eq!(
            classify(SectionCategory::Experience, "* Led migration"),
            LineKind::Bullet("Led migration")
        );
    }

    #[test]
    fn test_projects_bold_prefix_is_sub_heading() {
        assert_eq!(
            classify(SectionCategory::Projects, "**ripgrep clone** - fast search"),
            LineKind::SubHeading("**ripgrep clone** - fast search")
        );
    }

    #[test]
    fn test_education_bold_list_item_is_bullet() {
        assert_eq!(
            classify(SectionCategory::Education, "- **BSc CS**, MIT"),
            LineKind::Bullet("**BSc CS**, MIT")
        );
    }

    #[test]
    fn test_education_indented_line_is_detail() {
        assert_eq!(
            classify(SectionCategory::Education, "  GPA 3.9"),
            LineKind::Detail("GPA 3.9")
        );
        assert_eq!(
            classify(SectionCategory::Education, "MIT, 2015"),
            LineKind::Paragraph("MIT, 2015")
        );
    }

    #[test]
    fn test_indented_line_outside_education_is_paragraph() {
        assert_eq!(
            classify(SectionCategory::Skills, "  Rust, Go"),
            LineKind::Paragraph("Rust, Go")
        );
    }

    #[test]
    fn test_skills_and_certifications_have_no_sub_headings() {
        assert_eq!(
            classify(SectionCategory::Skills, "**Languages:** Rust"),
            LineKind::Paragraph("**Languages:** Rust")
        );
        assert_eq!(
            classify(SectionCategory::Certifications, "- AWS SA Pro"),
            LineKind::Bullet("AWS SA Pro")
        );
    }

    #[test]
    fn test_unknown_section_bullets_and_sub_headings() {
        let category = SectionCategory::from_heading("VOLUNTEERING");
        assert_eq!(
            classify(category, "- Mentored students"),
            LineKind::Bullet("Mentored students")
        );
        assert_eq!(
            classify(category, "**Code Club**"),
            LineKind::SubHeading("**Code Club**")
        );
        assert_eq!(
            classify(category, "Weekly sessions"),
            LineKind::Paragraph("Weekly sessions")
        );
    }

    #[test]
    fn test_bare_dash_is_paragraph() {
        assert_eq!(classify(SectionCategory::Other, "-"), LineKind::Paragraph("-"));
    }
}
