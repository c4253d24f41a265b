//! Structured resume model produced by the parser and consumed by the renderer.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Section categories
// ────────────────────────────────────────────────────────────────────────────

/// The known resume section categories. Anything unrecognized is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionCategory {
    Experience,
    Projects,
    Education,
    Skills,
    Certifications,
    Other,
}

impl SectionCategory {
    /// Classifies a section heading. Comparison is case-insensitive on the trimmed heading.
    pub fn from_heading(heading: &str) -> Self {
        match heading.trim().to_uppercase().as_str() {
            "EXPERIENCE" => SectionCategory::Experience,
            "PROJECTS" => SectionCategory::Projects,
            "EDUCATION" => SectionCategory::Education,
            "SKILLS" => SectionCategory::Skills,
            "CERTIFICATIONS" => SectionCategory::Certifications,
            _ => SectionCategory::Other,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

/// A `##`-level section: its declared heading plus the raw content lines under it.
///
/// Content lines keep their inline markdown (bold, italics, links); markers are
/// stripped only when the line is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: Vec<String>,
}

impl Section {
    pub fn category(&self) -> SectionCategory {
        SectionCategory::from_heading(&self.heading)
    }
}

/// The parsed representation of a markdown resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResume {
    pub name: Option<String>,
    /// `|`-delimited contact line, kept raw. See `resume::contact` for tokenization.
    pub contact: Option<String>,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl StructuredResume {
    /// Serializes the document back into markdown.
    ///
    /// Parsing the output yields the same sections in the same order, with the same
    /// content lines. Blank lines and `---` rules are not reproduced.
    pub fn to_markdown(&self) -> String {
        let mut out: Vec<String> = Vec::new();

        if let Some(name) = &self.name {
            out.push(format!("# {name}"));
        }
        if let Some(contact) = &self.contact {
            out.push(contact.clone());
        }

        for section in &self.sections {
            out.push(String::new());
            out.push(format!("## {}", section.heading));
            out.extend(section.content.iter().cloned());
        }

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matching_is_case_insensitive() {
        assert_eq!(
            SectionCategory::from_heading("Experience"),
            SectionCategory::Experience
        );
        assert_eq!(
            SectionCategory::from_heading("skills"),
            SectionCategory::Skills
        );
        assert_eq!(
            SectionCategory::from_heading("  CERTIFICATIONS "),
            SectionCategory::Certifications
        );
    }

    #[test]
    fn test_unknown_heading_is_other() {
        assert_eq!(
            SectionCategory::from_heading("VOLUNTEERING"),
            SectionCategory::Other
        );
        assert_eq!(
            SectionCategory::from_heading("Professional Summary"),
            SectionCategory::Other
        );
    }

    #[test]
    fn test_to_markdown_emits_headings_and_content_in_order() {
        let doc = StructuredResume {
            name: Some("Jane Doe".to_string()),
            contact: Some("jane@example.com".to_string()),
            sections: vec![
                Section {
                    heading: "SKILLS".to_string(),
                    content: vec!["- Rust".to_string()],
                },
                Section {
                    heading: "EDUCATION".to_string(),
                    content: vec!["**MIT** (2015)".to_string()],
                },
            ],
        };

        let md = doc.to_markdown();
        let skills = md.find("## SKILLS").unwrap();
        let education = md.find("## EDUCATION").unwrap();
        assert!(md.starts_with("# Jane Doe\njane@example.com"));
        assert!(skills < education);
        assert!(md.contains("## SKILLS\n- Rust"));
    }

    #[test]
    fn test_empty_document_serializes_to_empty_string() {
        assert_eq!(StructuredResume::default().to_markdown(), "");
    }
}
