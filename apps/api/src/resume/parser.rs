//! Markdown resume parser: reconstructs a `StructuredResume` from LLM-generated markdown.
//!
//! The input has no reliable grammar, so lines are classified by position and marker
//! prefix in a single forward pass:
//!
//! - `Start`: before the first `## ` heading
//! - `InSection`: a `## ` heading is open and collects content lines
//!
//! Name detection runs on every line until a name is found, whatever the state.
//! The next non-blank line after the name may be the contact line, also in any state;
//! a contact line found inside a section does not close it.
//! Content outside any `## ` section is dropped.
//!
//! Parsing never fails: any string, including the empty string, yields a (possibly
//! empty) document.

use crate::resume::model::{Section, StructuredResume};

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Parses markdown into a `StructuredResume`.
///
/// Callers handling raw LLM output should run `strip_changes_summary` first.
pub fn parse_resume(markdown: &str) -> StructuredResume {
    let mut parser = ResumeParser::default();
    for line in markdown.lines() {
        parser.feed(line);
    }
    parser.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
enum ParseState {
    #[default]
    Start,
    InSection(Section),
}

#[derive(Debug, Default)]
struct ResumeParser {
    doc: StructuredResume,
    state: ParseState,
    seen_first_line: bool,
    pending_contact: bool,
}

impl ResumeParser {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        let is_first_line = !self.seen_first_line;
        self.seen_first_line = true;

        if self.doc.name.is_none() {
            if let Some(candidate) = detect_name(line, is_first_line) {
                let name = strip_bold(candidate);
                // An all-marker line such as `****` is consumed but leaves the name unset.
                if !name.is_empty() {
                    self.doc.name = Some(name);
                    self.pending_contact = true;
                }
                return;
            }
        }

        if std::mem::take(&mut self.pending_contact)
            && self.doc.contact.is_none()
            && is_contact_line(line)
        {
            self.doc.contact = Some(line.to_string());
            return;
        }

        if let Some(heading) = line.strip_prefix("## ") {
            self.open_section(heading.trim());
            return;
        }

        if line == "---" {
            return;
        }

        if let ParseState::InSection(section) = &mut self.state {
            // Leading indentation is kept: EDUCATION renders indented lines deeper.
            section.content.push(raw.trim_end().to_string());
        }
    }

    fn open_section(&mut self, heading: &str) {
        self.close_section();
        self.state = ParseState::InSection(Section {
            heading: heading.to_string(),
            content: Vec::new(),
        });
    }

    fn close_section(&mut self) {
        if let ParseState::InSection(section) = std::mem::take(&mut self.state) {
            if !section.heading.is_empty() {
                self.doc.sections.push(section);
            }
        }
    }

    fn finish(mut self) -> StructuredResume {
        self.close_section();
        self.doc
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line classifiers
// ────────────────────────────────────────────────────────────────────────────

/// Returns the raw name text if `line` looks like the candidate's name.
fn detect_name(line: &str, is_first_line: bool) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("# ") {
        return Some(rest);
    }
    if line.starts_with("**") && line.ends_with("**") && !line.starts_with("## ") {
        return Some(line);
    }
    if is_first_line
        && !line.starts_with('#')
        && !line.starts_with('-')
        && !line.starts_with("* ")
        && !line.contains('@')
    {
        return Some(line);
    }
    None
}

fn is_contact_line(line: &str) -> bool {
    if line.starts_with('#') || line.starts_with('-') || line.starts_with("* ") {
        return false;
    }
    line.contains('@') || line.contains('|') || line.to_lowercase().contains("linkedin")
}

/// Strips surrounding bold markers and whitespace.
fn strip_bold(text: &str) -> String {
    text.trim().trim_matches('*').trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
