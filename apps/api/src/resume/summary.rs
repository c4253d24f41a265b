//! Excises the trailing "Changes Summary" block that the optimizer prompt asks the model
//! to append after the resume.

/// Markers that introduce the changes summary. The earliest occurrence wins.
pub const CHANGES_SUMMARY_MARKERS: [&str; 6] = [
    "## Changes Summary",
    "## Change Summary",
    "---\n## Changes",
    "---\n\n## Changes",
    "# Changes Summary",
    "**Changes Summary**",
];

/// Returns the byte offset of the earliest changes-summary marker, if any.
fn find_summary_start(markdown: &str) -> Option<usize> {
    CHANGES_SUMMARY_MARKERS
        .iter()
        .filter_map(|marker| markdown.find(marker))
        .min()
}

/// Returns the resume text with any trailing changes summary removed.
///
/// With a marker present the result is the trimmed text before it; otherwise the input
/// is returned unchanged. Applying this twice gives the same result as applying it once.
pub fn strip_changes_summary(markdown: &str) -> String {
    split_changes_summary(markdown).0
}

/// Splits LLM output into `(resume, changes_summary)`.
///
/// The summary is the trimmed text from the marker onwards, or `None` when no marker
/// is present.
pub fn split_changes_summary(markdown: &str) -> (String, Option<String>) {
    match find_summary_start(markdown) {
        Some(start) => {
            let (resume, summary) = markdown.split_at(start);
            (resume.trim().to_string(), Some(summary.trim().to_string()))
        }
        None => (markdown.to_string(), None),
    }
}
