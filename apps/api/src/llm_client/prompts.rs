// Prompt templates for resume optimization.
// The writing-rules asset is read once at startup and spliced into the system prompt.

use std::path::Path;

use tracing::{info, warn};

const RULES_PLACEHOLDER: &str = "{rules}";

/// System prompt for every provider. `{rules}` is replaced with the writing rules.
pub const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) Resume Optimizer. Your task is to tailor a candidate's resume for a specific job description.

## Your Process:

1. **Analyze the Job Description:**
   - Extract must-have keywords (mentioned 3+ times or in requirements)
   - Extract should-have keywords (mentioned 1-2 times or preferred)
   - Identify the primary role focus and responsibilities

2. **Tailor the Resume:**
   - Rewrite the Professional Summary to match the role positioning
   - Reorder experience bullets to prioritize JD-relevant achievements
   - Integrate keywords naturally (no keyword stuffing)
   - Use the STAR method: Situation, Task, Action, Result
   - Ensure all achievements are quantified where possible

3. **Apply Writing Rules:**
   - Follow all banned words and phrases listed below
   - Vary sentence lengths (short-long-short pattern)
   - Be specific with numbers, not vague praise
   - Pass the "coffee test" - would you say this to a colleague?

## Writing Rules:
{rules}

## Output Format:
Return the optimized resume in clean markdown format with:
- Name and contact info at top
- Clear section headers (PROFESSIONAL SUMMARY, EXPERIENCE, PROJECTS, EDUCATION, SKILLS, CERTIFICATIONS)
- Bullet points for achievements
- Bold for company names and role titles

After the resume, provide a brief "Changes Summary" section explaining:
- Key changes made
- Keywords integrated
- ATS keyword coverage estimate
"#;

/// Reads the writing-rules asset. A missing or unreadable file yields empty rules.
pub fn load_rules(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(rules) => {
            info!(path = %path.display(), bytes = rules.len(), "Loaded writing rules");
            rules
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Writing rules not loaded, continuing without them");
            String::new()
        }
    }
}

pub fn build_system_prompt(rules: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE.replacen(RULES_PLACEHOLDER, rules, 1)
}

pub fn build_user_prompt(resume: &str, job_description: &str) -> String {
    format!(
        "Please optimize this resume for the following job description.\n\n\
         ## Current Resume:\n{resume}\n\n\
         ## Job Description:\n{job_description}\n\n\
         Please return the optimized resume in markdown format, followed by a changes summary."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_system_prompt_splices_rules() {
        let prompt = build_system_prompt("- Never say \"synergy\"");
        assert!(prompt.contains("## Writing Rules:\n- Never say \"synergy\"\n"));
        assert!(!prompt.contains(RULES_PLACEHOLDER));
        assert!(prompt.contains("\"Changes Summary\""));
    }

    #[test]
    fn test_system_prompt_with_empty_rules() {
        let prompt = build_system_prompt("");
        assert!(prompt.contains("## Writing Rules:\n\n\n## Output Format:"));
    }

    #[test]
    fn test_user_prompt_layout() {
        let prompt = build_user_prompt("# Jane", "Senior Rust Engineer");
        assert!(prompt.starts_with("Please optimize this resume"));
        assert!(prompt.contains("## Current Resume:\n# Jane\n\n## Job Description:\nSenior Rust Engineer\n\n"));
        assert!(prompt.ends_with("followed by a changes summary."));
    }

    #[test]
    fn test_load_rules_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "- Avoid passive voice").unwrap();
        assert_eq!(load_rules(file.path()), "- Avoid passive voice");
    }

    #[test]
    fn test_load_rules_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_rules(dir.path().join("rules.md")), "");
    }
}
