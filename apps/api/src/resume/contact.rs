//! Contact-line tokenization.

use lazy_static::lazy_static;
use regex::Regex;

use crate::resume::inline::clean_markdown;

/// Separator drawn between contact tokens.
pub const CONTACT_SEPARATOR: &str = " | ";

lazy_static! {
    static ref LEADING_LINK: Regex = Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)").unwrap();
}

/// One `|`-delimited piece of the contact line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactToken {
    Plain { text: String },
    Email { text: String, url: String },
    Link { text: String, url: String },
}

impl ContactToken {
    pub fn text(&self) -> &str {
        match self {
            ContactToken::Plain { text }
            | ContactToken::Email { text, .. }
            | ContactToken::Link { text, .. } => text,
        }
    }

    /// Link target, if the token is clickable.
    pub fn url(&self) -> Option<&str> {
        match self {
            ContactToken::Plain { .. } => None,
            ContactToken::Email { url, .. } | ContactToken::Link { url, .. } => Some(url.as_str()),
        }
    }
}

/// Classifies a single trimmed contact piece.
///
/// A leading `[text](url)` is a link; anything containing both `@` and `.` is an email;
/// the rest is plain text with inline markup removed.
pub fn classify_token(part: &str) -> ContactToken {
    if let Some(caps) = LEADING_LINK.captures(part) {
        return ContactToken::Link {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        };
    }
    if part.contains('@') && part.contains('.') {
        return ContactToken::Email {
            text: part.to_string(),
            url: format!("mailto:{part}"),
        };
    }
    ContactToken::Plain {
        text: clean_markdown(part),
    }
}

/// Splits a contact line on `|` and classifies each piece, in order.
pub fn tokenize_contact(contact: &str) -> Vec<ContactToken> {
    contact
        .split('|')
        .map(|part| classify_token(part.trim()))
        .collect()
}
