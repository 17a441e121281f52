//! Search box and newsletter form handling.
//!
//! Neither form does real work: search only acknowledges the query and the
//! newsletter only validates the address.

use super::model::Notice;

/// The query as it is searched for: trimmed and lower-cased.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Build the acknowledgement for a submitted search, or `None` when the
/// trimmed query is empty.
pub fn search_notice(raw: &str) -> Option<Notice> {
    let query = normalize_query(raw);
    if query.is_empty() {
        return None;
    }
    Some(Notice::info(format!(
        "Searching \"{query}\"... Search is still under development."
    )))
}

/// Outcome of submitting the newsletter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscription {
    Accepted(Notice),
    Rejected(Notice),
}

pub fn subscribe(raw: &str) -> Subscription {
    let email = raw.trim();
    if email.is_empty() {
        return Subscription::Rejected(Notice::warning("Please enter your email address."));
    }
    if !is_valid_email(email) {
        return Subscription::Rejected(Notice::warning("Please enter a valid email address."));
    }
    Subscription::Accepted(Notice::info(format!(
        "Thanks for subscribing to our newsletter with: {email}"
    )))
}

/// Loose address check: `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
