//! Email address format validation.

use regex::Regex;
use std::sync::LazyLock;

/// Anchored format check: local part, domain, and a 2+ letter top-level
/// label. Matches the contract exactly; no case folding is applied.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// Whether the address passes format validation.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}
