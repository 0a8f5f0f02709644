use std::sync::LazyLock;

use regex::Regex;

/// Syntactic email check used to gate registration.
///
/// Kept behind a trait so deployments can swap in a stricter policy.
pub trait EmailValidator: Send + Sync {
    fn is_valid(&self, candidate: &str) -> bool;
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Accepts `local@domain.tld` shapes: one `@`, no whitespace, a dot in the
/// domain part.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEmailValidator;

impl RegexEmailValidator {
    pub fn new() -> Self {
        Self
    }
}

impl EmailValidator for RegexEmailValidator {
    fn is_valid(&self, candidate: &str) -> bool {
        EMAIL_PATTERN.is_match(candidate.trim())
    }
}
