use std::fmt;

/// Coarse classification of a failure, used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown email at lookup, unknown token at confirmation.
    NotFound,
    /// Email already registered.
    Conflict,
    /// Malformed input such as an invalid email.
    Validation,
    /// Token already confirmed or expired.
    IllegalState,
    /// Credentials rejected at login.
    Authentication,
    /// Store, hasher or other infrastructure failure.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation",
            ErrorKind::IllegalState => "illegal state",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}
