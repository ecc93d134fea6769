//! Minimal error set for core-domain parsing and parameter validation.

use core::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    InvalidId,
    InvalidGrade,
    InvalidLevel,
    EmptyTitle,
    DomainOutOfRange(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidId => write!(f, "invalid node id"),
            CoreError::InvalidGrade => write!(f, "invalid grade (expected G1..G7)"),
            CoreError::InvalidLevel => write!(f, "level not allowed for grade"),
            CoreError::EmptyTitle => write!(f, "title must not be blank"),
            CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
