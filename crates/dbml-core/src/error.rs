use std::fmt;

/// Errors raised when keyword text does not name a known model variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    /// Relationship token was not one of `>`, `<`, `-`, `<>`.
    UnknownRelation(String),
    /// Referential action was not cascade, restrict, set null, set default or no action.
    UnknownReferentialAction(String),
    /// Sort direction was not `asc` or `desc`.
    UnknownSortOrder(String),
    /// Identity generation mode was not `always` or `by default`.
    UnknownIdentityGeneration(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRelation(s) => {
                write!(
                    f,
                    "unknown relationship '{s}': expected one of '>', '<', '-', '<>'"
                )
            }
            Self::UnknownReferentialAction(s) => {
                write!(
                    f,
                    "unknown referential action '{s}': expected cascade, restrict, set null, set default or no action"
                )
            }
            Self::UnknownSortOrder(s) => {
                write!(f, "unknown sort order '{s}': expected asc or desc")
            }
            Self::UnknownIdentityGeneration(s) => {
                write!(
                    f,
                    "unknown identity generation '{s}': expected always or by default"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}
