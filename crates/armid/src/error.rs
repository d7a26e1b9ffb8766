//! error taxonomy
//!
//! The engine returns errors as values and never logs. Phrasing a failure for the end
//! user is left to [IdError] (hard failure before a remote call) and [Diagnostic]
//! (configuration-time validator message).

/// Failure of the strict, schema-driven parser
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("ID was empty")]
    EmptyInput,
    #[error("ID is malformed: {reason}")]
    Malformed { reason: &'static str },
    #[error("expected the segment `{expected}` but found `{found}`")]
    UnexpectedSegment { expected: String, found: String },
    #[error("the segment `{label}` has no value")]
    EmptySegmentValue { label: String },
    #[error("expected {expected} segments but found {found}")]
    SegmentCountMismatch { expected: usize, found: usize },
}

/// Failure of the sequential "pop the next named segment" extractor
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("ID was empty")]
    EmptyInput,
    #[error("ID was missing the `{literal}` element")]
    NotFound { literal: String },
    #[error("the `{literal}` element has no value")]
    DanglingLiteral { literal: String },
    #[error("ID contained an empty segment")]
    EmptySegment,
    #[error("ID contained more segments than required: {remaining}")]
    Unconsumed { remaining: String },
}

/// Any failure to take an identifier apart, whichever strategy was used
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// A parse failure with the context needed to show it to a user
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("parsing `{field}` as a {kind} ID {input:?}")]
pub struct IdError {
    pub field: String,
    pub kind: &'static str,
    pub input: String,
    #[source]
    pub source: Error,
}

/// Validator output for a single configuration attribute
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, derive_new::new)]
#[error("`{attribute}` is not a valid ID: {message}, expected {expected}")]
pub struct Diagnostic {
    pub attribute: String,
    pub message: String,
    /// shape of the identifier kind, e.g. `/subscriptions/{subscriptionId}/...`
    pub expected: String,
}
