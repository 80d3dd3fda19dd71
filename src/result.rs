//! Error type shared by every distribution and sampler in the crate
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    /// One or more of the supplied parameters is invalid
    InvalidParameter,
    /// An observation has a different dimensionality than the distribution
    DimensionMismatch,
    /// A value lies outside the support of the distribution
    DomainError,
    /// Components, weights, and labels do not agree with one another
    InvalidConfiguration,
    /// A freshly drawn parameter is malformed. This is a bug.
    InternalInvariantViolation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::InvalidParameter => "invalid parameter",
            ErrorKind::DimensionMismatch => "dimension mismatch",
            ErrorKind::DomainError => "domain error",
            ErrorKind::InvalidConfiguration => "invalid configuration",
            ErrorKind::InternalInvariantViolation => {
                "internal invariant violation"
            }
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            msg: String::from(msg),
            kind,
        }
    }

    pub(crate) fn invalid_parameter(msg: impl Into<String>) -> Self {
        Error {
            msg: msg.into(),
            kind: ErrorKind::InvalidParameter,
        }
    }

    pub(crate) fn dimension_mismatch(expected: usize, found: usize) -> Self {
        Error {
            msg: format!("expected dimension {expected}, found {found}"),
            kind: ErrorKind::DimensionMismatch,
        }
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Error {
            msg: msg.into(),
            kind: ErrorKind::DomainError,
        }
    }

    pub(crate) fn invalid_configuration(msg: impl Into<String>) -> Self {
        Error {
            msg: msg.into(),
            kind: ErrorKind::InvalidConfiguration,
        }
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::error!("internal invariant violated: {msg}");
        Error {
            msg,
            kind: ErrorKind::InternalInvariantViolation,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        self.msg.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.msg)
    }
}

impl std::error::Error for Error {}
