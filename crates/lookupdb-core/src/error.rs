use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without a structured detail payload.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a lookup-origin error that carries its [`LookupError`] detail.
    pub(crate) fn lookup(err: LookupError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Lookup,
            message: err.to_string(),
            detail: Some(ErrorDetail::Lookup(err)),
        }
    }

    /// Construct an index-origin invariant violation.
    pub(crate) fn index_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Index,
            message.into(),
        )
    }

    /// Construct an index-origin corruption error.
    pub(crate) fn index_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Index, message.into())
    }

    /// Construct a driver-origin unsupported error.
    pub(crate) fn driver_unsupported(op: &'static str) -> Self {
        let err = LookupError::UnsupportedOperation { op };

        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Driver,
            message: err.to_string(),
            detail: Some(ErrorDetail::Lookup(err)),
        }
    }

    /// Construct a config-origin invariant violation.
    pub(crate) fn config_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Config,
            message.into(),
        )
    }

    /// Borrow the lookup detail, if this error carries one.
    #[must_use]
    pub const fn lookup_error(&self) -> Option<&LookupError> {
        match &self.detail {
            Some(ErrorDetail::Lookup(err)) => Some(err),
            _ => None,
        }
    }

    /// Borrow the store detail, if this error came from a key scanner.
    #[must_use]
    pub const fn store_error(&self) -> Option<&StoreError> {
        match &self.detail {
            Some(ErrorDetail::Store(err)) => Some(err),
            _ => None,
        }
    }

    /// `origin:class: message`, the form used in log lines.
    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Lookup(LookupError),
    #[error("{0}")]
    Store(StoreError),
}

///
/// LookupError
///
/// Failures surfaced by the lookup algebra and the index-lookup composite.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum LookupError {
    #[error("unknown lookup op '{name}'")]
    UnhandledVariant { name: String },

    #[error("lookup op '{kind}' takes {expected} key(s), found {found}")]
    KeyCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("index lookup on '{found}' cannot merge with a lookup on '{expected}'")]
    WrongIndex { expected: String, found: String },

    #[error("unsupported operation: {op}")]
    UnsupportedOperation { op: &'static str },

    #[error("lookup key has {found} values but index '{index}' declares {max} column(s)")]
    KeyArity {
        index: String,
        max: usize,
        found: usize,
    },

    #[error("tuple format mismatch: expected {expected}, found {found}")]
    FormatMismatch { expected: String, found: String },
}

impl LookupError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnhandledVariant { .. } | Self::KeyCount { .. } | Self::KeyArity { .. } => {
                ErrorClass::InvariantViolation
            }
            Self::WrongIndex { .. } | Self::FormatMismatch { .. } => ErrorClass::Internal,
            Self::UnsupportedOperation { .. } => ErrorClass::Unsupported,
        }
    }
}

impl From<LookupError> for InternalError {
    fn from(err: LookupError) -> Self {
        Self::lookup(err)
    }
}

///
/// StoreError
///
/// Failure raised by an external key scanner.
/// Passed through to the caller unchanged as [`ErrorDetail::Store`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("store io failure: {message}")]
    Io { message: String },

    #[error("store corruption: {message}")]
    Corrupt { message: String },
}

impl From<StoreError> for InternalError {
    fn from(err: StoreError) -> Self {
        let class = match err {
            StoreError::Io { .. } => ErrorClass::Internal,
            StoreError::Corrupt { .. } => ErrorClass::Corruption,
        };

        Self {
            class,
            origin: ErrorOrigin::Store,
            message: err.to_string(),
            detail: Some(ErrorDetail::Store(err)),
        }
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Corruption,
    Internal,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Lookup,
    Index,
    Store,
    Driver,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lookup => "lookup",
            Self::Index => "index",
            Self::Store => "store",
            Self::Driver => "driver",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
