//! Error taxonomy for the reader, compiler, and interpreter.
//!
//! A plain enum of error *kinds* deriving `strum::Display`/`EnumString`/
//! `IntoStaticStr` so the kind's name is both the `Display` text and a
//! stable identifier, wrapped in a struct that carries optional context (the
//! symbol name, the expected type, an arity mismatch) for one line of
//! diagnostic text.

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

/// A kind of error any pipeline stage can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    // Reader errors
    BadString,
    EmptyAtom,
    EmptyKey,
    EmptySymbol,
    TooManyQuotes,
    UnexpectedCloseParen,

    // Compile errors
    BadArg,
    BadDefine,
    BadFunction,
    BadIf,
    BadWhen,
    ExpectedIdentifier,
    UnexpectedEmptyExpression,

    // Runtime errors
    ExpectedFunction,
    SymbolNotFound,
    StackOverflow,
    StackFrameUnderflow,
    WrongArity,
    WrongType,
    ObjectNotFound,
    ValueAlreadyDefined,
}

/// An error produced by the reader, macro expander, compiler, or interpreter.
///
/// `kind` identifies what went wrong; `context` is an optional human-readable
/// detail (a symbol name, an expected type name, an arity) used both by
/// `Display` and by the `options.log` diagnostic lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: Option<String>,
}

impl Error {
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, context: None }
    }

    #[must_use]
    pub fn with_context(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: Some(context.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{}: {ctx}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience macro for constructing a contextless [`Error`] from a bare
/// [`ErrorKind`] variant, used throughout the reader/compiler to keep call
/// sites terse.
macro_rules! err {
    ($kind:ident) => {
        $crate::error::Error::new($crate::error::ErrorKind::$kind)
    };
    ($kind:ident, $ctx:expr) => {
        $crate::error::Error::with_context($crate::error::ErrorKind::$kind, $ctx)
    };
}
pub(crate) use err;

pub type Result<T> = std::result::Result<T, Error>;
