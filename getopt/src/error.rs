//! Error type shared by registration and parsing.

/// Errors surfaced by the parser.
///
/// The first two variants are configuration errors, returned from the
/// `add_*` registration methods before any parse runs. The rest are
/// parse-time errors: they are recorded in the parse session, rendered
/// together with the help screen, and returned from `parse`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("option --{0} is already registered")]
    DuplicateLong(String),

    #[error("short option -{0} is already registered")]
    DuplicateShort(char),

    #[error("unknown option '{0}'")]
    Unknown(String),

    #[error("missing value for option --{0}")]
    MissingValue(String),

    #[error("option -{0} takes a value and cannot be grouped")]
    NotGroupable(char),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("empty argument vector")]
    EmptyArgv,

    /// A user callback rejected its input. Callbacks may return any
    /// `Error`; this variant carries a caller-supplied message.
    #[error("{0}")]
    Callback(String),
}

pub type Result<T> = std::result::Result<T, Error>;
