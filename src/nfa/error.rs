use alloc::string::String;

/// An error that can occur while building an NFA from a pattern.
///
/// Every error here is caused by bad input: a malformed pattern or an accept
/// token that cannot be used. Running out of arena space is not reported
/// through this type. That is a configuration mistake and panics instead.
///
/// Syntax errors carry the byte offset at which parsing stopped together with
/// the full pattern text. Both appear in the `Display` output, e.g.,
///
/// ```text
/// in regex at 2 in '(a': expected ) to match previous (
/// ```
///
/// Once a build has failed, the fragment it was assembling must not be used.
/// Nodes already allocated for it stay in the graph until the context is
/// dropped, but nothing links to them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    location: Option<Location>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Location {
    index: usize,
    pattern: String,
}

/// The kind of error that occurred.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The pattern ended where an operand (a literal or a group) was
    /// required, e.g., `""` or `"a|"`.
    ExpectedOperand,
    /// An operator (`|` or `*`) appeared where an operand was required,
    /// e.g., `"*a"`.
    UnexpectedOperator,
    /// A group was opened but never closed, e.g., `"(a"`.
    UnclosedGroup,
    /// A `)` appeared without a matching `(`, e.g., `"a)"` or `"()"`.
    UnopenedGroup,
    /// A byte with a value of 128 or more. Only ASCII is supported.
    NonAscii,
    /// A NUL byte. NUL is reserved for epsilon transitions.
    NulByte,
    /// Groups were nested more deeply than the configured limit.
    NestLimitExceeded {
        /// The configured limit.
        limit: u32,
    },
    /// The accept token given is reserved to mean "does not accept".
    InvalidAcceptToken {
        /// The rejected token.
        token: u32,
    },
}

impl Error {
    pub(crate) fn syntax(
        kind: ErrorKind,
        index: usize,
        pattern: &str,
    ) -> Error {
        let location = Location { index, pattern: pattern.into() };
        Error { kind, location: Some(location) }
    }

    pub(crate) fn invalid_accept_token(token: u32) -> Error {
        Error { kind: ErrorKind::InvalidAcceptToken { token }, location: None }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the byte offset into the pattern at which this error was
    /// detected, if it is a syntax error.
    pub fn index(&self) -> Option<usize> {
        self.location.as_ref().map(|loc| loc.index)
    }

    /// Returns the full text of the pattern that failed, if it is a syntax
    /// error.
    pub fn pattern(&self) -> Option<&str> {
        self.location.as_ref().map(|loc| loc.pattern.as_str())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            ErrorKind::ExpectedOperand => {
                write!(f, "expected more characters")
            }
            ErrorKind::UnexpectedOperator => {
                write!(f, "expected character instead of operator")
            }
            ErrorKind::UnclosedGroup => {
                write!(f, "expected ) to match previous (")
            }
            ErrorKind::UnopenedGroup => write!(f, "unexpected )"),
            ErrorKind::NonAscii => {
                write!(f, "ASCII value >= 128 not supported")
            }
            ErrorKind::NulByte => write!(f, "NUL byte not supported"),
            ErrorKind::NestLimitExceeded { limit } => write!(
                f,
                "group nesting exceeds the limit of {}",
                limit,
            ),
            ErrorKind::InvalidAcceptToken { token } => write!(
                f,
                "accept token {} is reserved and cannot be assigned",
                token,
            ),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.location {
            None => self.kind.fmt(f),
            Some(Location { index, ref pattern }) => write!(
                f,
                "in regex at {} in '{}': {}",
                index, pattern, self.kind,
            ),
        }
    }
}
