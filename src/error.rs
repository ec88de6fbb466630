//! Error types reported while interpreting structcodes
//!
//! This module contains a hierarchy of types representing the specific
//! classes of problem that may arise when a structcode is parsed.
//!
//! # Layout
//!
//! This module defines the primary type [`StructcodeError`] and the alias
//! [`StructcodeResult<T>`]; it additionally defines various type-level
//! refinements of `StructcodeError`, grouped according to similar provenance.
//!
//! # Recovery
//!
//! With the sole exception of [`StructcodeError::Empty`], none of these errors
//! ever cross the parser boundary as an `Err`. The parser recovers from each of
//! them locally (placeholder tag, dropped modifier, or truncation) and records
//! the error as a *diagnostic* on the
//! [`ParseResult`](crate::parse::ParseResult) it returns. `Empty` is raised
//! only by the [`Dtype`](crate::dtype::Dtype) boundary, when a structcode
//! produced no fields at all.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// Identifies one of the three fixed lookup tables in [`crate::tables`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    ByteOrder,
    Native,
    Standard,
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Table::ByteOrder => f.write_str("byte-order"),
            Table::Native => f.write_str("native"),
            Table::Standard => f.write_str("standard"),
        }
    }
}

/// Lookup miss in a symbol table, after any fallback table has also
/// been consulted.
///
/// `table` is the table the lookup started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolError {
    pub table: Table,
    pub symbol: String,
}

impl Display for SymbolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.table {
            Table::ByteOrder => write!(f, "byte order symbol not found: `{}`", self.symbol),
            Table::Native => write!(
                f,
                "structcode symbol `{}` not found in native table (nor in standard fallback)",
                self.symbol
            ),
            Table::Standard => write!(
                f,
                "structcode symbol `{}` not found in standard table (nor in native fallback)",
                self.symbol
            ),
        }
    }
}

impl Error for SymbolError {}

/// Errors related to delimited groups: `{...}`, `(...)`, `*name*` and `:name:`
///
/// All offsets are byte offsets into the top-level structcode, pointing at the
/// opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// Opening bracket with no matching close; the parse was truncated here.
    Unbalanced { open: char, offset: usize },
    /// Explicit-name delimiter with no matching close; the rest of the input
    /// was taken as the name.
    UnterminatedName { delim: char, offset: usize },
    /// Nested `{...}` group beyond the configured depth limit; the group was
    /// skipped.
    TooDeep { limit: usize, offset: usize },
}

impl Display for GroupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            GroupError::Unbalanced { open, offset } => {
                write!(
                    f,
                    "unbalanced `{}` at offset {} (remainder of structcode dropped)",
                    open, offset
                )
            }
            GroupError::UnterminatedName { delim, offset } => {
                write!(
                    f,
                    "field name opened with `{}` at offset {} is never closed",
                    delim, offset
                )
            }
            GroupError::TooDeep { limit, offset } => {
                write!(
                    f,
                    "group at offset {} exceeds nesting limit of {} (group skipped)",
                    offset, limit
                )
            }
        }
    }
}

impl Error for GroupError {}

/// Errors arising from numeric literals embedded in a structcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    /// Shape group whose contents are not a comma-separated list of
    /// non-negative integers
    MalformedShape { text: String, offset: usize },
    /// Repeat count that does not fit in a `usize`
    MalformedCount { text: String, offset: usize },
}

impl Display for LiteralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            LiteralError::MalformedShape { text, offset } => {
                write!(f, "invalid shape `({})` at offset {}", text, offset)
            }
            LiteralError::MalformedCount { text, offset } => {
                write!(f, "repeat count `{}` at offset {} is out of range", text, offset)
            }
        }
    }
}

impl Error for LiteralError {}

/// Conflicts between modifiers or names within a single scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// Explicit field name already in use; a generated name was used instead.
    DuplicateName { name: String, replacement: String },
    /// Repeat count discarded because a shape was also pending.
    IgnoredRepeat { count: usize, offset: usize },
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ConflictError::DuplicateName { name, replacement } => {
                write!(
                    f,
                    "field name `{}` is already in use (renamed to `{}`)",
                    name, replacement
                )
            }
            ConflictError::IgnoredRepeat { count, offset } => {
                write!(
                    f,
                    "repeat count {} before shaped field at offset {} was ignored",
                    count, offset
                )
            }
        }
    }
}

impl Error for ConflictError {}

/// Enumeration type over all errors that may be encountered when
/// interpreting a structcode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StructcodeError {
    /// Unknown byte-order symbol or type code
    Symbol(SymbolError),
    /// Malformed, unbalanced, or overly deep delimited group
    Group(GroupError),
    /// Unparseable shape or repeat count
    Literal(LiteralError),
    /// Duplicate names or conflicting modifiers
    Conflict(ConflictError),
    /// The structcode produced no fields at all.
    ///
    /// Only ever returned by the [`Dtype`](crate::dtype::Dtype) boundary.
    Empty { code: String },
}

impl StructcodeError {
    /// Returns `true` if the parser recovers from this error on its own,
    /// i.e. for every kind except [`StructcodeError::Empty`].
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StructcodeError::Empty { .. })
    }
}

impl Display for StructcodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            StructcodeError::Symbol(err) => Display::fmt(err, f),
            StructcodeError::Group(err) => Display::fmt(err, f),
            StructcodeError::Literal(err) => Display::fmt(err, f),
            StructcodeError::Conflict(err) => Display::fmt(err, f),
            StructcodeError::Empty { code } => {
                write!(f, "structcode `{:.200}` parsed to zero-length", code)
            }
        }
    }
}

impl Error for StructcodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StructcodeError::Symbol(err) => Some(err),
            StructcodeError::Group(err) => Some(err),
            StructcodeError::Literal(err) => Some(err),
            StructcodeError::Conflict(err) => Some(err),
            StructcodeError::Empty { .. } => None,
        }
    }
}

impl From<SymbolError> for StructcodeError {
    fn from(err: SymbolError) -> Self {
        Self::Symbol(err)
    }
}

impl From<GroupError> for StructcodeError {
    fn from(err: GroupError) -> Self {
        Self::Group(err)
    }
}

impl From<LiteralError> for StructcodeError {
    fn from(err: LiteralError) -> Self {
        Self::Literal(err)
    }
}

impl From<ConflictError> for StructcodeError {
    fn from(err: ConflictError) -> Self {
        Self::Conflict(err)
    }
}

/// Type alias for Result with an error type of [`StructcodeError`]
pub type StructcodeResult<T> = std::result::Result<T, StructcodeError>;

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn structcode_error_threadsafe() {
        dummy::<StructcodeError>()
    }

    #[test]
    fn empty_is_the_only_unrecoverable_kind() {
        let empty = StructcodeError::Empty { code: String::from("   ") };
        assert!(!empty.is_recoverable());
        assert!(empty.source().is_none());

        let unbalanced: StructcodeError = GroupError::Unbalanced { open: '{', offset: 0 }.into();
        assert!(unbalanced.is_recoverable());
        assert!(unbalanced.source().is_some());
    }

    #[test]
    fn display_messages() {
        let err: StructcodeError = SymbolError {
            table: Table::Native,
            symbol: String::from("y"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "structcode symbol `y` not found in native table (nor in standard fallback)"
        );
        assert_eq!(
            StructcodeError::Empty { code: String::from("") }.to_string(),
            "structcode `` parsed to zero-length"
        );
    }
}
