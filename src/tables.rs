//! Fixed symbol tables for structcode interpretation
//!
//! Three process-wide, immutable mappings translate the one- or two-character
//! symbols of a structcode into normalized element tags:
//!
//!   - byte-order symbols (`@ | = < > ^ !`) into one of `= | < >`
//!   - type codes into *native* tags, whose widths are platform-dependent
//!   - type codes into *standard* tags, with fixed widths (e.g. `i` -> `i4`)
//!
//! The tables are built once, on first access, and are never mutated
//! afterwards, so lookups need no synchronization.
//!
//! # Fallback
//!
//! [`native_get`] falls back to the standard table and [`standard_get`] falls
//! back to the native table; [`byteorder_get`] has no fallback. Only when the
//! fallback misses as well is a [`SymbolError`] returned.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::{SymbolError, Table};

lazy_static! {
    static ref BYTEORDER: HashMap<&'static str, &'static str> = [
        ("@", "="),
        ("|", "|"),
        ("=", "="),
        ("<", "<"),
        (">", ">"),
        ("^", "="),
        ("!", ">"),
    ]
    .into_iter()
    .collect();

    static ref NATIVE: HashMap<&'static str, &'static str> = [
        ("?", "?"),
        ("b", "b"),
        ("B", "B"),
        ("h", "h"),
        ("H", "H"),
        ("i", "i"),
        ("I", "I"),
        ("l", "l"),
        ("L", "L"),
        ("q", "q"),
        ("Q", "Q"),
        ("e", "e"),
        ("f", "f"),
        ("d", "d"),
        ("g", "g"),
        ("Zf", "F"),
        ("Zd", "D"),
        ("Zg", "G"),
        ("s", "S"),
        ("w", "U"),
        ("O", "O"),
        ("x", "V"), // padding
    ]
    .into_iter()
    .collect();

    static ref STANDARD: HashMap<&'static str, &'static str> = [
        ("?", "?"),
        ("b", "b"),
        ("B", "B"),
        ("h", "i2"),
        ("H", "u2"),
        ("i", "i4"),
        ("I", "u4"),
        ("l", "i4"),
        ("L", "u4"),
        ("q", "i8"),
        ("Q", "u8"),
        ("e", "f2"),
        ("f", "f"),
        ("d", "d"),
        ("Zf", "F"),
        ("Zd", "D"),
        ("s", "S"),
        ("w", "U"),
        ("O", "O"),
        ("x", "V"), // padding
    ]
    .into_iter()
    .collect();
}

/// Returns `true` if `c` is one of the seven byte-order symbols.
#[inline]
#[must_use]
pub fn is_byteorder_symbol(c: char) -> bool {
    matches!(c, '@' | '|' | '=' | '<' | '>' | '^' | '!')
}

/// Resolves a byte-order symbol into its normalized order.
///
/// # Examples
///
/// ```
/// # use structcode::tables::byteorder_get;
/// assert_eq!(byteorder_get("!").unwrap(), ">");
/// assert!(byteorder_get("~").is_err());
/// ```
pub fn byteorder_get(symbol: &str) -> Result<&'static str, SymbolError> {
    BYTEORDER.get(symbol).copied().ok_or_else(|| SymbolError {
        table: Table::ByteOrder,
        symbol: symbol.to_owned(),
    })
}

/// Resolves a type code via the native table, falling back to the standard
/// table.
pub fn native_get(code: &str) -> Result<&'static str, SymbolError> {
    lookup_with_fallback(code, Table::Native)
}

/// Resolves a type code via the standard table, falling back to the native
/// table.
pub fn standard_get(code: &str) -> Result<&'static str, SymbolError> {
    lookup_with_fallback(code, Table::Standard)
}

/// Resolves `code` starting from the table `table`.
///
/// Dispatches to [`byteorder_get`], [`native_get`] or [`standard_get`].
pub fn get(table: Table, code: &str) -> Result<&'static str, SymbolError> {
    match table {
        Table::ByteOrder => byteorder_get(code),
        Table::Native | Table::Standard => lookup_with_fallback(code, table),
    }
}

fn lookup_with_fallback(code: &str, table: Table) -> Result<&'static str, SymbolError> {
    let (primary, fallback, fallback_table) = match table {
        Table::Standard => (&*STANDARD, &*NATIVE, Table::Native),
        _ => (&*NATIVE, &*STANDARD, Table::Standard),
    };
    if let Some(tag) = primary.get(code) {
        return Ok(*tag);
    }
    log::debug!(
        "structcode symbol `{}` not in {} table, trying {} table",
        code,
        table,
        fallback_table
    );
    fallback.get(code).copied().ok_or_else(|| SymbolError {
        table,
        symbol: code.to_owned(),
    })
}

/// Returns `true` if `tag` denotes a flexible-width kind (bytes `S`,
/// unicode `U` or void `V`), whose repeat count is a width suffix rather
/// than an element count.
#[inline]
#[must_use]
pub fn is_flexible(tag: &str) -> bool {
    matches!(tag.as_bytes().last(), Some(b'S' | b'U' | b'V'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byteorder_table() {
        for (sym, order) in [
            ("@", "="),
            ("|", "|"),
            ("=", "="),
            ("<", "<"),
            (">", ">"),
            ("^", "="),
            ("!", ">"),
        ] {
            assert_eq!(byteorder_get(sym), Ok(order));
            assert!(is_byteorder_symbol(sym.chars().next().unwrap()));
        }
        let err = byteorder_get("i").unwrap_err();
        assert_eq!(err.table, Table::ByteOrder);
        assert_eq!(err.symbol, "i");
    }

    #[test]
    fn standard_widths() {
        assert_eq!(standard_get("h"), Ok("i2"));
        assert_eq!(standard_get("H"), Ok("u2"));
        assert_eq!(standard_get("i"), Ok("i4"));
        assert_eq!(standard_get("L"), Ok("u4"));
        assert_eq!(standard_get("Q"), Ok("u8"));
        assert_eq!(standard_get("e"), Ok("f2"));
        assert_eq!(native_get("h"), Ok("h"));
        assert_eq!(native_get("i"), Ok("i"));
    }

    #[test]
    fn fallback_chain() {
        // only the native table knows long doubles
        assert_eq!(standard_get("g"), Ok("g"));
        assert_eq!(standard_get("Zg"), Ok("G"));
        assert_eq!(get(Table::Standard, "Zd"), Ok("D"));

        let err = native_get("y").unwrap_err();
        assert_eq!(err.table, Table::Native);
        let err = standard_get("Zq").unwrap_err();
        assert_eq!(err.table, Table::Standard);
        assert_eq!(err.symbol, "Zq");
    }

    #[test]
    fn flexible_kinds() {
        assert!(is_flexible("S"));
        assert!(is_flexible("U"));
        assert!(is_flexible("V"));
        assert!(!is_flexible("i4"));
        assert!(!is_flexible(""));
    }
}
