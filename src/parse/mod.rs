//! Recursive-descent structcode parser
//!
//! This module contains the parser proper. A structcode is consumed left to
//! right in a single pass, with one decision made per leading character of the
//! remaining input:
//!
//! | Leading char(s)           | Action                                              |
//! |---------------------------|-----------------------------------------------------|
//! | `{`                       | nested group, parsed recursively and spliced in     |
//! | `(`                       | shape group, pending shape for the next field       |
//! | `*name*`                  | explicit name for the next field                    |
//! | `@ \| = < > ^ !`          | byte order (and table selection)                    |
//! | whitespace                | skipped                                             |
//! | digits                    | repeat count for the next field                     |
//! | anything else             | type code, optionally followed by `:name:`          |
//!
//! # Table selection
//!
//! Type codes are resolved through the *standard* table if the most recent
//! byte-order symbol was `@` or `^`, and through the *native* table otherwise.
//!
//! # Recovery
//!
//! The parser never fails. Unknown symbols yield an empty descriptor,
//! malformed modifiers are dropped, and unbalanced groups truncate the parse.
//! Each of these leaves a diagnostic on the [`ParseResult`], which is also
//! logged at warn level through the `log` facade. Whether a structcode that
//! yields no fields at all is an error is for the caller to decide; see
//! [`Dtype`](crate::dtype::Dtype).

pub mod cursor;

use std::mem;
use std::ops::ControlFlow;

use crate::config::ParseOptions;
use crate::error::{ConflictError, GroupError, LiteralError, StructcodeError, Table};
use crate::namer::FieldNamer;
use crate::shape::{parse_shape, Shape};
use crate::tables;

use self::cursor::Cursor;

/// A single named field of a parsed structcode.
///
/// `descriptor` holds, in order, an optional shape prefix `(d0, d1, ...)` or
/// repeat-count prefix, and the normalized type tag, itself optionally
/// suffixed with a fixed width for flexible kinds (`S10`, `U4`, `V2`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Element {
    pub name: String,
    pub descriptor: String,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl From<Element> for (String, String) {
    fn from(elem: Element) -> Self {
        (elem.name, elem.descriptor)
    }
}

/// Output of a single parse.
///
/// * `byte_order` is the normalized order of the last byte-order symbol seen,
///   or `""` if there was none
/// * `tokens` holds each resolved byte order and each field descriptor, in
///   input order
/// * `fields` holds the named fields, in input order
/// * `diagnostics` holds every problem the parser recovered from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct ParseResult {
    pub byte_order: String,
    pub tokens: Vec<String>,
    pub fields: Vec<Element>,
    #[cfg_attr(feature = "serde_impls", serde(skip))]
    pub diagnostics: Vec<StructcodeError>,
}

impl ParseResult {
    /// Returns `true` if the parse produced no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields produced.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the parse did not have to recover from anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterates over the field names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|elem| elem.name.as_str())
    }

    /// Iterates over the field descriptors, in order.
    pub fn descriptors(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|elem| elem.descriptor.as_str())
    }

    /// Destructs into the `(byte_order, tokens, fields)` triple, discarding
    /// diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<String>, Vec<(String, String)>) {
        (
            self.byte_order,
            self.tokens,
            self.fields.into_iter().map(Into::into).collect(),
        )
    }
}

/// Parses `code` with the default [`ParseOptions`].
///
/// # Examples
///
/// ```
/// # use structcode::parse;
/// let res = parse("<2i(3)d10s");
/// assert_eq!(res.byte_order, "<");
/// assert_eq!(res.descriptors().collect::<Vec<_>>(), ["2i", "(3)d", "S10"]);
/// assert_eq!(res.names().collect::<Vec<_>>(), ["f0", "f1", "f2"]);
/// ```
#[must_use]
pub fn parse(code: &str) -> ParseResult {
    parse_with(code, ParseOptions::default())
}

/// Parses `code` with the given options.
#[must_use]
pub fn parse_with(code: &str, options: ParseOptions) -> ParseResult {
    Parser::new(code, options).run()
}

/// Single-use parser state for one structcode (or one nested group of one).
///
/// All state is local to a `Parser` value, including the [`FieldNamer`], so
/// separate parses never influence each other.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    depth: usize,
    toplevel: bool,
    /// most recent raw byte-order symbol, which selects the lookup table
    symbol: Option<char>,
    byte_order: &'static str,
    shape: Option<Shape>,
    itemsize: usize,
    name: Option<String>,
    namer: FieldNamer,
    /// names claimed explicitly in this scope, as opposed to generated ones
    explicit: Vec<String>,
    tokens: Vec<String>,
    fields: Vec<Element>,
    diagnostics: Vec<StructcodeError>,
}

impl<'a> Parser<'a> {
    /// Constructs a new top-level `Parser` over `code`
    #[must_use]
    pub fn new(code: &'a str, options: ParseOptions) -> Self {
        Self::at_depth(Cursor::new(code), options, 0)
    }

    fn at_depth(cursor: Cursor<'a>, options: ParseOptions, depth: usize) -> Self {
        Self {
            cursor,
            options,
            depth,
            toplevel: depth == 0,
            symbol: None,
            byte_order: "",
            shape: None,
            itemsize: 1,
            name: None,
            namer: FieldNamer::new(),
            explicit: Vec::new(),
            tokens: Vec::new(),
            fields: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Marks this parser as top-level or not.
    ///
    /// Nested and top-level parses run the identical algorithm; the flag is
    /// informational only.
    #[must_use]
    pub fn toplevel(self, toplevel: bool) -> Self {
        Self { toplevel, ..self }
    }

    #[must_use]
    pub fn is_toplevel(&self) -> bool {
        self.toplevel
    }

    /// Consumes the whole input and returns the result.
    pub fn run(mut self) -> ParseResult {
        self.drive();
        self.finish()
    }

    fn drive(&mut self) {
        log::trace!(
            "parsing {} structcode `{}` at depth {}",
            if self.toplevel { "top-level" } else { "nested" },
            self.cursor.rest(),
            self.depth
        );
        while let Some(c) = self.cursor.peek() {
            if self.step(c).is_break() {
                break;
            }
        }
    }

    fn finish(self) -> ParseResult {
        ParseResult {
            byte_order: self.byte_order.to_owned(),
            tokens: self.tokens,
            fields: self.fields,
            diagnostics: self.diagnostics,
        }
    }

    fn report(&mut self, err: impl Into<StructcodeError>) {
        let err = err.into();
        log::warn!("{}", err);
        self.diagnostics.push(err);
    }

    fn step(&mut self, c: char) -> ControlFlow<()> {
        let offset = self.cursor.offset();
        match c {
            '{' => {
                self.cursor.bump();
                self.group(offset)
            }
            '(' => {
                self.cursor.bump();
                self.shape(offset)
            }
            '*' => {
                self.cursor.bump();
                self.star_name(offset)
            }
            c if tables::is_byteorder_symbol(c) => {
                self.cursor.bump();
                self.byte_order(c);
                ControlFlow::Continue(())
            }
            ' ' | '\n' | '\r' | '\t' | '\x0b' => {
                self.cursor.bump();
                ControlFlow::Continue(())
            }
            c if c.is_ascii_digit() => {
                self.repeat_count(offset);
                ControlFlow::Continue(())
            }
            _ => self.terminal(offset),
        }
    }

    fn group(&mut self, offset: usize) -> ControlFlow<()> {
        let (inner, base) = match self.cursor.take_group('{', '}') {
            Some(group) => group,
            None => {
                self.report(GroupError::Unbalanced { open: '{', offset });
                return ControlFlow::Break(());
            }
        };
        if self.depth >= self.options.max_depth {
            self.report(GroupError::TooDeep {
                limit: self.options.max_depth,
                offset,
            });
            return ControlFlow::Continue(());
        }
        let mut nested =
            Self::at_depth(Cursor::with_base(inner, base), self.options, self.depth + 1)
                .toplevel(false);
        nested.drive();
        let explicit = mem::take(&mut nested.explicit);
        self.splice(nested.finish(), &explicit);
        ControlFlow::Continue(())
    }

    /// Merges the output of a nested parse into this one.
    ///
    /// Nested names are re-registered with this scope's namer, and any name
    /// already taken here is replaced by a fresh one. Replacing a name that
    /// was given explicitly in the nested group is a [`ConflictError`].
    fn splice(&mut self, nested: ParseResult, explicit: &[String]) {
        let ParseResult {
            tokens,
            fields,
            diagnostics,
            ..
        } = nested;
        self.diagnostics.extend(diagnostics);
        self.tokens.extend(tokens);
        for Element { name, descriptor } in fields {
            let is_explicit = explicit.contains(&name);
            let name = if self.namer.claim(&name) {
                if is_explicit {
                    self.explicit.push(name.clone());
                }
                name
            } else {
                let fresh = self.namer.generate();
                if is_explicit {
                    self.report(ConflictError::DuplicateName {
                        name,
                        replacement: fresh.clone(),
                    });
                } else {
                    log::debug!("nested field `{}` renamed to `{}`", name, fresh);
                }
                fresh
            };
            self.fields.push(Element { name, descriptor });
        }
    }

    fn shape(&mut self, offset: usize) -> ControlFlow<()> {
        let (text, _) = match self.cursor.take_group('(', ')') {
            Some(group) => group,
            None => {
                self.report(GroupError::Unbalanced { open: '(', offset });
                return ControlFlow::Break(());
            }
        };
        match parse_shape(text, offset) {
            Ok(shape) => self.shape = Some(shape),
            Err(err) => {
                self.shape = None;
                self.report(err);
            }
        }
        ControlFlow::Continue(())
    }

    fn star_name(&mut self, offset: usize) -> ControlFlow<()> {
        let (name, flow) = match self.cursor.take_until('*') {
            Some(name) => (name, ControlFlow::Continue(())),
            None => {
                self.report(GroupError::UnterminatedName { delim: '*', offset });
                (self.cursor.take_rest(), ControlFlow::Break(()))
            }
        };
        if !name.is_empty() {
            self.name = Some(self.claim_explicit(name));
        }
        flow
    }

    fn byte_order(&mut self, c: char) {
        let mut buf = [0u8; 4];
        match tables::byteorder_get(c.encode_utf8(&mut buf)) {
            Ok(order) => {
                self.symbol = Some(c);
                self.byte_order = order;
                self.tokens.push(order.to_owned());
            }
            Err(err) => self.report(err),
        }
    }

    fn repeat_count(&mut self, offset: usize) {
        let digits = self.cursor.take_while(|c| c.is_ascii_digit());
        self.itemsize = match digits.parse::<usize>() {
            Ok(count) => count,
            Err(_) => {
                self.report(LiteralError::MalformedCount {
                    text: digits.to_owned(),
                    offset,
                });
                1
            }
        };
    }

    fn terminal(&mut self, offset: usize) -> ControlFlow<()> {
        let mut code = String::with_capacity(2);
        if let Some(first) = self.cursor.bump() {
            code.push(first);
            if first == 'Z' {
                code.extend(self.cursor.bump());
            }
        }

        let mut flow = ControlFlow::Continue(());
        let name_offset = self.cursor.offset();
        let explicit = if self.cursor.eat(':') {
            match self.cursor.take_until(':') {
                Some(name) => name,
                None => {
                    self.report(GroupError::UnterminatedName {
                        delim: ':',
                        offset: name_offset,
                    });
                    flow = ControlFlow::Break(());
                    self.cursor.take_rest()
                }
            }
        } else {
            ""
        };

        let pending = self.name.take();
        let name = if !explicit.is_empty() {
            self.claim_explicit(explicit)
        } else {
            match pending {
                Some(name) => name,
                None => self.namer.generate(),
            }
        };

        let table = match self.symbol {
            Some('@') | Some('^') => Table::Standard,
            _ => Table::Native,
        };
        let tag = match tables::get(table, &code) {
            Ok(tag) => tag,
            Err(err) => {
                self.report(err);
                ""
            }
        };

        let descriptor = self.describe(tag, offset);
        self.tokens.push(descriptor.clone());
        self.fields.push(Element { name, descriptor });
        flow
    }

    /// Builds the descriptor for `tag` out of the pending shape and repeat
    /// count, resetting both.
    ///
    /// An empty `tag` (unknown code) always yields an empty descriptor.
    fn describe(&mut self, tag: &str, offset: usize) -> String {
        let mut itemsize = mem::replace(&mut self.itemsize, 1);
        if tag.is_empty() {
            self.shape = None;
            return String::new();
        }
        let mut descriptor = tag.to_owned();
        if itemsize > 1 && tables::is_flexible(tag) {
            descriptor.push_str(&itemsize.to_string());
            itemsize = 1;
        }
        match self.shape.take() {
            Some(shape) => {
                if itemsize > 1 {
                    self.report(ConflictError::IgnoredRepeat {
                        count: itemsize,
                        offset,
                    });
                }
                format!("{}{}", shape, descriptor)
            }
            None if itemsize > 1 => format!("{}{}", itemsize, descriptor),
            None => descriptor,
        }
    }

    fn claim_explicit(&mut self, name: &str) -> String {
        if self.namer.claim(name) {
            self.explicit.push(name.to_owned());
            name.to_owned()
        } else {
            let replacement = self.namer.generate();
            self.report(ConflictError::DuplicateName {
                name: name.to_owned(),
                replacement: replacement.clone(),
            });
            replacement
        }
    }
}
