//! Parser for struct / array-interface format strings ("structcodes")
//!
//! # Overview
//!
//! Python's `struct` module, NumPy's array interface and the buffer protocol
//! all describe record layouts with the same compact mini-language: a string
//! of one-letter type codes, optionally preceded by a byte-order symbol and by
//! repeat counts. This crate translates such *structcodes* into a normalized
//! sequence of `(field-name, element-descriptor)` pairs, plus the byte order
//! inferred from the string, in the form expected by NumPy's structured-dtype
//! constructor.
//!
//! On top of the `struct` module's grammar, the dialect understood here
//! supports:
//!
//!   - shape groups, `(2,3)f`, for sub-array fields
//!   - nested groups, `{...}`, whose fields are flattened into the enclosing
//!     structcode
//!   - explicit field names, either after the code (`i:count:`) or before it
//!     (`*count*i`)
//!   - complex-number codes, `Zf`, `Zd` and `Zg`
//!
//! Fields without an explicit name are named `f0`, `f1`, ..., skipping any
//! name that was declared explicitly.
//!
//! # Layout
//!
//! The keystone of the library is the function [`parse`], along with its
//! configurable variant [`parse_with`]. They are built from three pieces:
//!
//!   - [`tables`]: the fixed byte-order, native and standard symbol tables
//!   - [`namer`]: generation of unique field names
//!   - [`parse`](mod@parse): the recursive-descent parser itself
//!
//! [`Dtype`] is the consuming boundary, which endianizes every descriptor and
//! rejects structcodes that produce no fields.
//!
//! # Error policy
//!
//! Parsing is best-effort: unknown symbols, malformed modifiers and
//! unbalanced groups are recovered from locally and reported as diagnostics
//! (see [`error`]), which are also logged through the [`log`] facade. No
//! logger is installed by this crate.
//!
//! # Examples
//!
//! ```
//! use structcode::{parse, Dtype};
//!
//! let res = parse("@ 2h (3,3)d:matrix: 16s");
//! assert_eq!(res.byte_order, "=");
//! assert_eq!(res.names().collect::<Vec<_>>(), ["f0", "matrix", "f1"]);
//! assert_eq!(res.descriptors().collect::<Vec<_>>(), ["2i2", "(3, 3)d", "S16"]);
//!
//! let dt = Dtype::from_structcode(">Q:id: Zd:value:").unwrap();
//! assert_eq!(dt.pairs().collect::<Vec<_>>(), [("id", ">Q"), ("value", ">D")]);
//! ```

pub mod config;
pub mod dtype;
pub mod error;
pub mod namer;
pub mod parse;
pub mod shape;
pub mod tables;

pub use crate::config::ParseOptions;
pub use crate::dtype::Dtype;
pub use crate::error::{StructcodeError, StructcodeResult};
pub use crate::namer::FieldNamer;
pub use crate::parse::{parse, parse_with, Element, ParseResult, Parser};
pub use crate::shape::Shape;
