//! Structured-dtype field lists
//!
//! This module is the consuming boundary of the parser: it turns a structcode
//! into the list of `(name, descriptor)` pairs that an array runtime accepts as
//! a structured dtype specification, with each descriptor *endianized*, i.e.
//! prefixed with the resolved byte order.
//!
//! Unlike the parser, this boundary treats a structcode that yields no fields
//! as an error ([`StructcodeError::Empty`]).

use std::str::FromStr;

use crate::config::ParseOptions;
use crate::error::{StructcodeError, StructcodeResult};
use crate::parse::{parse_with, Element, ParseResult};

/// Structured-dtype specification derived from a structcode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Dtype {
    byte_order: String,
    fields: Vec<Element>,
}

impl Dtype {
    /// Parses `code` with the default [`ParseOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`StructcodeError::Empty`] if `code` yields no fields.
    ///
    /// # Examples
    ///
    /// ```
    /// # use structcode::Dtype;
    /// let dt = Dtype::from_structcode("<2i:count:d").unwrap();
    /// assert_eq!(dt.pairs().collect::<Vec<_>>(), [("count", "<2i"), ("f0", "<d")]);
    /// assert!(Dtype::from_structcode("  ").is_err());
    /// ```
    pub fn from_structcode(code: &str) -> StructcodeResult<Self> {
        Self::from_structcode_with(code, ParseOptions::default())
    }

    /// Parses `code` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`StructcodeError::Empty`] if `code` yields no fields.
    pub fn from_structcode_with(code: &str, options: ParseOptions) -> StructcodeResult<Self> {
        Self::from_parse(code, parse_with(code, options))
    }

    /// Builds a `Dtype` out of an existing [`ParseResult`] for `code`.
    ///
    /// Diagnostics carried by `res` are discarded; they have already been
    /// logged by the parser.
    ///
    /// # Errors
    ///
    /// Returns [`StructcodeError::Empty`] if `res` holds no fields.
    pub fn from_parse(code: &str, res: ParseResult) -> StructcodeResult<Self> {
        if res.is_empty() {
            return Err(StructcodeError::Empty {
                code: code.to_owned(),
            });
        }
        let ParseResult {
            byte_order, fields, ..
        } = res;
        let fields = fields
            .into_iter()
            .map(|Element { name, descriptor }| Element {
                name,
                descriptor: format!("{}{}", byte_order, descriptor),
            })
            .collect();
        Ok(Self { byte_order, fields })
    }

    /// Resolved byte order (`""` if the structcode had none)
    #[must_use]
    pub fn byte_order(&self) -> &str {
        &self.byte_order
    }

    /// Fields with their endianized descriptors
    #[must_use]
    pub fn fields(&self) -> &[Element] {
        &self.fields
    }

    /// Number of fields; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`, as an empty `Dtype` cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, endianized descriptor)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields
            .iter()
            .map(|elem| (elem.name.as_str(), elem.descriptor.as_str()))
    }

    /// Looks up the endianized descriptor of the field named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs().find(|(n, _)| *n == name).map(|(_, d)| d)
    }
}

impl FromStr for Dtype {
    type Err = StructcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_structcode(s)
    }
}

impl IntoIterator for Dtype {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endianized_pairs() {
        let dt = Dtype::from_structcode("<2i").unwrap();
        assert_eq!(dt.byte_order(), "<");
        assert_eq!(dt.pairs().collect::<Vec<_>>(), [("f0", "<2i")]);

        let dt: Dtype = "@h(2,2)d:m:".parse().unwrap();
        assert_eq!(dt.pairs().collect::<Vec<_>>(), [("f0", "=i2"), ("m", "=(2, 2)d")]);
        assert_eq!(dt.get("m"), Some("=(2, 2)d"));
        assert_eq!(dt.get("zz"), None);
    }

    #[test]
    fn no_byteorder_means_no_prefix() {
        let dt = Dtype::from_structcode("10s").unwrap();
        assert_eq!(dt.byte_order(), "");
        assert_eq!(dt.pairs().collect::<Vec<_>>(), [("f0", "S10")]);
    }

    #[test]
    fn zero_fields_is_an_error() {
        for code in ["", "   \t", "<", "{ii", "{}"] {
            assert_eq!(
                Dtype::from_structcode(code),
                Err(StructcodeError::Empty {
                    code: code.to_owned()
                }),
                "code {:?}",
                code
            );
        }
    }

    #[test]
    fn recovered_diagnostics_do_not_fail() {
        let dt = Dtype::from_structcode("y i").unwrap();
        assert_eq!(dt.len(), 2);
        assert!(!dt.is_empty());
        assert_eq!(dt.fields()[0], Element::new("f0", ""));
    }

    #[test]
    fn depth_option_is_forwarded() {
        let opts = ParseOptions::new().with_max_depth(0);
        assert!(Dtype::from_structcode_with("{i}", opts).is_err());
        assert_eq!(Dtype::from_structcode_with("{i}", ParseOptions::new()).unwrap().len(), 1);
    }

    #[test]
    fn into_iter_yields_fields() {
        let names: Vec<String> = Dtype::from_structcode("ii:x:")
            .unwrap()
            .into_iter()
            .map(|elem| elem.name)
            .collect();
        assert_eq!(names, ["f0", "x"]);
    }
}
