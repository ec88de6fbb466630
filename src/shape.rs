//! Shape tuples for sub-array fields
//!
//! A structcode may prefix a type code with a parenthesized, comma-separated
//! list of dimensions, e.g. `(2,3)f`. This module defines [`Shape`], the value
//! type holding such a list, the parser [`parse_shape`], and the rendering
//! used in element descriptors, `(d0, d1, ...)`.

use std::fmt::{Display, Formatter};
use std::ops::Deref;

use crate::error::LiteralError;

mod inner {
    cfg_if::cfg_if! {
        if #[cfg(feature = "smallvec_shape")] {
            /// Storage type for the dimensions of a [`Shape`](super::Shape).
            ///
            /// When the `smallvec_shape` feature is set, this alias points to
            /// `smallvec::SmallVec<[usize; 4]>`, which keeps shapes of rank
            /// four or less off the heap.
            pub type Dims = smallvec::SmallVec<[usize; 4]>;
        } else {
            /// Storage type for the dimensions of a [`Shape`](super::Shape).
            ///
            /// When the `smallvec_shape` feature is set, this alias points to
            /// `smallvec::SmallVec<[usize; 4]>`.
            ///
            /// Otherwise, it will default to `Vec<usize>`
            pub type Dims = Vec<usize>;
        }
    }
}

pub use inner::Dims;

/// Ordered list of sub-array dimensions
///
/// The absence of a shape is modelled as `Option<Shape>::None` by the parser,
/// which keeps "no shape" distinct from a one-dimensional shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape(Dims);

impl Shape {
    /// Returns the number of dimensions
    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Returns the dimensions as a slice
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.into_iter().collect())
    }
}

impl FromIterator<usize> for Shape {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(feature = "serde_impls")]
impl serde::Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}

/// Renders the shape as `(d0, d1, ...)`.
///
/// A one-dimensional shape renders without a trailing comma, e.g. `(3)`.
impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (ix, dim) in self.0.iter().enumerate() {
            if ix > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", dim)?;
        }
        f.write_str(")")
    }
}

/// Parses the contents of a shape group (without the enclosing parentheses).
///
/// Components are split on `,`, trimmed of surrounding whitespace, and
/// parsed as decimal integers in left-to-right order. A single trailing comma
/// is accepted, as in `3,`.
///
/// `offset` is only used for error reporting.
///
/// # Errors
///
/// Returns [`LiteralError::MalformedShape`] if any other component is empty
/// or not a non-negative integer.
///
/// # Examples
///
/// ```
/// # use structcode::shape::parse_shape;
/// assert_eq!(parse_shape("2, 3", 0).unwrap().as_slice(), &[2, 3]);
/// assert!(parse_shape("2,x", 0).is_err());
/// ```
pub fn parse_shape(text: &str, offset: usize) -> Result<Shape, LiteralError> {
    let malformed = || LiteralError::MalformedShape {
        text: text.to_owned(),
        offset,
    };
    let body = text.trim_end();
    let body = body.strip_suffix(',').unwrap_or(body);
    body.split(',')
        .map(|component| component.trim().parse::<usize>().map_err(|_| malformed()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dims_in_order() {
        assert_eq!(parse_shape("2,3", 0).unwrap(), Shape::from([2, 3]));
        assert_eq!(parse_shape(" 4 , 5 ,6", 0).unwrap(), Shape::from([4, 5, 6]));
        assert_eq!(parse_shape("3,", 0).unwrap(), Shape::from([3]));
        assert_eq!(parse_shape("10", 0).unwrap().rank(), 1);
    }

    #[test]
    fn reject_malformed() {
        for bad in ["", ",", "2,,3", "a", "-1", "2,3,,"] {
            assert_eq!(
                parse_shape(bad, 7),
                Err(LiteralError::MalformedShape {
                    text: bad.to_owned(),
                    offset: 7
                }),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn huge_dims_are_kept_verbatim() {
        let text = format!("{},{},{}", usize::MAX, usize::MAX, 2);
        let shape = parse_shape(&text, 0).unwrap();
        assert_eq!(shape.as_slice(), &[usize::MAX, usize::MAX, 2]);
        assert_eq!(shape.to_string(), format!("({}, {}, 2)", usize::MAX, usize::MAX));
    }

    #[test]
    fn render() {
        assert_eq!(Shape::from([2, 3]).to_string(), "(2, 3)");
        assert_eq!(Shape::from([3]).to_string(), "(3)");
        assert_eq!(Shape::from([1, 2, 3, 4, 5]).to_string(), "(1, 2, 3, 4, 5)");
    }
}
