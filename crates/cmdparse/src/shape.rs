use log::trace;
use thiserror::Error;

use crate::tokenize::tokenize;

/// Arity flags of one declared argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    pub optional: bool,
    pub combined: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("combined argument at position {0} is not the last one")]
    CombinedNotLast(usize),
    #[error("required argument at position {0} follows an optional one")]
    RequiredAfterOptional(usize),
}

/// Fewer values than required arguments were supplied. `index` is the
/// position of the first argument left without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Missing {
    pub index: usize,
}

/// Validated arity of a command's argument list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shape {
    total: usize,
    required: usize,
    combined: bool,
}

impl Shape {
    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Result<Self, ShapeError> {
        let slots: Vec<Slot> = slots.into_iter().collect();
        let mut shape = Shape {
            total: slots.len(),
            ..Shape::default()
        };
        let mut had_optional = false;
        for (i, slot) in slots.iter().enumerate() {
            if slot.combined && i != slots.len() - 1 {
                return Err(ShapeError::CombinedNotLast(i));
            }
            if slot.combined {
                shape.combined = true;
            }
            if slot.optional {
                had_optional = true;
            } else if had_optional {
                return Err(ShapeError::RequiredAfterOptional(i));
            } else {
                shape.required += 1;
            }
        }
        Ok(shape)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn has_combined_tail(&self) -> bool {
        self.combined
    }

    /// Binds a raw argument tail to positional values.
    ///
    /// Tokens beyond the declared arguments are dropped. When the last
    /// argument is combined and every argument received a token, the
    /// combined value is the rest of the tail starting at its token, taken
    /// verbatim. A single combined argument receives the whole tail as is.
    pub fn bind<'a>(&self, tail: Option<&'a str>) -> Result<Vec<&'a str>, Missing> {
        let tail = tail.unwrap_or_default();
        let tokens = tokenize(tail);
        trace!("Tokens: {:?}", tokens);
        if tokens.len() < self.required {
            return Err(Missing {
                index: tokens.len(),
            });
        }
        if self.combined && tokens.len() >= self.total {
            if self.total == 1 {
                return Ok(vec![tail]);
            }
            let combined_at = self.total - 1;
            let mut values: Vec<&str> = tokens[..combined_at].iter().map(|t| t.text).collect();
            values.push(&tail[tokens[combined_at].offset..]);
            return Ok(values);
        }
        Ok(tokens.into_iter().take(self.total).map(|t| t.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: Slot = Slot {
        optional: false,
        combined: false,
    };
    const OPTIONAL: Slot = Slot {
        optional: true,
        combined: false,
    };
    const COMBINED: Slot = Slot {
        optional: false,
        combined: true,
    };
    const OPTIONAL_COMBINED: Slot = Slot {
        optional: true,
        combined: true,
    };

    fn shape(slots: &[Slot]) -> Shape {
        Shape::new(slots.iter().copied()).unwrap()
    }

    #[test]
    fn counts_required_and_combined() {
        let s = shape(&[REQUIRED, REQUIRED, OPTIONAL, OPTIONAL_COMBINED]);
        assert_eq!(s.total(), 4);
        assert_eq!(s.required(), 2);
        assert!(s.has_combined_tail());

        let s = shape(&[]);
        assert_eq!(s.required(), 0);
        assert!(!s.has_combined_tail());
    }

    #[test]
    fn combined_must_be_last() {
        assert_eq!(
            Shape::new([COMBINED, REQUIRED]),
            Err(ShapeError::CombinedNotLast(0))
        );
        assert_eq!(
            Shape::new([REQUIRED, OPTIONAL_COMBINED, OPTIONAL]),
            Err(ShapeError::CombinedNotLast(1))
        );
    }

    #[test]
    fn required_cannot_follow_optional() {
        assert_eq!(
            Shape::new([OPTIONAL, REQUIRED]),
            Err(ShapeError::RequiredAfterOptional(1))
        );
        assert_eq!(
            Shape::new([REQUIRED, OPTIONAL, COMBINED]),
            Err(ShapeError::RequiredAfterOptional(2))
        );
    }

    #[test]
    fn valid_orderings_are_accepted() {
        assert!(Shape::new([REQUIRED, REQUIRED, COMBINED]).is_ok());
        assert!(Shape::new([REQUIRED, OPTIONAL, OPTIONAL_COMBINED]).is_ok());
        assert!(Shape::new([OPTIONAL, OPTIONAL]).is_ok());
        assert!(Shape::new([COMBINED]).is_ok());
    }

    #[test]
    fn extra_tokens_are_dropped() {
        let s = shape(&[REQUIRED, REQUIRED]);
        assert_eq!(s.bind(Some("a b c")), Ok(vec!["a", "b"]));
    }

    #[test]
    fn combined_tail_keeps_original_spacing() {
        let s = shape(&[REQUIRED, COMBINED]);
        assert_eq!(
            s.bind(Some("first second third fourth")),
            Ok(vec!["first", "second third fourth"])
        );
        assert_eq!(
            s.bind(Some("first  second\n third   fourth")),
            Ok(vec!["first", "second\n third   fourth"])
        );
    }

    #[test]
    fn single_combined_gets_raw_tail() {
        let s = shape(&[COMBINED]);
        assert_eq!(
            s.bind(Some("  multi   space text")),
            Ok(vec!["  multi   space text"])
        );
    }

    #[test]
    fn combined_not_reached_binds_tokens() {
        let s = shape(&[REQUIRED, OPTIONAL, OPTIONAL_COMBINED]);
        assert_eq!(s.bind(Some("a")), Ok(vec!["a"]));
        assert_eq!(s.bind(Some("a  b")), Ok(vec!["a", "b"]));
        assert_eq!(s.bind(Some("a b c  d")), Ok(vec!["a", "b", "c  d"]));
    }

    #[test]
    fn missing_points_at_first_unfilled_argument() {
        let s = shape(&[REQUIRED, REQUIRED, OPTIONAL]);
        assert_eq!(s.bind(None), Err(Missing { index: 0 }));
        assert_eq!(s.bind(Some("   ")), Err(Missing { index: 0 }));
        assert_eq!(s.bind(Some("a")), Err(Missing { index: 1 }));
        assert_eq!(s.bind(Some("a b")), Ok(vec!["a", "b"]));
    }

    #[test]
    fn no_tail_binds_nothing() {
        let s = shape(&[OPTIONAL]);
        assert_eq!(s.bind(None), Ok(vec![]));
        let s = shape(&[OPTIONAL_COMBINED]);
        assert_eq!(s.bind(None), Ok(vec![]));
    }
}
