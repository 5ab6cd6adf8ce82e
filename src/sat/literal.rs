#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals and variables.
//!
//! A literal is a non-zero signed integer: the absolute value names the
//! variable and the sign gives its polarity (positive means the variable is
//! asserted true). Zero is never a literal; it is reserved as the clause
//! terminator in the DIMACS exchange format.

use crate::sat::error::FormulaError;
use core::ops::{Neg, Not};
use std::fmt::{Display, Formatter};
use std::num::NonZeroI32;

/// A Boolean variable, numbered from 1.
pub type Variable = u32;

/// A signed reference to a variable.
///
/// Ordering is by variable first, then negative before positive, so sorted
/// clauses keep both polarities of a variable next to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Creates the literal of `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).expect("literal variable overflowed");
        let value = if polarity { var } else { -var };
        Self(NonZeroI32::new(value).expect("variable 0 is not a valid literal"))
    }

    /// The variable this literal refers to, regardless of sign.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.get().unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.get() > 0
    }

    /// `true` for a negative literal.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// The literal of the same variable with the opposite sign.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    /// The DIMACS form: the variable number, negative if negated.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0.get()
    }

    /// Whether the literal is made true by assigning `value` to its variable.
    #[must_use]
    pub const fn agrees_with(self, value: bool) -> bool {
        self.polarity() == value
    }
}

impl TryFrom<i32> for Literal {
    type Error = FormulaError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match NonZeroI32::new(value) {
            Some(v) if v.get() != i32::MIN => Ok(Self(v)),
            Some(_) => Err(FormulaError::LiteralOutOfRange(value)),
            None => Err(FormulaError::ZeroLiteral),
        }
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.to_i32()
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.variable(), self.polarity()).cmp(&(other.variable(), other.polarity()))
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for &Literal {
    type Output = Literal;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(-Literal::new(1, true), Literal::new(1, false));
        assert_eq!(!Literal::new(7, false), Literal::new(7, true));
    }

    #[test]
    fn test_from_i32() {
        let lit = Literal::try_from(-3).unwrap();
        assert_eq!(lit.variable(), 3);
        assert!(!lit.polarity());
        assert!(lit.is_negated());
        assert_eq!(lit.to_i32(), -3);
    }

    #[test]
    fn test_zero_rejected() {
        assert_eq!(Literal::try_from(0), Err(FormulaError::ZeroLiteral));
        assert_eq!(
            Literal::try_from(i32::MIN),
            Err(FormulaError::LiteralOutOfRange(i32::MIN))
        );
    }

    #[test]
    fn test_ordering_groups_variables() {
        let mut lits: Vec<Literal> = [3, -1, 2, 1, -3]
            .into_iter()
            .map(|l| Literal::try_from(l).unwrap())
            .collect();
        lits.sort();
        let values: Vec<i32> = lits.into_iter().map(Literal::to_i32).collect();
        assert_eq!(values, vec![-1, 1, 2, -3, 3]);
    }

    #[test]
    fn test_agrees_with() {
        assert!(Literal::new(4, true).agrees_with(true));
        assert!(Literal::new(4, false).agrees_with(false));
        assert!(!Literal::new(4, false).agrees_with(true));
    }
}
