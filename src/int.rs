//! Chain over arbitrary precision integers.

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::chain::{Chain, Domain};
use crate::conv::to_big_int;
use crate::defs::{Error, MAX_INT_EXPONENT};
use crate::operand::Operand;

/// Integer domain. Division truncates toward zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl Domain for Integer {
    type Value = BigInt;

    fn coerce(&self, op: Operand) -> Result<BigInt, Error> {
        to_big_int(op)
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn is_zero(v: &BigInt) -> bool {
        v.is_zero()
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }

    fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a - b
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }

    fn div(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a / b
    }

    fn abs(&self, a: &BigInt) -> BigInt {
        a.abs()
    }
}

/// Chain accumulating an arbitrary precision integer.
///
/// ```
/// use bigchain::IntChain;
/// use num_bigint::BigInt;
///
/// let v = IntChain::new(10).begin().add(10).end().multiply(2).value();
/// assert_eq!(v, Ok(BigInt::from(40)));
/// ```
pub type IntChain = Chain<Integer>;

impl Chain<Integer> {
    /// Creates a chain starting from `initial`.
    pub fn new(initial: impl Into<Operand>) -> Self {
        Chain::from_domain(Integer, initial.into())
    }

    /// Replaces the accumulator with the remainder of its truncating division by `op`.
    /// The sign of the result follows the accumulator.
    /// Fails with `ModuloByZero` if `op` is zero.
    pub fn modulo(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |_, a, b| {
            if b.is_zero() {
                Err(Error::ModuloByZero)
            } else {
                Ok(a % b)
            }
        })
    }

    /// Raises the accumulator to the power of `op`.
    ///
    /// ## Errors
    ///
    ///  - NegativeExponent: `op` is negative.
    ///  - ExponentTooLarge: `op` is greater than `MAX_INT_EXPONENT`.
    pub fn pow(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |_, a, b| {
            if b.sign() == Sign::Minus {
                return Err(Error::NegativeExponent);
            }
            match b.to_u32() {
                Some(e) if e <= MAX_INT_EXPONENT => Ok(a.pow(e)),
                _ => Err(Error::ExponentTooLarge),
            }
        })
    }
}
