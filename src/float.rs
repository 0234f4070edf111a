//! Chain over arbitrary precision floating point numbers.

use astro_float::{BigFloat, RoundingMode};

use crate::chain::{Chain, Domain};
use crate::conv::{float_to_f64, to_big_float};
use crate::ctx::ChainConfig;
use crate::defs::Error;
use crate::operand::Operand;

/// Floating point domain. Results are rounded to the configured precision.
#[derive(Debug, Clone, Copy)]
pub struct Float {
    p: usize,
    rm: RoundingMode,
}

impl Float {
    /// Creates the domain from a configuration.
    pub fn new(cfg: &ChainConfig) -> Self {
        Float {
            p: cfg.precision,
            rm: cfg.rounding_mode(),
        }
    }

    /// Returns the precision of the domain.
    pub fn precision(&self) -> usize {
        self.p
    }

    /// Returns the rounding mode of the domain.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rm
    }
}

impl Default for Float {
    fn default() -> Self {
        Float::new(&ChainConfig::default())
    }
}

impl Domain for Float {
    type Value = BigFloat;

    fn coerce(&self, op: Operand) -> Result<BigFloat, Error> {
        to_big_float(op, self.p, self.rm)
    }

    fn zero(&self) -> BigFloat {
        BigFloat::new(self.p)
    }

    fn is_zero(v: &BigFloat) -> bool {
        v.is_zero()
    }

    fn add(&self, a: &BigFloat, b: &BigFloat) -> BigFloat {
        a.add(b, self.p, self.rm)
    }

    fn sub(&self, a: &BigFloat, b: &BigFloat) -> BigFloat {
        a.sub(b, self.p, self.rm)
    }

    fn mul(&self, a: &BigFloat, b: &BigFloat) -> BigFloat {
        a.mul(b, self.p, self.rm)
    }

    fn div(&self, a: &BigFloat, b: &BigFloat) -> BigFloat {
        a.div(b, self.p, self.rm)
    }

    fn abs(&self, a: &BigFloat) -> BigFloat {
        a.abs()
    }
}

/// Chain accumulating an arbitrary precision floating point number.
///
/// ```
/// use astro_float::BigFloat;
/// use bigchain::FloatChain;
///
/// let v = FloatChain::new(10.5).add(20.5).subtract(10).multiply(2).divide(2).value();
/// assert_eq!(v, Ok(BigFloat::from(21.0)));
/// ```
pub type FloatChain = Chain<Float>;

impl Chain<Float> {
    /// Creates a chain starting from `initial` with the default configuration.
    pub fn new(initial: impl Into<Operand>) -> Self {
        Self::with_config(ChainConfig::default(), initial)
    }

    /// Creates a chain starting from `initial` with the configuration `cfg`.
    pub fn with_config(cfg: ChainConfig, initial: impl Into<Operand>) -> Self {
        Chain::from_domain(Float::new(&cfg), initial.into())
    }

    /// Raises the accumulator to the power of `op`.
    /// The computation is carried out in `f64`, and the result is converted back with the chain's precision.
    ///
    /// ## Errors
    ///
    ///  - NegativeExponent: `op` is negative.
    ///  - NonIntegerExponent: `op` has a fractional part, or is not finite.
    pub fn pow(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |d, a, b| {
            let exponent = float_to_f64(&b);

            if exponent < 0.0 {
                return Err(Error::NegativeExponent);
            }

            if exponent != (exponent as i64) as f64 {
                return Err(Error::NonIntegerExponent);
            }

            let base = float_to_f64(a);
            Ok(BigFloat::from_f64(base.powf(exponent), d.precision()))
        })
    }
}
