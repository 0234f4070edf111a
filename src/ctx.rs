//! Parameters of floating point chain operations.

use core::cell::RefCell;

use astro_float::{Consts, RoundingMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::defs::{Error, DEFAULT_P};

thread_local! {
    /// Constants cache used by the decimal parser.
    static CONSTS: RefCell<Option<Consts>> = RefCell::new(None);
}

/// Runs `f` with this thread's constants cache, initializing the cache on first use.
pub(crate) fn with_consts<T>(f: impl FnOnce(&mut Consts) -> T) -> Result<T, Error> {
    CONSTS.with(|cc| {
        let mut cc = cc.borrow_mut();
        if cc.is_none() {
            *cc = Some(Consts::new()?);
        }
        match cc.as_mut() {
            Some(cc) => Ok(f(cc)),
            None => Err(Error::Backend("constants cache is not initialized".into())),
        }
    })
}

/// Rounding of floating point operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    /// No rounding. The result is truncated.
    None,

    /// Round half toward positive infinity.
    Up,

    /// Round half toward negative infinity.
    Down,

    /// Round half toward zero.
    ToZero,

    /// Round half away from zero.
    FromZero,

    /// Round half to even.
    #[default]
    ToEven,

    /// Round half to odd.
    ToOdd,
}

impl From<Rounding> for RoundingMode {
    fn from(r: Rounding) -> Self {
        match r {
            Rounding::None => RoundingMode::None,
            Rounding::Up => RoundingMode::Up,
            Rounding::Down => RoundingMode::Down,
            Rounding::ToZero => RoundingMode::ToZero,
            Rounding::FromZero => RoundingMode::FromZero,
            Rounding::ToEven => RoundingMode::ToEven,
            Rounding::ToOdd => RoundingMode::ToOdd,
        }
    }
}

/// Configuration of a floating point chain: working precision and rounding.
///
/// ```
/// use bigchain::{ChainConfig, FloatChain, Rounding};
///
/// let cfg = ChainConfig::default().with_precision(256).with_rounding(Rounding::ToZero);
/// let v = FloatChain::with_config(cfg, 1).divide(3).value();
/// assert!(v.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChainConfig {
    /// Precision of results in bits. The backend rounds it up to a whole number of words.
    pub precision: usize,

    /// Rounding applied to every inexact result.
    pub rounding: Rounding,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            precision: DEFAULT_P,
            rounding: Rounding::default(),
        }
    }
}

impl ChainConfig {
    /// Sets the precision.
    pub fn with_precision(mut self, p: usize) -> Self {
        self.precision = p;
        self
    }

    /// Sets the rounding.
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Returns the rounding mode of the backend.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding.into()
    }
}
