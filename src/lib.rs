//! Fluent, chainable arithmetic over arbitrary precision integers and floating point numbers.
//!
//! A chain holds a running value, the accumulator, and applies operations to it strictly in call order.
//! There is no operator precedence: `IntChain::new(2).add(3).multiply(4)` evaluates to 20.
//!
//! | Chain        | Accumulator                  | Operations                                                       |
//! |:-------------|:-----------------------------|:-----------------------------------------------------------------|
//! | `IntChain`   | `num_bigint::BigInt`         | add, subtract, multiply, divide, modulo, pow, abs, begin, end    |
//! | `FloatChain` | `astro_float::BigFloat`      | add, subtract, multiply, divide, pow, abs, begin, end            |
//!
//! **Operands**
//!
//! Every operation accepts anything convertible to `Operand`: native integers and floats of any width,
//! `BigInt`, `BigUint`, `BigFloat`, and strings. Strings prefixed with `0x` or `0X` are hexadecimal integers,
//! other strings are decimal numbers. Integer chains truncate fractional operands toward zero.
//!
//! **Errors**
//!
//! The first failing operation records its error, and all later operations do nothing.
//! The error is returned by `value()`, which also reports `MismatchedBrackets` if a group is still open.
//!
//! **Grouping**
//!
//! `begin()` saves the accumulator and starts a subtotal from zero. `end()` adds the subtotal to the saved value.
//! Groups always compose by addition, independently of the operation called after `end()`.
//!
//! ## Examples
//!
//! ```
//! use bigchain::{ErrorKind, IntChain};
//! use num_bigint::BigInt;
//!
//! // 10 + (10) = 20, then * 2
//! let v = IntChain::new(10).begin().add(10).end().multiply(2).value();
//! assert_eq!(v, Ok(BigInt::from(40)));
//!
//! // errors are sticky
//! let v = IntChain::new(20).divide(0).add(1).value();
//! assert_eq!(v.map_err(|e| e.kind()), Err(ErrorKind::DivisionByZero));
//! ```
//!
//! ```
//! use astro_float::BigFloat;
//! use bigchain::{ChainConfig, FloatChain};
//!
//! let cfg = ChainConfig::default().with_precision(256);
//! let v = FloatChain::with_config(cfg, "10.5").add(20.5).subtract("0xA").value();
//! assert_eq!(v, Ok(BigFloat::from(21.0)));
//! ```

#![deny(clippy::suspicious)]

mod chain;
mod conv;
mod ctx;
mod defs;
mod float;
mod for_3rd;
mod int;
mod operand;

pub use crate::chain::{Chain, Domain};
pub use crate::conv::{to_big_float, to_big_int};
pub use crate::ctx::{ChainConfig, Rounding};
pub use crate::defs::{Error, ErrorKind, DEFAULT_P, MAX_INT_EXPONENT};
pub use crate::float::{Float, FloatChain};
pub use crate::int::{IntChain, Integer};
pub use crate::operand::Operand;
