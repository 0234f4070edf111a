//! Operands accepted by chain operations.

use core::any::{type_name, Any};

use astro_float::BigFloat;
use num_bigint::{BigInt, BigUint};

/// Closed set of input representations a chain can coerce into its numeric domain.
///
/// Every native integer and floating point type, `BigInt`, `BigUint`, `BigFloat`,
/// and strings convert into `Operand` with `From`, so chain operations accept them directly:
///
/// ```
/// use bigchain::IntChain;
///
/// let v = IntChain::new(1u8).add(2i64).add("3").add("0x4").value();
/// assert_eq!(v, Ok(10.into()));
/// ```
#[derive(Debug, Clone)]
pub enum Operand {
    /// Native signed integer of any width.
    Signed(i128),

    /// Native unsigned integer of any width.
    Unsigned(u128),

    /// Native floating point value. `f32` is widened exactly.
    Native(f64),

    /// Arbitrary precision integer.
    BigInt(BigInt),

    /// Arbitrary precision floating point number.
    BigFloat(BigFloat),

    /// Decimal, or `0x`-prefixed hexadecimal, text.
    Text(String),

    /// A runtime value outside of the accepted set. Holds the name of its type.
    Unsupported(&'static str),
}

impl Operand {
    /// Inspects a runtime-typed value and converts it into an operand.
    /// Types outside of the accepted set produce `Operand::Unsupported`,
    /// which a chain reports as `UnsupportedType` when the operand is used.
    pub fn from_any<T: Any>(v: &T) -> Self {
        let v = v as &dyn Any;

        macro_rules! try_downcast {
            ($v:ident; $($t:ty),*) => {
                $(
                    if let Some(x) = $v.downcast_ref::<$t>() {
                        return Operand::from(x.clone());
                    }
                )*
            };
        }

        try_downcast!(
            v; i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, BigInt,
            BigUint, BigFloat, String
        );

        if let Some(s) = v.downcast_ref::<&'static str>() {
            return Operand::from(*s);
        }

        Operand::Unsupported(type_name::<T>())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(i: $t) -> Self {
                    Operand::Signed(i as i128)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(u: $t) -> Self {
                    Operand::Unsigned(u as u128)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, i128, isize);
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<f32> for Operand {
    fn from(f: f32) -> Self {
        Operand::Native(f64::from(f))
    }
}

impl From<f64> for Operand {
    fn from(f: f64) -> Self {
        Operand::Native(f)
    }
}

impl From<BigInt> for Operand {
    fn from(i: BigInt) -> Self {
        Operand::BigInt(i)
    }
}

impl From<&BigInt> for Operand {
    fn from(i: &BigInt) -> Self {
        Operand::BigInt(i.clone())
    }
}

impl From<BigUint> for Operand {
    fn from(u: BigUint) -> Self {
        Operand::BigInt(BigInt::from(u))
    }
}

impl From<&BigUint> for Operand {
    fn from(u: &BigUint) -> Self {
        Operand::BigInt(BigInt::from(u.clone()))
    }
}

impl From<BigFloat> for Operand {
    fn from(f: BigFloat) -> Self {
        Operand::BigFloat(f)
    }
}

impl From<&BigFloat> for Operand {
    fn from(f: &BigFloat) -> Self {
        Operand::BigFloat(f.clone())
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_owned())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::Text(s.clone())
    }
}
