//! Definitions.

use thiserror::Error;

/// Default precision of the floating point accumulator in bits.
pub const DEFAULT_P: usize = 128;

/// Largest exponent accepted by integer exponentiation.
pub const MAX_INT_EXPONENT: u32 = 64;

/// Possible errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operand representation is not one of the accepted ones.
    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),

    /// String could not be parsed as a number of the target domain.
    #[error("could not convert {input:?} to {target}")]
    InvalidNumericString {
        /// Description of the attempted conversion.
        target: &'static str,
        /// The offending input.
        input: String,
    },

    /// NaN, or infinity where only finite values are allowed.
    #[error("non-finite value cannot be converted to {0}")]
    NonFiniteValue(&'static str),

    /// Divisor is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Modulus is zero.
    #[error("modulo by zero")]
    ModuloByZero,

    /// Exponent exceeds `MAX_INT_EXPONENT`.
    #[error("exponent too large")]
    ExponentTooLarge,

    /// Exponent is negative.
    #[error("negative exponent")]
    NegativeExponent,

    /// Exponent has a fractional part.
    #[error("non-integer exponent")]
    NonIntegerExponent,

    /// `end` without `begin`, or `begin` without `end` at extraction.
    #[error("mismatched brackets")]
    MismatchedBrackets,

    /// Arbitrary precision backend failure, e.g. memory allocation.
    #[error("arbitrary precision backend error: {0}")]
    Backend(String),
}

/// Fieldless discriminant of `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operand representation is not one of the accepted ones.
    UnsupportedType,

    /// String could not be parsed as a number.
    InvalidNumericString,

    /// NaN, or infinity where only finite values are allowed.
    NonFiniteValue,

    /// Divisor is zero.
    DivisionByZero,

    /// Modulus is zero.
    ModuloByZero,

    /// Exponent exceeds `MAX_INT_EXPONENT`.
    ExponentTooLarge,

    /// Exponent is negative.
    NegativeExponent,

    /// Exponent has a fractional part.
    NonIntegerExponent,

    /// Unbalanced `begin` and `end`.
    MismatchedBrackets,

    /// Arbitrary precision backend failure.
    Backend,
}

impl Error {
    /// Returns the kind of the error. Callers should branch on the kind rather than on the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Error::InvalidNumericString { .. } => ErrorKind::InvalidNumericString,
            Error::NonFiniteValue(_) => ErrorKind::NonFiniteValue,
            Error::DivisionByZero => ErrorKind::DivisionByZero,
            Error::ModuloByZero => ErrorKind::ModuloByZero,
            Error::ExponentTooLarge => ErrorKind::ExponentTooLarge,
            Error::NegativeExponent => ErrorKind::NegativeExponent,
            Error::NonIntegerExponent => ErrorKind::NonIntegerExponent,
            Error::MismatchedBrackets => ErrorKind::MismatchedBrackets,
            Error::Backend(_) => ErrorKind::Backend,
        }
    }

    pub(crate) fn invalid_string(target: &'static str, input: &str) -> Self {
        Error::InvalidNumericString {
            target,
            input: input.to_owned(),
        }
    }
}

impl From<astro_float::Error> for Error {
    fn from(e: astro_float::Error) -> Self {
        Error::Backend(format!("{e:?}"))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(Error::ModuloByZero.to_string(), "modulo by zero");
        assert_eq!(Error::MismatchedBrackets.to_string(), "mismatched brackets");
        assert_eq!(
            Error::UnsupportedType("bool").to_string(),
            "unsupported type: bool"
        );
        assert_eq!(
            Error::invalid_string("integer", "abc").to_string(),
            "could not convert \"abc\" to integer"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            Error::invalid_string("float", "x").kind(),
            ErrorKind::InvalidNumericString
        );
        assert_eq!(Error::NonIntegerExponent.kind(), ErrorKind::NonIntegerExponent);
        assert_eq!(Error::Backend("x".into()).kind(), ErrorKind::Backend);
    }
}
