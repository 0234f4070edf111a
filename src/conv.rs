//! Coercion of operands into the integer and floating point domains.

use astro_float::{
    BigFloat, Exponent, Radix, RoundingMode, Sign, Word, INF_NEG, INF_POS, WORD_BIT_SIZE,
};
use num_bigint::{BigInt, BigUint};
use num_traits::{FromPrimitive, Zero};

use crate::ctx::with_consts;
use crate::defs::Error;
use crate::operand::Operand;

const INTEGER: &str = "integer";
const FLOAT: &str = "float";
const HEX_FLOAT: &str = "float from hex";

/// Splits the `0x` or `0X` prefix off `s` and returns the radix of the remaining digits.
fn split_radix(s: &str) -> (u32, &str) {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => (16, digits),
        None => (10, s),
    }
}

/// Parses an optionally signed integer. Only digits of `radix` are accepted, digit separators are not.
fn parse_int(digits: &str, radix: u32, target: &'static str, input: &str) -> Result<BigInt, Error> {
    let unsigned = digits.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::invalid_string(target, input));
    }

    BigInt::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| Error::invalid_string(target, input))
}

/// Converts an operand to an arbitrary precision integer.
/// Floating point values are truncated toward zero.
/// Strings prefixed with `0x` or `0X` are parsed as hexadecimal, other strings as decimal.
///
/// ## Errors
///
///  - UnsupportedType: the operand is `Operand::Unsupported`.
///  - InvalidNumericString: the string is not a valid integer in the selected radix.
///  - NonFiniteValue: the operand is NaN or infinity.
pub fn to_big_int(op: impl Into<Operand>) -> Result<BigInt, Error> {
    match op.into() {
        Operand::BigInt(i) => Ok(i),
        Operand::BigFloat(f) => float_to_int(&f),
        Operand::Signed(i) => Ok(BigInt::from(i)),
        Operand::Unsigned(u) => Ok(BigInt::from(u)),
        Operand::Native(f) => BigInt::from_f64(f).ok_or(Error::NonFiniteValue(INTEGER)),
        Operand::Text(s) => {
            let (radix, digits) = split_radix(&s);
            parse_int(digits, radix, INTEGER, &s)
        }
        Operand::Unsupported(name) => Err(Error::UnsupportedType(name)),
    }
}

/// Converts an operand to an arbitrary precision floating point number.
/// Integers are converted exactly, with the precision growing to hold every bit.
/// Decimal strings are parsed with precision `p` and rounding mode `rm`.
/// Hexadecimal strings are parsed as integers and then converted exactly.
///
/// ## Errors
///
///  - UnsupportedType: the operand is `Operand::Unsupported`.
///  - InvalidNumericString: the string can't be parsed.
///  - NonFiniteValue: the operand is NaN.
///  - Backend: failed to initialize the constants cache.
pub fn to_big_float(op: impl Into<Operand>, p: usize, rm: RoundingMode) -> Result<BigFloat, Error> {
    let f = match op.into() {
        Operand::BigFloat(f) => f,
        Operand::BigInt(i) => int_to_float(&i)?,
        Operand::Signed(i) => int_to_float(&BigInt::from(i))?,
        Operand::Unsigned(u) => int_to_float(&BigInt::from(u))?,
        Operand::Native(f) => BigFloat::from_f64(f, p),
        Operand::Text(s) => match split_radix(&s) {
            (16, digits) => int_to_float(&parse_int(digits, 16, HEX_FLOAT, &s)?)?,
            (_, digits) => parse_float(digits, p, rm)?,
        },
        Operand::Unsupported(name) => return Err(Error::UnsupportedType(name)),
    };

    if f.is_nan() {
        Err(Error::NonFiniteValue(FLOAT))
    } else {
        Ok(f)
    }
}

/// Returns true if `s` is a decimal number with an optional sign, fraction, and exponent.
fn is_decimal_literal(s: &str) -> bool {
    let (mantissa, exp) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let mantissa = mantissa.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(mantissa);
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |d: &str| d.bytes().all(|b| b.is_ascii_digit());

    if int.len() + frac.len() == 0 || !all_digits(int) || !all_digits(frac) {
        return false;
    }

    match exp {
        Some(exp) => {
            let exp = exp.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
        None => true,
    }
}

fn parse_float(s: &str, p: usize, rm: RoundingMode) -> Result<BigFloat, Error> {
    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
        return Ok(if s.starts_with('-') { INF_NEG } else { INF_POS });
    }

    if !is_decimal_literal(s) {
        return Err(Error::invalid_string(FLOAT, s));
    }

    // the backend parser only recognizes lower case exponent marker
    let f = with_consts(|cc| BigFloat::parse(&s.to_ascii_lowercase(), Radix::Dec, p, rm, cc))?;
    if f.is_nan() {
        Err(Error::invalid_string(FLOAT, s))
    } else {
        Ok(f)
    }
}

/// Converts an integer to a floating point number without loss of precision.
pub(crate) fn int_to_float(i: &BigInt) -> Result<BigFloat, Error> {
    let words = magnitude_to_words(i.magnitude());
    let e = Exponent::try_from(words.len() * WORD_BIT_SIZE)
        .map_err(|_| Error::Backend(format!("integer of {} bits is out of exponent range", i.bits())))?;
    let s = if i.sign() == num_bigint::Sign::Minus {
        Sign::Neg
    } else {
        Sign::Pos
    };

    let f = BigFloat::from_words(&words, s, e);
    match f.err() {
        Some(e) => Err(e.into()),
        None => Ok(f),
    }
}

/// Returns the integer part of a floating point number.
pub(crate) fn float_to_int(f: &BigFloat) -> Result<BigInt, Error> {
    let (m, _, s, e, _) = f.as_raw_parts().ok_or(Error::NonFiniteValue(INTEGER))?;

    if e <= 0 {
        return Ok(BigInt::zero());
    }

    let mag = words_to_magnitude(m);
    let width = m.len() * WORD_BIT_SIZE;
    let e = e as usize;
    let mag = if e >= width {
        mag << (e - width)
    } else {
        mag >> (width - e)
    };

    let sign = if s == Sign::Neg {
        num_bigint::Sign::Minus
    } else {
        num_bigint::Sign::Plus
    };

    Ok(BigInt::from_biguint(sign, mag))
}

/// Returns the nearest `f64` to a floating point number.
/// Values outside of the `f64` range become infinite or zero.
pub(crate) fn float_to_f64(f: &BigFloat) -> f64 {
    let (m, _, s, e, _) = match f.as_raw_parts() {
        Some(parts) => parts,
        None if f.is_inf_pos() => return f64::INFINITY,
        None if f.is_inf_neg() => return f64::NEG_INFINITY,
        None => return f64::NAN,
    };

    // collect the 64 most significant bits, and fold the rest into a sticky bit
    // so that the single conversion below rounds to nearest
    let mut top = 0u128;
    let mut bits = 0;
    let mut words = m.iter().rev();
    for w in words.by_ref() {
        top = (top << WORD_BIT_SIZE) | *w as u128;
        bits += WORD_BIT_SIZE;
        if bits >= 64 {
            break;
        }
    }
    if bits < 64 {
        top <<= 64 - bits;
    }

    let mut top = top as u64;
    if words.any(|w| *w != 0) {
        top |= 1;
    }

    let ret = scale(top as f64, e as i64 - 64);

    if s == Sign::Neg {
        -ret
    } else {
        ret
    }
}

/// Returns `x * 2^n` without intermediate underflow or overflow of the scaling factor.
fn scale(mut x: f64, n: i64) -> f64 {
    let mut n = n.clamp(-4096, 4096) as i32;
    while n > 1000 {
        x *= 2f64.powi(1000);
        n -= 1000;
    }
    while n < -1000 {
        x *= 2f64.powi(-1000);
        n += 1000;
    }
    x * 2f64.powi(n)
}

fn magnitude_to_words(mag: &BigUint) -> Vec<Word> {
    let bytes = mag.to_bytes_le();
    bytes
        .chunks(WORD_BIT_SIZE / 8)
        .map(|chunk| chunk.iter().rev().fold(0, |w: Word, b| (w << 8) | Word::from(*b)))
        .collect()
}

fn words_to_magnitude(m: &[Word]) -> BigUint {
    let mut bytes = Vec::with_capacity(m.len() * WORD_BIT_SIZE / 8);
    for w in m {
        bytes.extend_from_slice(&w.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}
