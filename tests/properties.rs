//! Property-based tests of the chain algebra using `proptest`.
//!
//! 1. **Sticky errors**: once an operation fails, later operations keep the same error.
//! 2. **Bracket balance**: `value` succeeds only for balanced `begin`/`end` sequences.
//! 3. **Grouping algebra**: `begin().add(k).end()` on `v` yields `v + k`.
//! 4. **Coercion agreement**: decimal strings, hex strings, and native integers coerce equally.
//! 5. **Zero division**: `divide(0)` and `modulo(0)` always fail.

use astro_float::BigFloat;
use bigchain::{to_big_int, Error, FloatChain, IntChain};
use num_bigint::BigInt;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    Subtract(i64),
    Multiply(i64),
    Divide(i64),
    Modulo(i64),
    Pow(i32),
    Abs,
    Begin,
    End,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i64>().prop_map(Op::Add),
        any::<i64>().prop_map(Op::Subtract),
        (-1000i64..1000).prop_map(Op::Multiply),
        (-5i64..5).prop_map(Op::Divide),
        (-5i64..5).prop_map(Op::Modulo),
        prop_oneof![Just(-1), Just(0), Just(1), Just(65)].prop_map(Op::Pow),
        Just(Op::Abs),
        Just(Op::Begin),
        Just(Op::End),
    ]
}

fn apply(chain: &mut IntChain, op: &Op) {
    match *op {
        Op::Add(x) => chain.add(x),
        Op::Subtract(x) => chain.subtract(x),
        Op::Multiply(x) => chain.multiply(x),
        Op::Divide(x) => chain.divide(x),
        Op::Modulo(x) => chain.modulo(x),
        Op::Pow(x) => chain.pow(x),
        Op::Abs => chain.abs(),
        Op::Begin => chain.begin(),
        Op::End => chain.end(),
    };
}

/// Returns true if every prefix of `ops` closes no more groups than it opened, and all groups are closed.
fn balanced(ops: &[Op]) -> bool {
    let mut depth = 0i64;
    for op in ops {
        match op {
            Op::Begin => depth += 1,
            Op::End => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sticky_error(init in any::<i64>(), ops in prop::collection::vec(op(), 0..24)) {
        let mut chain = IntChain::new(init);
        let mut first: Option<Error> = None;
        for op in &ops {
            apply(&mut chain, op);
            match (&first, chain.err()) {
                (None, Some(e)) => first = Some(e.clone()),
                (Some(f), Some(e)) => prop_assert_eq!(f, e),
                (Some(_), None) => prop_assert!(false, "error was cleared"),
                (None, None) => {}
            }
        }
        if let (Some(f), 0) = (&first, chain.depth()) {
            prop_assert_eq!(chain.value(), Err(f.clone()));
        }
    }

    #[test]
    fn bracket_balance(ops in prop::collection::vec(
        prop_oneof![Just(Op::Begin), Just(Op::End), (0i64..10).prop_map(Op::Add)],
        0..20,
    )) {
        let mut chain = IntChain::new(0);
        for op in &ops {
            apply(&mut chain, op);
        }
        if balanced(&ops) {
            prop_assert!(chain.value().is_ok());
        } else {
            prop_assert_eq!(chain.value(), Err(Error::MismatchedBrackets));
        }
    }

    #[test]
    fn grouping_adds_int(v in any::<i128>(), k in any::<i128>()) {
        let expected = BigInt::from(v) + BigInt::from(k);
        prop_assert_eq!(IntChain::new(v).begin().add(k).end().value(), Ok(expected));
    }

    #[test]
    fn grouping_adds_float(v in -1.0e12f64..1.0e12, k in -1.0e12f64..1.0e12) {
        let direct = FloatChain::new(v).add(k).value();
        let grouped = FloatChain::new(v).begin().add(k).end().value();
        prop_assert!(direct.is_ok());
        prop_assert_eq!(grouped, direct);
    }

    #[test]
    fn coercion_agrees(v in any::<i64>()) {
        let native = to_big_int(v);
        prop_assert_eq!(to_big_int(v.to_string()), native.clone());
        if v.unsigned_abs() < 1 << 53 {
            prop_assert_eq!(to_big_int(v as f64), native.clone());
        }
        if v >= 0 {
            prop_assert_eq!(to_big_int(format!("0x{v:x}")), native.clone());
            prop_assert_eq!(to_big_int(format!("0X{v:X}")), native);
        }
    }

    #[test]
    fn zero_division(ops in prop::collection::vec(op(), 0..8)) {
        let mut chain = IntChain::new(1);
        for op in ops.iter().filter(|op| !matches!(op, Op::Begin | Op::End)) {
            apply(&mut chain, op);
        }
        let failed = chain.err().cloned();

        let mut div = chain.clone();
        div.divide(0);
        prop_assert_eq!(div.value(), Err(failed.clone().unwrap_or(Error::DivisionByZero)));

        chain.modulo(0);
        prop_assert_eq!(chain.value(), Err(failed.unwrap_or(Error::ModuloByZero)));
    }

    #[test]
    fn float_divide_by_zero(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        prop_assert_eq!(FloatChain::new(v).divide(0).value(), Err(Error::DivisionByZero));
        prop_assert_eq!(FloatChain::new(v).divide(BigFloat::from(0.0)).value(), Err(Error::DivisionByZero));
    }
}
