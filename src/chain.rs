//! Chain evaluation engine shared by the integer and floating point chains.

use core::fmt::Debug;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::defs::Error;
use crate::operand::Operand;

/// Numeric domain of a chain: the accumulator type and the arithmetic on it.
pub trait Domain {
    /// Accumulator type.
    type Value: Clone + Debug;

    /// Coerces an operand into the domain.
    fn coerce(&self, op: Operand) -> Result<Self::Value, Error>;

    /// Additive identity.
    fn zero(&self) -> Self::Value;

    /// Returns true if `v` is exactly zero.
    fn is_zero(v: &Self::Value) -> bool;

    /// Sum of `a` and `b`.
    fn add(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Difference of `a` and `b`.
    fn sub(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Product of `a` and `b`.
    fn mul(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Division. `b` is never zero.
    fn div(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Absolute value of `a`.
    fn abs(&self, a: &Self::Value) -> Self::Value;
}

/// Fluent arithmetic evaluator over a numeric domain.
///
/// Operations apply strictly in call order. The first failure is recorded and
/// every later operation becomes a no-op; the error is reported by `value`.
/// `begin` and `end` group a subtotal, which is added to the enclosing accumulator on `end`.
#[derive(Debug, Clone)]
pub struct Chain<D: Domain> {
    domain: D,
    value: D::Value,
    stack: SmallVec<[D::Value; 4]>,
    err: Option<Error>,
}

impl<D: Domain> Chain<D> {
    /// Creates a chain in `domain` starting from `initial`.
    /// A coercion failure becomes the chain's error.
    pub fn from_domain(domain: D, initial: Operand) -> Self {
        let (value, err) = match domain.coerce(initial) {
            Ok(v) => (v, None),
            Err(e) => (domain.zero(), Some(e)),
        };

        let mut chain = Chain {
            domain,
            value,
            stack: SmallVec::new(),
            err: None,
        };

        if let Some(e) = err {
            chain.fail(e);
        }

        chain
    }

    /// Returns the domain of the chain.
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Adds `op` to the accumulator.
    pub fn add(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |d, a, b| Ok(d.add(a, &b)))
    }

    /// Subtracts `op` from the accumulator.
    pub fn subtract(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |d, a, b| Ok(d.sub(a, &b)))
    }

    /// Multiplies the accumulator by `op`.
    pub fn multiply(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |d, a, b| Ok(d.mul(a, &b)))
    }

    /// Divides the accumulator by `op`. Fails with `DivisionByZero` if `op` is zero.
    pub fn divide(&mut self, op: impl Into<Operand>) -> &mut Self {
        self.operate(op.into(), |d, a, b| {
            if D::is_zero(&b) {
                Err(Error::DivisionByZero)
            } else {
                Ok(d.div(a, &b))
            }
        })
    }

    /// Replaces the accumulator with its absolute value.
    pub fn abs(&mut self) -> &mut Self {
        if self.err.is_none() {
            self.value = self.domain.abs(&self.value);
        }
        self
    }

    /// Opens a group: saves the accumulator and resets it to zero.
    ///
    /// The group is saved even if the chain has failed, so that bracket balance is still checked by `value`.
    pub fn begin(&mut self) -> &mut Self {
        self.stack.push(self.value.clone());
        if self.err.is_none() {
            self.value = self.domain.zero();
        }
        trace!(depth = self.stack.len(), "group opened");
        self
    }

    /// Closes a group: the accumulator becomes the saved value plus the group's subtotal.
    /// Fails with `MismatchedBrackets` if no group is open.
    pub fn end(&mut self) -> &mut Self {
        match self.stack.pop() {
            Some(saved) => {
                if self.err.is_none() {
                    self.value = self.domain.add(&saved, &self.value);
                }
                trace!(depth = self.stack.len(), "group closed");
            }
            None => self.fail(Error::MismatchedBrackets),
        }
        self
    }

    /// Returns the result of the chain.
    ///
    /// ## Errors
    ///
    ///  - MismatchedBrackets: a group is still open. Takes precedence over the recorded error.
    ///  - the first error recorded by an operation.
    pub fn value(&self) -> Result<D::Value, Error> {
        if !self.stack.is_empty() {
            debug!(depth = self.stack.len(), "chain extracted with open groups");
            return Err(Error::MismatchedBrackets);
        }

        match &self.err {
            Some(e) => {
                debug!(kind = ?e.kind(), "chain extracted with error");
                Err(e.clone())
            }
            None => Ok(self.value.clone()),
        }
    }

    /// Consumes the chain and returns its result without cloning it. See `value`.
    ///
    /// Operations return `&mut Self`, so the chain has to be bound to a variable first:
    ///
    /// ```
    /// use bigchain::IntChain;
    ///
    /// let mut chain = IntChain::new(6);
    /// chain.multiply(7);
    /// assert_eq!(chain.into_value(), Ok(42.into()));
    /// ```
    pub fn into_value(self) -> Result<D::Value, Error> {
        if !self.stack.is_empty() {
            debug!(depth = self.stack.len(), "chain extracted with open groups");
            return Err(Error::MismatchedBrackets);
        }

        match self.err {
            Some(e) => {
                debug!(kind = ?e.kind(), "chain extracted with error");
                Err(e)
            }
            None => Ok(self.value),
        }
    }

    /// Returns the recorded error, if any.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Returns true if no error has been recorded.
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// Returns the number of open groups.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Coerces `op` and replaces the accumulator with the result of `f`.
    /// `f` borrows the accumulator, so a failing `f` leaves it untouched.
    pub(crate) fn operate<F>(&mut self, op: Operand, f: F) -> &mut Self
    where
        F: FnOnce(&D, &D::Value, D::Value) -> Result<D::Value, Error>,
    {
        if self.err.is_some() {
            return self;
        }

        let res = self
            .domain
            .coerce(op)
            .and_then(|rhs| f(&self.domain, &self.value, rhs));

        match res {
            Ok(v) => self.value = v,
            Err(e) => self.fail(e),
        }

        self
    }

    /// Records `e` unless an error is already recorded.
    pub(crate) fn fail(&mut self, e: Error) {
        if self.err.is_none() {
            debug!(kind = ?e.kind(), "chain failed: {}", e);
            self.err = Some(e);
        }
    }
}
