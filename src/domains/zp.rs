//! Integers bound to a finite field.

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rug::integer::Order;
use rug::Integer as MultiPrecisionInteger;
use tracing::debug;

use super::finite_field::{parse_decimal, FiniteField};
use super::{Field, Ring};
use crate::error::FieldError;

/// A value in the finite field `Z(p)`, an integer in which all arithmetic is `(mod p)`.
///
/// The value is always kept in `[0, p)`. Binary operations require both operands
/// to be in the same field and panic otherwise: mixing fields is a bug in the caller,
/// not a property of the data. Division and inversion can fail on data and return
/// a [FieldError] instead.
///
/// An element created with [Zp::default] is not bound to a field yet. It is bound
/// by [Zp::bind], or by the first assign-operation that supplies a field.
#[derive(Clone, Default)]
pub struct Zp {
    value: MultiPrecisionInteger,
    field: Option<FiniteField>,
}

/// Get the field shared by `a` and `b`, panicking on a mismatch.
#[track_caller]
fn common_field<'a>(a: &'a Zp, b: &'a Zp) -> &'a FiniteField {
    match (&a.field, &b.field) {
        (Some(fa), Some(fb)) => {
            fa.assert_same(fb);
            fa
        }
        (Some(f), None) | (None, Some(f)) => f,
        (None, None) => panic!("operation on finite field elements that are not bound to a field"),
    }
}

impl Zp {
    /// Zero in the field.
    pub fn zero(field: &FiniteField) -> Zp {
        Zp {
            value: field.zero(),
            field: Some(field.clone()),
        }
    }

    /// The integer `n` in the field.
    pub fn new(field: &FiniteField, n: MultiPrecisionInteger) -> Zp {
        Zp {
            value: field.to_element(n),
            field: Some(field.clone()),
        }
    }

    /// The machine integer `n` in the field. Negative values are mapped into `[0, p)`.
    pub fn from_i64(field: &FiniteField, n: i64) -> Zp {
        Self::new(field, MultiPrecisionInteger::from(n))
    }

    /// Decode the canonical byte representation, see [Zp::to_bytes].
    pub fn from_bytes(field: &FiniteField, bytes: &[u8]) -> Zp {
        Self::new(field, MultiPrecisionInteger::from_digits(bytes, Order::Lsf))
    }

    /// Parse a base-10 integer literal.
    pub fn parse(field: &FiniteField, s: &str) -> Result<Zp, FieldError> {
        Ok(Self::new(field, parse_decimal(s)?))
    }

    /// A uniformly random element, drawn from the thread-local cryptographic generator.
    pub fn random(field: &FiniteField) -> Zp {
        Self::random_with(field, &mut rand::rng())
    }

    /// A uniformly random element, drawn from `rng`.
    pub fn random_with<R: rand::CryptoRng>(field: &FiniteField, rng: &mut R) -> Zp {
        Zp {
            value: field.sample(rng),
            field: Some(field.clone()),
        }
    }

    pub(crate) fn from_normalized(field: FiniteField, value: MultiPrecisionInteger) -> Zp {
        Zp {
            value,
            field: Some(field),
        }
    }

    /// The field this element is bound to, if any.
    pub fn field(&self) -> Option<&FiniteField> {
        self.field.as_ref()
    }

    #[track_caller]
    pub(crate) fn bound_field(&self) -> &FiniteField {
        match &self.field {
            Some(f) => f,
            None => panic!("finite field element is not bound to a field"),
        }
    }

    /// Bind an unbound element to `field`, or assert that a bound element
    /// is already in `field`.
    #[track_caller]
    pub fn bind(&mut self, field: &FiniteField) -> &mut Self {
        match &self.field {
            Some(f) => f.assert_same(field),
            None => {
                self.value = field.to_element(std::mem::take(&mut self.value));
                self.field = Some(field.clone());
            }
        }
        self
    }

    /// Check that this element is bound to `field`.
    pub fn check_field(&self, field: &FiniteField) -> Result<(), FieldError> {
        match &self.field {
            Some(f) if f.same_field(field) => Ok(()),
            Some(f) => Err(field.mismatch(f)),
            None => Err(FieldError::FieldMismatch {
                expected: field.get_prime().to_string(),
                actual: "unbound".to_owned(),
            }),
        }
    }

    /// The integer value in `[0, p)`.
    pub fn value(&self) -> &MultiPrecisionInteger {
        &self.value
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// The canonical byte representation: the minimal big-endian bytes of the value,
    /// reversed. The length depends on the magnitude of the value, and zero encodes
    /// to no bytes at all.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_digits::<u8>(Order::Lsf)
    }

    /// Set the value from its canonical byte representation.
    #[track_caller]
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        let v = MultiPrecisionInteger::from_digits(bytes, Order::Lsf);
        self.value = self.bound_field().to_element(v);
    }

    /// The element formatted as a full-key hash, the hex encoding of [Zp::to_bytes].
    pub fn full_key_hash(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Compare the values of two elements of the same field.
    #[track_caller]
    pub fn compare(&self, other: &Zp) -> Ordering {
        common_field(self, other);
        self.value.cmp(&other.value)
    }

    /// Set the value to its additive inverse.
    #[track_caller]
    pub fn neg_assign(&mut self) {
        let field = self.bound_field();
        self.value = field.neg(&self.value);
    }

    /// The multiplicative inverse.
    #[track_caller]
    pub fn inv(&self) -> Result<Zp, FieldError> {
        let field = self.bound_field();
        match field.try_inv(&self.value) {
            Some(value) => Ok(Zp::from_normalized(field.clone(), value)),
            None => {
                debug!(value = %self.value, "element is not invertible");
                Err(FieldError::NotInvertible {
                    value: self.value.to_string(),
                    modulus: field.get_prime().to_string(),
                })
            }
        }
    }

    /// Set the value to its multiplicative inverse. On failure the value is unchanged.
    #[track_caller]
    pub fn inv_assign(&mut self) -> Result<(), FieldError> {
        *self = self.inv()?;
        Ok(())
    }

    /// Compute `self / other`.
    #[track_caller]
    pub fn try_div(&self, other: &Zp) -> Result<Zp, FieldError> {
        common_field(self, other);
        let inv = other.inv()?;
        Ok(self * &inv)
    }

    /// Set the value to `self / other`. On failure the value is unchanged.
    #[track_caller]
    pub fn try_div_assign(&mut self, other: &Zp) -> Result<(), FieldError> {
        common_field(self, other);
        let inv = other.inv()?;
        *self *= &inv;
        Ok(())
    }

    /// Compute `self^e`, where the exponent is the value of `e` in `[0, p)`.
    /// The exponent is not reduced mod `p - 1`.
    #[track_caller]
    pub fn pow(&self, e: &Zp) -> Zp {
        let field = common_field(self, e);
        Zp::from_normalized(field.clone(), field.pow(&self.value, &e.value))
    }

    /// Set the value to `self^e`.
    #[track_caller]
    pub fn pow_assign(&mut self, e: &Zp) {
        *self = self.pow(e);
    }
}

impl PartialEq for Zp {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.field == other.field
    }
}

impl Eq for Zp {}

impl Hash for Zp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Zp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Zp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Display for Zp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Debug for Zp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} mod {}", self.value, field.get_prime()),
            None => write!(f, "{} (unbound)", self.value),
        }
    }
}

macro_rules! impl_binary_op {
    ($op: ident, $fn: ident, $op_assign: ident, $fn_assign: ident) => {
        impl<'a> $op<&'a Zp> for &'a Zp {
            type Output = Zp;

            #[track_caller]
            fn $fn(self, rhs: &'a Zp) -> Zp {
                let field = common_field(self, rhs);
                Zp::from_normalized(field.clone(), field.$fn(&self.value, &rhs.value))
            }
        }

        impl<'a> $op<&'a Zp> for Zp {
            type Output = Zp;

            #[track_caller]
            fn $fn(mut self, rhs: &'a Zp) -> Zp {
                self.$fn_assign(rhs);
                self
            }
        }

        impl $op<Zp> for Zp {
            type Output = Zp;

            #[track_caller]
            fn $fn(mut self, rhs: Zp) -> Zp {
                self.$fn_assign(&rhs);
                self
            }
        }

        impl<'a> $op<Zp> for &'a Zp {
            type Output = Zp;

            #[track_caller]
            fn $fn(self, rhs: Zp) -> Zp {
                $op::$fn(self, &rhs)
            }
        }

        impl<'a> $op_assign<&'a Zp> for Zp {
            /// Compute into `self`. An unbound receiver adopts the field of `rhs`.
            #[track_caller]
            fn $fn_assign(&mut self, rhs: &'a Zp) {
                let field = common_field(self, rhs).clone();
                field.$fn_assign(&mut self.value, &rhs.value);
                self.field = Some(field);
            }
        }

        impl $op_assign<Zp> for Zp {
            #[track_caller]
            fn $fn_assign(&mut self, rhs: Zp) {
                self.$fn_assign(&rhs);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign);
impl_binary_op!(Sub, sub, SubAssign, sub_assign);
impl_binary_op!(Mul, mul, MulAssign, mul_assign);

impl Neg for Zp {
    type Output = Zp;

    #[track_caller]
    fn neg(mut self) -> Zp {
        self.neg_assign();
        self
    }
}

impl<'a> Neg for &'a Zp {
    type Output = Zp;

    #[track_caller]
    fn neg(self) -> Zp {
        let field = self.bound_field();
        Zp::from_normalized(field.clone(), field.neg(&self.value))
    }
}
