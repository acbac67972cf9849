//! Modular rings `Z / pZ` over arbitrary-precision moduli.

use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use rug::integer::{IsPrime, Order};
use rug::{Complete, Integer as MultiPrecisionInteger};
use tracing::trace;

use super::{Field, Ring};
use crate::error::FieldError;

/// Number of Miller-Rabin rounds used by [FiniteField::is_prime].
const PRIMALITY_REPS: u32 = 30;

/// The modular ring `Z / pZ`, where `p` can be any integer larger than 1. In most cases,
/// `p` will be a prime, and the domain will be a field.
///
/// Elements are [rug::Integer]s in the standard representation `[0, p)`. The modulus
/// is shared behind an [Arc], so cloning a field is cheap and two clones compare
/// equal by pointer before falling back to comparing values.
#[derive(Clone)]
pub struct FiniteField {
    p: Arc<MultiPrecisionInteger>,
}

impl FiniteField {
    /// Create a new modular ring with modulus `p`. The modulus is not checked for primality,
    /// use [FiniteField::is_prime] for that.
    pub fn new(p: MultiPrecisionInteger) -> Result<FiniteField, FieldError> {
        if p <= 1 {
            return Err(FieldError::InvalidModulus(p.to_string()));
        }

        trace!(bits = p.significant_bits(), "new finite field");
        Ok(FiniteField { p: Arc::new(p) })
    }

    /// Create a field from a modulus known to be valid.
    pub(crate) fn from_prime(p: MultiPrecisionInteger) -> FiniteField {
        debug_assert!(p > 1);
        FiniteField { p: Arc::new(p) }
    }

    /// Create a field from the big-endian bytes of its modulus.
    pub(crate) fn from_be_bytes(bytes: &[u8]) -> FiniteField {
        Self::from_prime(MultiPrecisionInteger::from_digits(bytes, Order::Msf))
    }

    pub fn get_prime(&self) -> &MultiPrecisionInteger {
        &self.p
    }

    /// The bit length of the modulus.
    pub fn bits(&self) -> u32 {
        self.p.significant_bits()
    }

    /// Probabilistic primality test of the modulus.
    pub fn is_prime(&self) -> bool {
        self.p.is_probably_prime(PRIMALITY_REPS) != IsPrime::No
    }

    /// Convert any integer to its representative in `[0, p)`.
    pub fn to_element(&self, mut a: MultiPrecisionInteger) -> MultiPrecisionInteger {
        self.normalize_mut(&mut a);
        a
    }

    #[inline(always)]
    fn normalize_mut(&self, c: &mut MultiPrecisionInteger) {
        *c %= &*self.p;
        if *c < 0 {
            *c += &*self.p;
        }
    }

    /// Reduce a value known to lie in `[0, 2p)`.
    #[inline(always)]
    fn reduce_once(&self, c: &mut MultiPrecisionInteger) {
        if *c >= *self.p {
            *c -= &*self.p;
        }
    }

    /// Returns `true` if both fields share the same modulus allocation or value.
    pub fn same_field(&self, other: &FiniteField) -> bool {
        Arc::ptr_eq(&self.p, &other.p) || self.p == other.p
    }

    /// Panic with a field mismatch if `other` is a different field.
    #[track_caller]
    pub(crate) fn assert_same(&self, other: &FiniteField) {
        if !self.same_field(other) {
            panic!("{}", self.mismatch(other));
        }
    }

    pub(crate) fn mismatch(&self, actual: &FiniteField) -> FieldError {
        FieldError::FieldMismatch {
            expected: self.p.to_string(),
            actual: actual.p.to_string(),
        }
    }
}

impl PartialEq for FiniteField {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_field(other)
    }
}

impl Eq for FiniteField {}

impl Hash for FiniteField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.p.hash(state);
    }
}

impl Debug for FiniteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z({})", self.p)
    }
}

impl Display for FiniteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z({})", self.p)
    }
}

impl FromStr for FiniteField {
    type Err = FieldError;

    /// Parse a base-10 modulus.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p = parse_decimal(s)?;
        FiniteField::new(p)
    }
}

/// Parse a base-10 integer literal with an optional sign.
pub(crate) fn parse_decimal(s: &str) -> Result<MultiPrecisionInteger, FieldError> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::InvalidInteger(s.to_owned()));
    }

    MultiPrecisionInteger::from_str_radix(s, 10)
        .map_err(|_| FieldError::InvalidInteger(s.to_owned()))
}

impl Ring for FiniteField {
    type Element = MultiPrecisionInteger;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut r = (a + b).complete();
        self.reduce_once(&mut r);
        r
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut r = (a - b).complete();
        if r < 0 {
            r += &*self.p;
        }
        r
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut r = (a * b).complete();
        self.normalize_mut(&mut r);
        r
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
        self.reduce_once(a);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
        if *a < 0 {
            *a += &*self.p;
        }
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
        self.normalize_mut(a);
    }

    /// Computes `-a mod p`.
    fn neg(&self, a: &Self::Element) -> Self::Element {
        if *a == 0 {
            a.clone()
        } else {
            (&*self.p - a).complete()
        }
    }

    fn zero(&self) -> Self::Element {
        MultiPrecisionInteger::new()
    }

    fn one(&self) -> Self::Element {
        MultiPrecisionInteger::from(1)
    }

    /// Compute `b^e mod p`. The exponent is used as is: it is not reduced mod `p - 1`.
    fn pow(&self, b: &Self::Element, e: &Self::Element) -> Self::Element {
        match b.pow_mod_ref(e, &self.p) {
            Some(r) => MultiPrecisionInteger::from(r),
            None => unreachable!("exponent {} is negative", e),
        }
    }

    fn is_zero(&self, a: &Self::Element) -> bool {
        *a == 0
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn characteristic(&self) -> &MultiPrecisionInteger {
        &self.p
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        self.try_inv(b).map(|r| self.mul(a, &r))
    }

    /// Rejection sampling over `bits(p)`-bit candidates, so that every
    /// element of `[0, p)` is equally likely.
    fn sample(&self, rng: &mut impl rand::RngCore) -> Self::Element {
        let bits = self.bits();
        let nbytes = bits.div_ceil(8) as usize;
        let mask = 0xffu8 >> (nbytes as u32 * 8 - bits);
        let mut buf = vec![0u8; nbytes];

        loop {
            rng.fill_bytes(&mut buf);
            // little-endian: the last byte is the most significant
            if let Some(high) = buf.last_mut() {
                *high &= mask;
            }

            let r = MultiPrecisionInteger::from_digits(&buf, Order::Lsf);
            if r < *self.p {
                return r;
            }

            trace!("rejected random candidate");
        }
    }
}

impl Field for FiniteField {
    /// Compute the inverse when `a` and the modulus are coprime.
    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element> {
        if *a == 0 {
            return None;
        }

        a.invert_ref(&self.p).map(MultiPrecisionInteger::from)
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};
    use rug::Integer;

    use super::FiniteField;
    use crate::domains::{Field, Ring};
    use crate::error::FieldError;

    fn field(p: i64) -> FiniteField {
        FiniteField::new(Integer::from(p)).unwrap()
    }

    #[test]
    fn arithmetic() {
        let f = field(11);
        let x = Integer::from(7);
        let y = Integer::from(5);

        assert_eq!(f.add(&x, &y), 1);
        assert_eq!(f.sub(&y, &x), 9);
        assert_eq!(f.mul(&x, &y), 2);
        assert_eq!(f.neg(&x), 4);
        assert_eq!(f.neg(&f.zero()), 0);
        assert_eq!(f.try_inv(&y), Some(Integer::from(9)));
        assert_eq!(f.try_div(&x, &y), Some(Integer::from(8)));
        assert_eq!(f.try_div(&x, &f.zero()), None);
        assert!(f.is_one(&f.mul(&y, &Integer::from(9))));
        assert!(f.is_zero(&f.add(&x, &Integer::from(4))));
        assert_eq!(*f.characteristic(), 11);
    }

    #[test]
    fn assign_ops() {
        let f = field(11);
        let mut a = Integer::from(10);
        f.add_assign(&mut a, &Integer::from(10));
        assert_eq!(a, 9);
        f.sub_assign(&mut a, &Integer::from(10));
        assert_eq!(a, 10);
        f.mul_assign(&mut a, &Integer::from(10));
        assert_eq!(a, 1);
    }

    #[test]
    fn pow() {
        let f = field(31);

        let mut q = f.one();
        let x = Integer::from(3);
        for i in 0..100 {
            let r = f.pow(&x, &Integer::from(i));
            assert_eq!(r, q);
            q = f.mul(&q, &x);
        }
    }

    #[test]
    fn non_prime() {
        let f = field(27);
        assert!(!f.is_prime());
        assert_eq!(f.mul(&Integer::from(13), &Integer::from(5)), 11);
        assert_eq!(f.try_inv(&Integer::from(3)), None);
        assert_eq!(f.try_inv(&Integer::from(2)), Some(Integer::from(14)));
    }

    #[test]
    fn invalid_modulus() {
        assert_eq!(
            FiniteField::new(Integer::from(1)),
            Err(FieldError::InvalidModulus("1".to_owned()))
        );
        assert!("12x".parse::<FiniteField>().is_err());
        assert_eq!("11".parse::<FiniteField>().unwrap(), field(11));
    }

    #[test]
    fn sample_is_in_range() {
        let f = field(11);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 11];
        for _ in 0..1000 {
            let r = f.sample(&mut rng);
            assert!(r >= 0 && r < 11);
            seen[r.to_usize().unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
