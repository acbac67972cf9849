//! Defines the algebraic traits and the finite field domain used for reconciliation.
//!
//! The core trait is [Ring], which has two binary operations, addition and multiplication.
//! Each ring has an associated element type, that should not be confused with the ring type itself.
//! The finite field [FiniteField](finite_field::FiniteField) has elements of type [rug::Integer],
//! kept in the standard representation `[0, p)`.
//!
//! The ring elements do not implement operations such as addition or multiplication,
//! but rather the ring itself does. [Zp](zp::Zp) pairs a value with its field and
//! forwards every operation to the field after checking that both operands agree.
//!
//! An extension of the ring trait is the [`Field`] trait, which adds the ability to divide and invert elements.
pub mod finite_field;
pub mod modulus;
pub mod zp;

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A ring is a set with two binary operations, addition and multiplication.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug + Display {
    /// The element of a ring. For a [FiniteField](finite_field::FiniteField) this is
    /// an integer in `[0, p)`.
    type Element: Clone + PartialEq + Eq + Hash + Debug;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Compute `b^e`, where the exponent is itself an element of the ring.
    fn pow(&self, b: &Self::Element, e: &Self::Element) -> Self::Element;
    fn is_zero(&self, a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
    fn characteristic(&self) -> &rug::Integer;

    /// Return the result of dividing `a` by `b`, if possible and if the result is unique.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element>;

    /// Sample an element uniformly from the ring.
    fn sample(&self, rng: &mut impl rand::RngCore) -> Self::Element;
}

/// A field is a ring that supports division and inversion.
///
/// For a modular ring with a composite modulus only the units are invertible,
/// so inversion is fallible.
pub trait Field: Ring {
    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element>;
}
