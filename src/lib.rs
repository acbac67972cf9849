//! Conflux provides the finite field arithmetic and field element sets used by
//! set reconciliation in the style of Minsky, Trachtenberg and Zippel.
//!
//! Two peers that select the same field can map their values, for example key
//! fingerprints, to [Zp] elements, collect them in a [ZSet] and use set operations
//! and field arithmetic to find what the other side is missing.
//!
//! For example:
//!
//! ```
//! use conflux::{domains::modulus::P_SKS, Zp, ZSet};
//!
//! let a: ZSet = (1..=3).map(|i| Zp::from_i64(&P_SKS, i)).collect();
//! let b: ZSet = [Zp::parse(&P_SKS, "2").unwrap()].into_iter().collect();
//!
//! let missing = a.difference(&b);
//! assert_eq!(missing.len(), 2);
//!
//! let x = Zp::from_i64(&P_SKS, 7);
//! let y = Zp::from_i64(&P_SKS, 5);
//! assert_eq!(x.try_div(&y).unwrap() * &y, x);
//! ```
pub mod domains;
pub mod error;
pub mod zset;

pub use domains::finite_field::FiniteField;
pub use domains::modulus::Strength;
pub use domains::zp::Zp;
pub use error::FieldError;
pub use zset::ZSet;
