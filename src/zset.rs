//! Sets of finite field elements.

use std::fmt::{Display, Formatter};

use ahash::{HashSet, HashSetExt};
use rug::Integer as MultiPrecisionInteger;
use tracing::{debug, instrument};

use crate::domains::finite_field::FiniteField;
use crate::domains::zp::Zp;
use crate::error::FieldError;

/// A set of integers in a finite field.
///
/// Membership is decided by the normalized value, so elements built from bytes,
/// decimal strings or arithmetic results are the same member when their values agree.
/// An empty set has no field; it adopts the field of the first element inserted,
/// or of the set passed to a bulk operation.
#[derive(Clone, Debug, Default)]
pub struct ZSet {
    items: HashSet<MultiPrecisionInteger>,
    field: Option<FiniteField>,
}

impl ZSet {
    pub fn new() -> ZSet {
        ZSet::default()
    }

    pub fn with_capacity(capacity: usize) -> ZSet {
        ZSet {
            items: HashSet::with_capacity(capacity),
            field: None,
        }
    }

    pub fn from_slice(elements: &[Zp]) -> ZSet {
        let mut zs = ZSet::with_capacity(elements.len());
        zs.insert_all(elements);
        zs
    }

    /// The field shared by all members, if it has been fixed.
    pub fn field(&self) -> Option<&FiniteField> {
        self.field.as_ref()
    }

    /// Check that the members of this set belong to `field`. A set without a field
    /// accepts any field.
    pub fn check_field(&self, field: &FiniteField) -> Result<(), FieldError> {
        match &self.field {
            Some(f) if !f.same_field(field) => Err(field.mismatch(f)),
            _ => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The number of members, where an absent set is empty.
    pub fn size_of(set: Option<&ZSet>) -> usize {
        set.map_or(0, ZSet::len)
    }

    /// Fix the field of the set, or assert that it matches.
    #[track_caller]
    fn adopt(&mut self, field: &FiniteField) {
        match &self.field {
            Some(f) => f.assert_same(field),
            None => self.field = Some(field.clone()),
        }
    }

    /// Add an element to the set.
    #[track_caller]
    pub fn insert(&mut self, v: &Zp) {
        self.adopt(v.bound_field());
        self.items.insert(v.value().clone());
    }

    /// Remove an element from the set, returning whether it was a member.
    pub fn remove(&mut self, v: &Zp) -> bool {
        self.items.remove(v.value())
    }

    /// Returns whether the set contains the given element as a member.
    pub fn contains(&self, v: &Zp) -> bool {
        self.items.contains(v.value())
    }

    /// Add all the given elements to the set.
    #[track_caller]
    pub fn insert_all<'a>(&mut self, elements: impl IntoIterator<Item = &'a Zp>) {
        for v in elements {
            self.insert(v);
        }
    }

    /// Add all elements of another set.
    #[track_caller]
    pub fn union_with(&mut self, other: &ZSet) {
        if let Some(f) = &other.field {
            self.adopt(f);
        }
        self.items.extend(other.items.iter().cloned());
    }

    /// Remove all the given elements from the set.
    pub fn remove_all<'a>(&mut self, elements: impl IntoIterator<Item = &'a Zp>) {
        for v in elements {
            self.remove(v);
        }
    }

    /// Remove all elements of another set from this one.
    pub fn subtract(&mut self, other: &ZSet) {
        if self.field.is_none() {
            self.field = other.field.clone();
        }

        if other.len() < self.len() {
            for v in &other.items {
                self.items.remove(v);
            }
        } else {
            self.items.retain(|v| !other.items.contains(v));
        }
    }

    /// The set of all elements in `self` that are not in `other`.
    #[instrument(level = "trace", skip_all, fields(a = self.len(), b = other.len()))]
    pub fn difference(&self, other: &ZSet) -> ZSet {
        let items: HashSet<_> = self
            .items
            .iter()
            .filter(|v| !other.items.contains(*v))
            .cloned()
            .collect();

        debug!(len = items.len(), "set difference");

        ZSet {
            items,
            field: self.field.clone().or_else(|| other.field.clone()),
        }
    }

    /// The set of all elements in `self` or in `other`.
    #[track_caller]
    pub fn union(&self, other: &ZSet) -> ZSet {
        let mut r = self.clone();
        r.union_with(other);
        r
    }

    /// An iterator over the members, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Zp> + '_ {
        self.field.iter().flat_map(move |f| {
            self.items
                .iter()
                .map(move |v| Zp::from_normalized(f.clone(), v.clone()))
        })
    }

    /// A snapshot of all members, in unspecified order.
    pub fn items(&self) -> Vec<Zp> {
        self.iter().collect()
    }
}

/// The set of all elements in `a` that are not in `b`.
pub fn zset_difference(a: &ZSet, b: &ZSet) -> ZSet {
    a.difference(b)
}

impl PartialEq for ZSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|v| other.items.contains(v))
    }
}

impl Eq for ZSet {}

impl Display for ZSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(v, f)?;
        }
        f.write_str("}")
    }
}

impl FromIterator<Zp> for ZSet {
    fn from_iter<I: IntoIterator<Item = Zp>>(iter: I) -> Self {
        let mut zs = ZSet::new();
        zs.extend(iter);
        zs
    }
}

impl<'a> FromIterator<&'a Zp> for ZSet {
    fn from_iter<I: IntoIterator<Item = &'a Zp>>(iter: I) -> Self {
        let mut zs = ZSet::new();
        zs.insert_all(iter);
        zs
    }
}

impl Extend<Zp> for ZSet {
    fn extend<I: IntoIterator<Item = Zp>>(&mut self, iter: I) {
        for v in iter {
            self.insert(&v);
        }
    }
}
