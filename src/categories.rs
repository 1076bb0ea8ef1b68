//! Category Sets
//!
//! A sorted, de-duplicated set of category identifiers used both for an
//! order line's category memberships and a rule's target categories.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ids::CategoryId;

/// A set of categories backed by a sorted `SmallVec`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CategoryId>", into = "Vec<CategoryId>")]
pub struct CategorySet {
    categories: SmallVec<[CategoryId; 3]>,
}

impl CategorySet {
    /// Create a new category set, sorting and removing duplicates.
    #[must_use]
    pub fn new(categories: SmallVec<[CategoryId; 3]>) -> Self {
        let mut set = Self { categories };

        set.categories.sort();
        set.categories.dedup();

        set
    }

    /// Create an empty category set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a category set from string slices.
    pub fn from_strs(categories: &[&str]) -> Self {
        Self::new(categories.iter().copied().map(CategoryId::from).collect())
    }

    /// Check if this set shares at least one category with `other`.
    pub fn intersects(&self, other: &Self) -> bool {
        // Both sides are sorted, so walk them together.
        let mut left = self.categories.iter();
        let mut right = other.categories.iter();
        let mut left_id = left.next();
        let mut right_id = right.next();

        while let (Some(l), Some(r)) = (left_id, right_id) {
            match l.cmp(r) {
                Ordering::Equal => return true,
                Ordering::Less => left_id = left.next(),
                Ordering::Greater => right_id = right.next(),
            }
        }

        false
    }

    /// Check if the set contains a category.
    pub fn contains(&self, category: &CategoryId) -> bool {
        self.categories.binary_search(category).is_ok()
    }

    /// Iterate over the categories in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter()
    }

    /// Number of categories in the set.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<Vec<CategoryId>> for CategorySet {
    fn from(categories: Vec<CategoryId>) -> Self {
        Self::new(categories.into_iter().collect())
    }
}

impl From<CategorySet> for Vec<CategoryId> {
    fn from(set: CategorySet) -> Self {
        set.categories.into_vec()
    }
}

impl FromIterator<CategoryId> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
