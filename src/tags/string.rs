//! String-based Tag Collection
//!
//! A `SmallVec<[String; 5]>`-backed implementation of [`TagCollection`].
//! Tags are kept sorted and deduplicated so membership checks stay binary
//! searches and intersection stays a linear merge.

use std::{cmp::Ordering, string::ToString};

use smallvec::SmallVec;

use crate::tags::collection::TagCollection;

/// A string tag collection, sorted and deduplicated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StringTagCollection {
    tags: SmallVec<[String; 5]>,
}

impl StringTagCollection {
    /// Create a new string tag collection from a vector of strings.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a new string tag collection from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(
            tags.iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 5]>>(),
        )
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl TagCollection for StringTagCollection {
    fn empty() -> Self {
        Self {
            tags: SmallVec::with_capacity(0),
        }
    }

    fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search(&tag.to_string()).is_ok()
    }

    fn contains_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();

        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn intersects(&self, other: &Self) -> bool {
        // Two pointers over the sorted vectors, O(n + m).
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_tag_ref), Some(right_tag_ref)) = (left_tag, right_tag) {
            match left_tag_ref.cmp(right_tag_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn len(&self) -> usize {
        self.tags.len()
    }

    fn add(&mut self, tag: &str) {
        let tag_string = tag.to_string();

        if let Err(pos) = self.tags.binary_search(&tag_string) {
            self.tags.insert(pos, tag_string);
        }
    }

    fn remove(&mut self, tag: &str) {
        let tag_string = tag.to_string();

        if let Ok(pos) = self.tags.binary_search(&tag_string) {
            self.tags.remove(pos);
        }
    }
}
