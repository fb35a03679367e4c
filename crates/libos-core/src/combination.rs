//! Key combinations (chords).
//!
//! A [`KeyCombination`] is an owned *set* of [`VirtualKey`]s: adding a key
//! twice has no effect, and iteration always follows the `VirtualKey`
//! declaration order regardless of insertion order.  Press and release
//! operations walk the set in that order.
//!
//! ```
//! use libos_core::{KeyCombination, VirtualKey};
//!
//! let mut chord = VirtualKey::Ctrl + VirtualKey::Shift;
//! chord += VirtualKey::T;
//! assert_eq!(chord.to_string(), "ControlLeft+ShiftLeft+T");
//! assert_eq!("ctrl + shift + t".parse::<KeyCombination>(), Ok(chord));
//! ```

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::keys::{ParseKeyError, VirtualKey};

/// An unordered, duplicate-free set of virtual keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCombination {
    keys: BTreeSet<VirtualKey>,
}

impl KeyCombination {
    /// Creates an empty combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a combination holding exactly the given keys.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = VirtualKey>,
    {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Adds every key of `other` to `self` and returns `self` for chaining.
    pub fn append(&mut self, other: impl Into<KeyCombination>) -> &mut Self {
        self.keys.extend(other.into().keys);
        self
    }

    /// Adds a single key; returns `false` if it was already present.
    pub fn insert(&mut self, key: VirtualKey) -> bool {
        self.keys.insert(key)
    }

    /// Removes a key; returns `false` if it was not present.
    pub fn remove(&mut self, key: VirtualKey) -> bool {
        self.keys.remove(&key)
    }

    pub fn contains(&self, key: VirtualKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if every key of `self` is also in `other`.
    pub fn is_subset(&self, other: &KeyCombination) -> bool {
        self.keys.is_subset(&other.keys)
    }

    /// Iterates the keys in `VirtualKey` declaration order.
    pub fn iter(&self) -> impl Iterator<Item = VirtualKey> + '_ {
        self.keys.iter().copied()
    }
}

impl From<VirtualKey> for KeyCombination {
    fn from(key: VirtualKey) -> Self {
        Self::from_keys([key])
    }
}

impl<const N: usize> From<[VirtualKey; N]> for KeyCombination {
    fn from(keys: [VirtualKey; N]) -> Self {
        Self::from_keys(keys)
    }
}

impl From<&KeyCombination> for KeyCombination {
    fn from(combo: &KeyCombination) -> Self {
        combo.clone()
    }
}

impl FromIterator<VirtualKey> for KeyCombination {
    fn from_iter<I: IntoIterator<Item = VirtualKey>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl Extend<VirtualKey> for KeyCombination {
    fn extend<I: IntoIterator<Item = VirtualKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl IntoIterator for KeyCombination {
    type Item = VirtualKey;
    type IntoIter = btree_set::IntoIter<VirtualKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyCombination {
    type Item = VirtualKey;
    type IntoIter = std::iter::Copied<btree_set::Iter<'a, VirtualKey>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter().copied()
    }
}

// ── Algebra ──────────────────────────────────────────────────────────────────

impl Add for VirtualKey {
    type Output = KeyCombination;

    fn add(self, rhs: VirtualKey) -> KeyCombination {
        KeyCombination::from_keys([self, rhs])
    }
}

impl Add<KeyCombination> for VirtualKey {
    type Output = KeyCombination;

    fn add(self, mut rhs: KeyCombination) -> KeyCombination {
        rhs.insert(self);
        rhs
    }
}

impl<T: Into<KeyCombination>> Add<T> for KeyCombination {
    type Output = KeyCombination;

    fn add(mut self, rhs: T) -> KeyCombination {
        self.append(rhs);
        self
    }
}

impl<T: Into<KeyCombination>> Add<T> for &KeyCombination {
    type Output = KeyCombination;

    fn add(self, rhs: T) -> KeyCombination {
        let mut sum = self.clone();
        sum.append(rhs);
        sum
    }
}

impl<T: Into<KeyCombination>> AddAssign<T> for KeyCombination {
    fn add_assign(&mut self, rhs: T) {
        self.append(rhs);
    }
}

// ── Text form ────────────────────────────────────────────────────────────────

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for key in self.iter() {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(key.name())?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for KeyCombination {
    type Err = ParseKeyError;

    /// Parses `"Ctrl+Shift+T"`-style text.  An empty (or blank) string is
    /// the empty combination.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        s.split('+')
            .map(|segment| {
                if segment.trim().is_empty() {
                    Err(ParseKeyError::EmptySegment(s.to_string()))
                } else {
                    segment.parse::<VirtualKey>()
                }
            })
            .collect()
    }
}
