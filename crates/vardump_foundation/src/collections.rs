//! Ordered collections with structural sharing.
//!
//! These are thin wrappers around the `im` crate's persistent data structures.
//! Both preserve the order in which elements were added; a dump never reorders
//! a container.

use std::fmt;
use std::iter::FromIterator;
use std::rc::Rc;

use crate::value::Value;

// =============================================================================
// Seq
// =============================================================================

/// Ordered sequence of values.
///
/// Cloning is O(1). Modifications return a new sequence sharing structure
/// with the original.
#[derive(Clone, Default, PartialEq)]
pub struct Seq(im::Vector<Value>);

impl Seq {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets an element by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Returns a new sequence with the element appended.
    #[must_use]
    pub fn push_back(&self, value: impl Into<Value>) -> Self {
        let mut new = self.0.clone();
        new.push_back(value.into());
        Self(new)
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.iter()
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: Into<Value>> FromIterator<V> for Seq {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = &'a Value;
    type IntoIter = im::vector::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Key
// =============================================================================

/// Mapping key.
///
/// Keys keep their original form: an integer key stays an integer even though
/// it renders as decimal text. A string holding a canonical decimal integer
/// (`"7"`, `"-3"`, but not `"07"` or `"+3"`) is the integer key, so the two
/// spellings always share one entry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer key.
    Int(i64),
    /// String key.
    Str(Rc<str>),
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl Key {
    /// Returns the key in canonical form.
    #[must_use]
    pub fn normalized(self) -> Self {
        let int = match &self {
            Self::Str(s) => decimal(s),
            Self::Int(_) => None,
        };
        int.map_or(self, Self::Int)
    }
}

/// Parses `s` if it is exactly the decimal text of an `i64`.
fn decimal(s: &str) -> Option<i64> {
    let n: i64 = s.parse().ok()?;
    (n.to_string() == s).then_some(n)
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        decimal(s).map_or_else(|| Self::Str(s.into()), Self::Int)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        decimal(&s).map_or_else(|| Self::Str(s.into()), Self::Int)
    }
}

// =============================================================================
// Dict
// =============================================================================

/// Insertion-ordered mapping from [`Key`] to [`Value`].
///
/// Re-inserting an existing key replaces its value without moving it.
#[derive(Clone, Default)]
pub struct Dict {
    entries: im::Vector<(Key, Value)>,
    index: im::HashMap<Key, usize>,
}

impl Dict {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        let slot = self.slot(key)?;
        self.entries.get(slot).map(|(_, v)| v)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.slot(key).is_some()
    }

    fn slot(&self, key: &Key) -> Option<usize> {
        self.index.get(&key.clone().normalized()).copied()
    }

    /// Returns a new mapping with the entry inserted or replaced.
    #[must_use]
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        let mut new = self.clone();
        new.insert_mut(key.into(), value.into());
        new
    }

    fn insert_mut(&mut self, key: Key, value: Value) {
        let key = key.normalized();
        if let Some(&slot) = self.index.get(&key) {
            self.entries.set(slot, (key, value));
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push_back((key, value));
        }
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns an iterator over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.insert_mut(k.into(), v.into());
        }
        dict
    }
}
