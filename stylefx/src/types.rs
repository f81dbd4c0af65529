use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::casing::to_kebab_case;

/// An addressable node owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A handle returned by the host's timer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(pub u64);

static NEXT_CHAIN_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one animation chain.
///
/// Tokens are drawn from a process-wide counter, so two chains never share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainToken(u64);

impl ChainToken {
    pub fn fresh() -> Self {
        Self(NEXT_CHAIN_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A value held in a node's key/value storage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Str(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// A set of style properties keyed by their hyphen-case name.
///
/// Names are canonicalised on the way in, so `backgroundColor` and `background-color` address the
/// same entry. Iteration is ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StyleMap {
    props: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Inserts a property, returning the value it replaced.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.props
            .insert(to_kebab_case(name).into_owned(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .get(&*to_kebab_case(name))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.props.remove(&*to_kebab_case(name))
    }

    /// Copies every entry of `other` over this map; `other` wins on conflicts.
    pub fn merge(&mut self, other: &StyleMap) {
        for (name, value) in &other.props {
            self.props.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> StyleMapIter<'_> {
        StyleMapIter {
            inner: self.props.iter(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }
}

/// Iterator over `(name, value)` pairs of a [`StyleMap`].
pub struct StyleMapIter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for StyleMapIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a str, &'a str);
    type IntoIter = StyleMapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for StyleMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>, const N: usize> From<[(K, V); N]> for StyleMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
