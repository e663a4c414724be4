//! Typed composite keys joining the flat record collections.
//!
//! The institutional feed links records by concatenated code strings; here
//! every join runs through a structured key so "AB"+"C" and "A"+"BC" can
//! never collide.

use std::fmt;
use std::hash::Hash;

use generational_arena::Index;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identity of a programme or course: subject-area code, area period,
/// academic period. Also the type of a course's parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AosKey {
    pub aos_code: String,
    pub aos_period: String,
    pub acad_period: String,
}

impl AosKey {
    pub fn new(
        aos_code: impl Into<String>,
        aos_period: impl Into<String>,
        acad_period: impl Into<String>,
    ) -> Self {
        Self {
            aos_code: aos_code.into(),
            aos_period: aos_period.into(),
            acad_period: acad_period.into(),
        }
    }
}

impl fmt::Display for AosKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.aos_code, self.aos_period, self.acad_period)
    }
}

/// Identity of a unit: subject-area link code plus the linked periods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitKey {
    pub aos_link_code: String,
    pub link_aos_period: String,
    pub link_period: String,
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.aos_link_code, self.link_aos_period, self.link_period
        )
    }
}

/// Year-independent grouping key for the "all years" pass: the area period
/// is reduced to its first two characters, dropping the year suffix that
/// distinguishes one course year from the next.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearGroupKey {
    pub aos_code: String,
    pub period_prefix: String,
    pub acad_period: String,
}

impl YearGroupKey {
    pub fn of(key: &AosKey) -> Self {
        Self {
            aos_code: key.aos_code.clone(),
            period_prefix: key.aos_period.chars().take(2).collect(),
            acad_period: key.acad_period.clone(),
        }
    }
}

impl fmt::Display for YearGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.aos_code, self.period_prefix, self.acad_period
        )
    }
}

/// Insertion-ordered index from composite key to arena node.
///
/// Duplicate keys overwrite in place: the later record wins and the original
/// position is kept. This mirrors a source-data assumption and is not an
/// error.
#[derive(Debug)]
pub struct CodeIndex<K> {
    entries: IndexMap<K, Index>,
}

impl<K: Eq + Hash> Default for CodeIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> CodeIndex<K> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert a key, returning the previously indexed node if the key was
    /// already present.
    pub fn insert(&mut self, key: K, node: Index) -> Option<Index> {
        self.entries.insert(key, node)
    }

    pub fn get(&self, key: &K) -> Option<Index> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Index)> {
        self.entries.iter().map(|(k, &v)| (k, v))
    }
}
