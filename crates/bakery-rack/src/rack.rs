use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use bakery_types::{Cake, CakeKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::canonical;
use crate::error::{RackError, RackResult};

/// A sorted, name-keyed collection of optional cakes.
///
/// Entries whose value is `None` are unresolved: the name is reserved but the
/// content it points to is not known yet.
///
/// Equality is content equality: two racks are equal iff their canonical
/// bytes are equal, regardless of how they were built.
#[derive(Clone, Default)]
pub struct CakeRack {
    entries: BTreeMap<String, Option<Cake>>,
    cache: RackCache,
}

/// Lazily derived values, dropped wholesale on mutation.
#[derive(Clone, Debug, Default)]
struct RackCache {
    canonical: OnceLock<Vec<u8>>,
    cake: OnceLock<Cake>,
    names_by_cake: OnceLock<HashMap<Cake, String>>,
    fully_resolved: OnceLock<bool>,
}

impl CakeRack {
    /// Create an empty rack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rack from parallel name and value sequences.
    ///
    /// Names may come in any order. Fails if the sequences differ in length
    /// or a name repeats.
    pub fn from_parts(names: Vec<String>, values: Vec<Option<Cake>>) -> RackResult<Self> {
        if names.len() != values.len() {
            return Err(RackError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        let mut entries = BTreeMap::new();
        for (name, value) in names.into_iter().zip(values) {
            if entries.contains_key(&name) {
                return Err(RackError::DuplicateName(name));
            }
            entries.insert(name, value);
        }
        Ok(Self {
            entries,
            cache: RackCache::default(),
        })
    }

    /// Decode a rack from its canonical bytes.
    pub fn parse(bytes: &[u8]) -> RackResult<Self> {
        let (names, values) = canonical::decode(bytes)?;
        let rack = Self::from_parts(names, values)?;
        debug!(entries = rack.len(), "decoded cake rack");
        Ok(rack)
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Insert or overwrite the entry for `name`.
    pub fn set(&mut self, name: impl Into<String>, value: Option<Cake>) {
        self.entries.insert(name.into(), value);
        self.invalidate();
    }

    /// Remove the entry for `name`, returning its previous value.
    ///
    /// Returns [`RackError::NotFound`] if the name is absent; the rack is
    /// left untouched in that case.
    pub fn remove(&mut self, name: &str) -> RackResult<Option<Cake>> {
        let value = self
            .entries
            .remove(name)
            .ok_or_else(|| RackError::NotFound(name.to_string()))?;
        self.invalidate();
        Ok(value)
    }

    fn invalidate(&mut self) {
        self.cache = RackCache::default();
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// The cake stored under `name`.
    ///
    /// `None` both when the name is absent and when its entry is unresolved;
    /// use [`contains`](Self::contains) to tell the two apart.
    pub fn get(&self, name: &str) -> Option<&Cake> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Returns `true` if the rack has an entry (resolved or not) for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the rack has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted entry names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Entry names in sorted order, borrowed.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Option<Cake>> {
        self.entries.keys()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Cake>)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Resolved values in name order.
    pub fn cakes(&self) -> impl Iterator<Item = &Cake> + '_ {
        self.entries.values().flatten()
    }

    /// Name of an entry holding `cake`.
    ///
    /// When several names hold the same cake, the lexicographically last one
    /// is returned: the inverse map is filled in name order and later names
    /// overwrite earlier ones.
    pub fn lookup_name_by_hash(&self, cake: &Cake) -> Option<&str> {
        self.cache
            .names_by_cake
            .get_or_init(|| {
                self.entries
                    .iter()
                    .filter_map(|(name, value)| value.map(|hash| (hash, name.clone())))
                    .collect()
            })
            .get(cake)
            .map(String::as_str)
    }

    // ---------------------------------------------------------------
    // Derived values
    // ---------------------------------------------------------------

    /// Canonical serialization of this rack.
    pub fn canonical_bytes(&self) -> &[u8] {
        self.cache
            .canonical
            .get_or_init(|| canonical::encode(&self.entries))
    }

    /// Length of the canonical serialization in bytes.
    pub fn size(&self) -> usize {
        self.canonical_bytes().len()
    }

    /// The rack's own identity: folder cake of its canonical bytes.
    pub fn content_hash(&self) -> Cake {
        *self
            .cache
            .cake
            .get_or_init(|| Cake::from_bytes(self.canonical_bytes(), CakeKind::Folder))
    }

    /// Returns `true` if no entry is unresolved.
    pub fn is_fully_resolved(&self) -> bool {
        *self
            .cache
            .fully_resolved
            .get_or_init(|| self.entries.values().all(Option::is_some))
    }
}

impl PartialEq for CakeRack {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bytes() == other.canonical_bytes()
    }
}

impl Eq for CakeRack {}

impl fmt::Debug for CakeRack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for CakeRack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.canonical_bytes()))
    }
}

impl FromStr for CakeRack {
    type Err = RackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

impl Serialize for CakeRack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        let values: Vec<Option<&Cake>> = self.entries.values().map(Option::as_ref).collect();
        (names, values).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CakeRack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (names, values) = <(Vec<String>, Vec<Option<Cake>>)>::deserialize(deserializer)?;
        Self::from_parts(names, values).map_err(serde::de::Error::custom)
    }
}
