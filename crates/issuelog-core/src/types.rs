//! Core types for issuelog

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Change category an issue is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    /// New functionality
    Added,
    /// Changes to existing functionality
    Changed,
    /// Soon-to-be removed functionality
    Deprecated,
    /// Removed functionality
    Removed,
    /// Bug fixes
    Fixed,
    /// Vulnerability fixes
    Security,
    /// Unlabelled pull request
    PullRequest,
    /// Nothing matched; never rendered
    Unknown,
}

impl ChangeType {
    /// Returns the string representation of the change type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Deprecated => "deprecated",
            Self::Removed => "removed",
            Self::Fixed => "fixed",
            Self::Security => "security",
            Self::PullRequest => "pull-request",
            Self::Unknown => "unknown",
        }
    }

    /// Whether issues of this type may appear in rendered output
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Heading used when none is configured for this type
    pub fn derived_heading(&self) -> String {
        derive_heading(self.as_str())
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let name = lowered.strip_prefix("type_").unwrap_or(&lowered);
        match name {
            "added" => Ok(Self::Added),
            "changed" => Ok(Self::Changed),
            "deprecated" => Ok(Self::Deprecated),
            "removed" => Ok(Self::Removed),
            "fixed" => Ok(Self::Fixed),
            "security" => Ok(Self::Security),
            "pull-request" | "pull_request" | "pr" => Ok(Self::PullRequest),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown change type: {}", s)),
        }
    }
}

/// Build a markdown heading from a change type name.
///
/// Strips a leading `type_` and capitalizes the first character, so
/// `type_security` becomes `### Security`. Never fails; an empty name
/// yields a bare `### `.
pub fn derive_heading(name: &str) -> String {
    let name = name.strip_prefix("type_").unwrap_or(name);
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("### {}", capitalized)
}

/// Insertion-ordered mapping keyed by [`ChangeType`].
///
/// Classification priority and render order both follow the order entries
/// were declared in, so this keeps a list of pairs rather than a hash map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap<V> {
    entries: Vec<(ChangeType, V)>,
}

impl<V> TypeMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value. An existing key keeps its position and gets the new
    /// value; a new key is appended.
    pub fn insert(&mut self, key: ChangeType, value: V) -> Option<V> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a value
    pub fn get(&self, key: ChangeType) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Mutable lookup
    pub fn get_mut(&mut self, key: ChangeType) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: ChangeType) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = ChangeType> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ChangeType, &V)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Keep only the entries matching the predicate
    pub fn retain(&mut self, mut f: impl FnMut(ChangeType, &V) -> bool) {
        self.entries.retain(|(k, v)| f(*k, v));
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lay `overrides` over `self`. Overridden keys stay where they were,
    /// keys new to `self` are appended in the order `overrides` declares them.
    pub fn merged(mut self, overrides: TypeMap<V>) -> Self {
        for (key, value) in overrides {
            self.insert(key, value);
        }
        self
    }
}

impl<V> Default for TypeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(ChangeType, V)> for TypeMap<V> {
    fn from_iter<I: IntoIterator<Item = (ChangeType, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V> IntoIterator for TypeMap<V> {
    type Item = (ChangeType, V);
    type IntoIter = std::vec::IntoIter<(ChangeType, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for TypeMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

struct TypeMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for TypeMapVisitor<V> {
    type Value = TypeMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by change type")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = TypeMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            let change_type: ChangeType = key.parse().map_err(A::Error::custom)?;
            map.insert(change_type, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for TypeMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TypeMapVisitor(PhantomData))
    }
}
