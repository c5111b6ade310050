//! Item identity shared by both price sources.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Product ids with this prefix keep their underscores when normalized.
const ENCHANTMENT_PREFIX: &str = "enchantment_";

/// Item name with a canonical lookup key.
///
/// The bazaar reports product ids (`ENCHANTED_COAL`) while the auction house
/// and players use display names (`Enchanted Coal`). Both normalize to the same
/// key, so the key is what equality, ordering and hashing use. The caller's
/// trimmed spelling is kept for display only.
#[derive(Debug, Clone)]
pub struct ItemName {
    display: String,
    key: String,
}

impl ItemName {
    /// Create an item name from any spelling.
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into().trim().to_string();
        let key = normalize(&display);
        Self { display, key }
    }

    /// The name as the caller spelled it (trimmed).
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The canonical join key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the name normalizes to nothing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.key.is_empty()
    }
}

/// Canonical form of an item name.
///
/// Lowercases, turns `_` into spaces (except for enchantment product ids)
/// and collapses whitespace. Applying it twice yields the same string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let spaced = if lowered.starts_with(ENCHANTMENT_PREFIX) {
        lowered
    } else {
        lowered.replace('_', " ")
    };
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl PartialEq for ItemName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ItemName {}

impl Hash for ItemName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for ItemName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl From<String> for ItemName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ItemName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for ItemName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for ItemName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
