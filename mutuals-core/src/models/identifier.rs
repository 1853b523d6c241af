//! Account identifiers and case-insensitive identifier sets.
//!
//! Identifiers compare case-insensitively but keep their original casing
//! for display and for the follow/unfollow API paths. Sets are built once
//! from raw paginated entries and are immutable afterwards; all cleanup
//! (carriage returns, surrounding whitespace, empty lines, duplicates)
//! happens at construction.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

// ============================================================================
// Identifier
// ============================================================================

/// A unique, case-insensitive handle naming an account.
///
/// Equality and ordering use the lowercase fold; the original casing is
/// preserved and returned by [`Identifier::as_str`].
#[derive(Debug, Clone)]
pub struct Identifier {
    display: String,
    folded: String,
}

impl Identifier {
    /// Creates an identifier from a raw entry, cleaning it up on the way in.
    ///
    /// Carriage returns are stripped and surrounding whitespace is trimmed.
    /// Returns `None` for entries that are empty after cleanup.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw.replace('\r', "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }
        Some(Self {
            display: cleaned.to_string(),
            folded: cleaned.to_lowercase(),
        })
    }

    /// The identifier with its original casing.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// The lowercase comparison key.
    pub(crate) fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Identifier {}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

// ============================================================================
// IdentifierSet
// ============================================================================

/// An immutable-after-construction set of unique identifiers.
///
/// Backed by a vector sorted on the lowercase fold, with binary-search
/// membership. Invariants: no two elements are case-insensitively equal,
/// and no element is empty or whitespace-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentifierSet {
    items: Vec<Identifier>,
}

impl IdentifierSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a set from raw paginated entries.
    ///
    /// Entries are cleaned through [`Identifier::parse`], sorted, and
    /// deduplicated case-insensitively. The first occurrence of a handle
    /// wins, so its casing is the one preserved.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Vec<Identifier> = raw
            .into_iter()
            .filter_map(|entry| Identifier::parse(entry.as_ref()))
            .collect();
        // Stable sort keeps the first occurrence ahead of its duplicates.
        items.sort();
        items.dedup();
        Self { items }
    }

    /// Builds a set from items already sorted and unique by fold.
    ///
    /// Used by the reconciliation functions, which filter an existing set
    /// and therefore cannot violate the invariants.
    pub(crate) fn from_sorted_unique(items: Vec<Identifier>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0].folded() < w[1].folded()));
        Self { items }
    }

    /// Number of identifiers in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set has no identifiers.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates identifiers in set order (sorted on the fold).
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.items.iter()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.items
            .binary_search_by(|item| item.folded().cmp(identifier.folded()))
            .is_ok()
    }

    /// Case-insensitive membership test against a raw handle.
    pub fn contains_str(&self, raw: &str) -> bool {
        Identifier::parse(raw).is_some_and(|id| self.contains(&id))
    }

    /// Returns the subset whose handles match `names` (case-insensitively).
    ///
    /// Used for selective execution, where the caller narrows a reconciled
    /// target list to an explicit picklist.
    pub fn select(&self, names: &[String]) -> Self {
        let wanted: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
        let items = self
            .items
            .iter()
            .filter(|item| wanted.iter().any(|w| w == item.folded()))
            .cloned()
            .collect();
        Self::from_sorted_unique(items)
    }
}

impl<'a> IntoIterator for &'a IdentifierSet {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_carriage_returns_and_whitespace() {
        let id = Identifier::parse(" bob\r\n").unwrap();
        assert_eq!(id.as_str(), "bob");
    }

    #[test]
    fn test_parse_rejects_empty_entries() {
        assert!(Identifier::parse("").is_none());
        assert!(Identifier::parse("   ").is_none());
        assert!(Identifier::parse("\r\n").is_none());
    }

    #[test]
    fn test_identifier_equality_is_case_insensitive() {
        let a = Identifier::parse("Alice").unwrap();
        let b = Identifier::parse("alice").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Alice");
        assert_eq!(b.as_str(), "alice");
    }

    #[test]
    fn test_from_raw_deduplicates() {
        let set = IdentifierSet::from_raw(["bob", "bob", " bob\r", ""]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().as_str(), "bob");
    }

    #[test]
    fn test_from_raw_collapses_casing_variants() {
        let set = IdentifierSet::from_raw(["Alice", "alice", "ALICE"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_raw_sorts_on_fold() {
        let set = IdentifierSet::from_raw(["Zed", "alice", "Bob"]);
        let names: Vec<&str> = set.iter().map(Identifier::as_str).collect();
        assert_eq!(names, vec!["alice", "Bob", "Zed"]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let set = IdentifierSet::from_raw(["Alice", "bob"]);
        assert!(set.contains_str("ALICE"));
        assert!(set.contains_str("Bob"));
        assert!(!set.contains_str("carol"));
        assert!(!set.contains_str(""));
    }

    #[test]
    fn test_select_filters_case_insensitively() {
        let set = IdentifierSet::from_raw(["Alice", "bob", "Carol"]);
        let picked = set.select(&["ALICE".to_string(), "carol".to_string()]);
        let names: Vec<&str> = picked.iter().map(Identifier::as_str).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_serializes_as_string_array() {
        let set = IdentifierSet::from_raw(["Bob", "alice"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["alice","Bob"]"#);
    }
}
