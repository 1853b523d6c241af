//! Set reconciliation between followers and following.
//!
//! Pure functions only. Comparison is always case-insensitive; the output
//! preserves the casing of the left-hand operand.

use serde::Serialize;

use crate::models::IdentifierSet;

/// Elements of `a` with no case-insensitive match in `b`.
pub fn difference(a: &IdentifierSet, b: &IdentifierSet) -> IdentifierSet {
    let items = a
        .iter()
        .filter(|id| !b.contains(id))
        .cloned()
        .collect();
    IdentifierSet::from_sorted_unique(items)
}

/// Elements present (case-insensitively) in both `a` and `b`.
///
/// Casing comes from `a`.
pub fn intersection(a: &IdentifierSet, b: &IdentifierSet) -> IdentifierSet {
    let items = a.iter().filter(|id| b.contains(id)).cloned().collect();
    IdentifierSet::from_sorted_unique(items)
}

/// The three derived sets computed from a followers/following pair.
///
/// Derived, never persisted; recomputed whenever the source sets change.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    /// Accounts we follow that do not follow us back (following ∖ followers).
    pub not_following_back: IdentifierSet,
    /// Followers we do not follow back (followers ∖ following).
    pub not_followed_back: IdentifierSet,
    /// Accounts in both sets.
    pub mutual: IdentifierSet,
}

impl Reconciliation {
    /// Computes all three derived sets.
    pub fn compute(followers: &IdentifierSet, following: &IdentifierSet) -> Self {
        Self {
            not_following_back: difference(following, followers),
            not_followed_back: difference(followers, following),
            mutual: intersection(following, followers),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identifier;

    fn set(names: &[&str]) -> IdentifierSet {
        IdentifierSet::from_raw(names.iter().copied())
    }

    fn names(s: &IdentifierSet) -> Vec<&str> {
        s.iter().map(Identifier::as_str).collect()
    }

    #[test]
    fn test_difference_with_self_is_empty() {
        let a = set(&["alice", "bob", "carol"]);
        assert!(difference(&a, &a).is_empty());
    }

    #[test]
    fn test_difference_with_empty_is_identity() {
        let a = set(&["alice", "bob"]);
        let diff = difference(&a, &IdentifierSet::empty());
        assert_eq!(diff, a);
    }

    #[test]
    fn test_difference_is_case_insensitive() {
        let a = set(&["Alice", "Bob"]);
        let b = set(&["alice"]);
        assert_eq!(names(&difference(&a, &b)), vec!["Bob"]);
    }

    #[test]
    fn test_intersection_commutes_up_to_casing() {
        let a = set(&["Alice", "bob", "Dave"]);
        let b = set(&["ALICE", "BOB", "carol"]);

        let ab = intersection(&a, &b);
        let ba = intersection(&b, &a);

        // Same membership either way round.
        assert_eq!(ab.len(), ba.len());
        for id in ab.iter() {
            assert!(ba.contains(id));
        }

        // Left operand's casing wins.
        assert_eq!(names(&ab), vec!["Alice", "bob"]);
        assert_eq!(names(&ba), vec!["ALICE", "BOB"]);
    }

    #[test]
    fn test_end_to_end_reconciliation() {
        let followers = set(&["u1", "u2", "u3"]);
        let following = set(&["u2", "u3", "u4"]);

        let rec = Reconciliation::compute(&followers, &following);
        assert_eq!(names(&rec.not_following_back), vec!["u4"]);
        assert_eq!(names(&rec.not_followed_back), vec!["u1"]);
        assert_eq!(names(&rec.mutual), vec!["u2", "u3"]);
    }

    #[test]
    fn test_reconciliation_of_disjoint_sets() {
        let followers = set(&["a"]);
        let following = set(&["b"]);

        let rec = Reconciliation::compute(&followers, &following);
        assert_eq!(names(&rec.not_following_back), vec!["b"]);
        assert_eq!(names(&rec.not_followed_back), vec!["a"]);
        assert!(rec.mutual.is_empty());
    }
}
