//! Property tests for the sorted intersection behind entry discovery.

use std::collections::BTreeSet;

use proptest::prelude::*;

use packup::resolver::intersect_sorted;

fn sorted_set() -> impl Strategy<Value = Vec<u16>> {
    proptest::collection::btree_set(0u16..512, 0..64).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The result holds exactly the elements both inputs share, in order.
    #[test]
    fn property_intersection_matches_set_semantics(a in sorted_set(), b in sorted_set()) {
        let result = intersect_sorted(&a, &b);

        let left: BTreeSet<u16> = a.iter().copied().collect();
        let right: BTreeSet<u16> = b.iter().copied().collect();
        let expected: Vec<u16> = left.intersection(&right).copied().collect();

        prop_assert_eq!(result, expected);
    }

    /// PROPERTY: Intersecting a sequence with itself gives it back unchanged.
    #[test]
    fn property_intersection_is_idempotent(a in sorted_set()) {
        prop_assert_eq!(intersect_sorted(&a, &a), a);
    }

    /// PROPERTY: The result never depends on argument order.
    #[test]
    fn property_intersection_is_commutative(a in sorted_set(), b in sorted_set()) {
        prop_assert_eq!(intersect_sorted(&a, &b), intersect_sorted(&b, &a));
    }

    /// PROPERTY: Disjoint inputs share nothing.
    #[test]
    fn property_disjoint_inputs_yield_empty(a in sorted_set()) {
        let shifted: Vec<u16> = a.iter().map(|x| x + 1024).collect();
        prop_assert!(intersect_sorted(&a, &shifted).is_empty());
    }
}
