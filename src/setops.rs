//! Set operations over strictly ascending integer lists — the only
//! primitives the query evaluator uses.

/// Every value present in either input, deduplicated, ascending.
pub fn union(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Every value present in both inputs, ascending.
pub fn intersection(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Every value present in `a` but not in `b` (`A DIFF B`), ascending.
pub fn difference(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ascending_vec() -> impl Strategy<Value = Vec<u32>> {
        proptest::collection::vec(0u32..200, 0..30).prop_map(|mut v| {
            v.sort_unstable();
            v.dedup();
            v
        })
    }

    proptest! {
        #[test]
        fn union_is_commutative(a in ascending_vec(), b in ascending_vec()) {
            prop_assert_eq!(union(&a, &b), union(&b, &a));
        }

        #[test]
        fn union_is_idempotent(a in ascending_vec()) {
            prop_assert_eq!(union(&a, &a), a);
        }

        #[test]
        fn intersection_is_commutative(a in ascending_vec(), b in ascending_vec()) {
            prop_assert_eq!(intersection(&a, &b), intersection(&b, &a));
        }

        #[test]
        fn intersection_is_idempotent(a in ascending_vec()) {
            prop_assert_eq!(intersection(&a, &a), a);
        }

        #[test]
        fn diff_with_self_is_empty(a in ascending_vec()) {
            prop_assert!(difference(&a, &a).is_empty());
        }

        #[test]
        fn diff_with_empty_is_identity(a in ascending_vec()) {
            prop_assert_eq!(difference(&a, &[]), a);
        }

        #[test]
        fn all_outputs_are_strictly_ascending(a in ascending_vec(), b in ascending_vec()) {
            for out in [union(&a, &b), intersection(&a, &b), difference(&a, &b)] {
                for w in out.windows(2) {
                    prop_assert!(w[0] < w[1]);
                }
            }
        }
    }

    #[test]
    fn s5_example() {
        let alpha = vec![1u32, 2, 3];
        let beta = vec![2u32, 3, 4];
        let gamma = vec![3u32];
        let ab = intersection(&alpha, &beta);
        assert_eq!(ab, vec![2, 3]);
        assert_eq!(difference(&ab, &gamma), vec![2]);
    }
}
