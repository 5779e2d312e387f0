use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

/// Checks structural invariants: no dead node below the root, root holds no
/// value, and the reachable value count matches `len`.
fn validate_trie<V, C: ChildTable<V>>(t: &KeyedTrie<V, C>) {
    assert!(t.root.value.is_none(), "root must never hold a value");

    let mut stack: Vec<&Node<V, C>> = Vec::new();
    t.root.children.for_each(|_, child| stack.push(child));

    let mut value_count = 0usize;
    while let Some(node) = stack.pop() {
        assert!(!node.is_dead(), "valueless childless node survived");
        if node.value.is_some() {
            value_count += 1;
        }
        node.children.for_each(|_, child| stack.push(child));
    }

    assert_eq!(value_count, t.len(), "reachable value count must match len");
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // Four letters keep collisions and shared prefixes frequent.
    "[a-d]{1,8}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 35)]
    Insert(#[proptest(strategy = "key_strategy()")] String, u32),
    #[proptest(weight = 20)]
    Count(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 25)]
    Delete(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 20)]
    Find(#[proptest(strategy = "key_strategy()")] String),
}

fn apply<C: ChildTable<u32>>(
    t: &mut KeyedTrie<u32, C>,
    m: &mut BTreeMap<String, u32>,
    op: Op,
) -> Result<(), TestCaseError> {
    match op {
        Op::Insert(key, value) => {
            prop_assert_eq!(t.insert(&key, value), Ok(m.insert(key, value)));
        }
        Op::Count(key) => {
            let expected = *m
                .entry(key.clone())
                .and_modify(|v| *v = v.wrapping_add(1))
                .or_insert(1);
            prop_assert_eq!(
                t.compute_or_insert(&key, 1, |v| v.wrapping_add(1)),
                Ok(&expected)
            );
        }
        Op::Delete(key) => {
            prop_assert_eq!(t.delete(&key), m.remove(&key).is_some());
            prop_assert!(!t.contains_value(&key));
        }
        Op::Find(key) => {
            prop_assert_eq!(t.find(&key), m.get(&key));
            prop_assert_eq!(t.contains_value(&key), m.contains_key(&key));
        }
    }
    prop_assert_eq!(t.len(), m.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_char_map(ops in prop::collection::vec(any::<Op>(), 0..=2000)) {
        let mut t: KeyedTrie<u32> = KeyedTrie::new();
        let mut m: BTreeMap<String, u32> = BTreeMap::new();

        for op in ops {
            apply(&mut t, &mut m, op)?;
        }

        validate_trie(&t);
        let got: BTreeMap<String, u32> = t.iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(got, m);
    }

    #[test]
    fn prop_equivalence_letter_table(ops in prop::collection::vec(any::<Op>(), 0..=2000)) {
        let mut t: LetterTrie<u32> = LetterTrie::new();
        let mut m: BTreeMap<String, u32> = BTreeMap::new();

        for op in ops {
            apply(&mut t, &mut m, op)?;
        }

        validate_trie(&t);
        let got: Vec<(String, u32)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_round_trip(key in "\\PC{1,16}", value in any::<u64>()) {
        let mut t: KeyedTrie<u64> = KeyedTrie::new();
        t.insert(&key, value).unwrap();
        prop_assert_eq!(t.find(&key), Some(&value));
    }

    #[test]
    fn prop_delete_removes_exactly_the_key(
        keys in prop::collection::btree_set(key_strategy(), 1..32),
        pick in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut t: KeyedTrie<usize> = KeyedTrie::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i).unwrap();
        }

        let victim = pick.index(keys.len());
        prop_assert!(t.delete(&keys[victim]));
        prop_assert!(!t.delete(&keys[victim]));

        for (i, k) in keys.iter().enumerate() {
            if i == victim {
                prop_assert_eq!(t.find(k), None);
            } else {
                prop_assert_eq!(t.find(k), Some(&i));
            }
        }
        validate_trie(&t);
    }

    #[test]
    fn prop_delete_all_leaves_only_root(keys in prop::collection::vec(key_strategy(), 0..64)) {
        let mut t: KeyedTrie<()> = KeyedTrie::new();
        for k in &keys {
            t.insert(k, ()).unwrap();
        }
        for k in &keys {
            t.delete(k);
        }
        prop_assert!(t.is_empty());
        prop_assert_eq!(t.node_count(), 1);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

const SMALL_SET: [&str; 6] = ["a", "b", "ab", "abc", "abd", "ba"];

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_permutation(&SMALL_SET, |perm| {
        let mut t: LetterTrie<u64> = LetterTrie::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u64;
            assert_eq!(t.insert(k, v), Ok(m.insert(k.to_string(), v)));
        }

        validate_trie(&t);
        // root, a, ab, abc, abd, b, ba
        assert_eq!(t.node_count(), 7);
        let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = m.into_iter().collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    // Insert in a fixed order, then remove in all permutations.
    let mut base: KeyedTrie<u64> = KeyedTrie::new();
    for (i, k) in SMALL_SET.iter().enumerate() {
        base.insert(k, i as u64).unwrap();
    }

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base.clone();
        let mut remaining: Vec<&str> = SMALL_SET.to_vec();

        for k in perm {
            assert!(t.delete(k));
            remaining.retain(|r| *r != k);
            assert_eq!(t.len(), remaining.len());
            validate_trie(&t);
            for r in &remaining {
                assert!(t.contains_value(r), "{r} lost after deleting {k}");
            }
        }
        assert!(t.is_empty());
        assert_eq!(t.node_count(), 1);
    });
}
