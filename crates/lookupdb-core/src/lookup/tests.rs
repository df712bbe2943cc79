use crate::{
    error::LookupError,
    lookup::{LookupOp, LookupOpKind, RangeCheck, ReadRange},
    store::{KeyScanner, MemoryKeyStore},
    tuple::{Tuple, TupleFormat},
    value::Value,
};
use std::{cmp::Ordering, collections::HashSet};

///
/// HELPERS
///

const FORMAT: TupleFormat = TupleFormat::V2;

fn key(values: &[i64]) -> Tuple {
    Tuple::new(FORMAT, values.iter().copied().map(Value::Int))
}

// Full keys [a, b, c] with a trailing column beyond every bound used below.
// Every gap between two distinct bound points of `bound_keys` holds at least
// one key, so subset answers can be checked in both directions.
fn keyspace() -> Vec<Tuple> {
    let mut keys = Vec::new();
    for a in -1..=10 {
        for b in 0..=10 {
            for c in 0..=1 {
                keys.push(key(&[a, b, c]));
            }
        }
    }

    keys
}

fn cmp_prefix(stored: &Tuple, bound: &Tuple) -> Ordering {
    let len = stored.len().min(bound.len());
    stored.values()[..len].cmp(bound.values())
}

// Reference predicate, written without sentinels or intervals.
fn matches(op: &LookupOp, x: &Tuple) -> bool {
    let gt = |k: &Tuple| cmp_prefix(x, k) == Ordering::Greater;
    let gte = |k: &Tuple| cmp_prefix(x, k) != Ordering::Less;
    let lt = |k: &Tuple| cmp_prefix(x, k) == Ordering::Less;
    let lte = |k: &Tuple| cmp_prefix(x, k) != Ordering::Greater;

    match op {
        LookupOp::All { .. } => true,
        LookupOp::None { .. } => false,
        LookupOp::Equals { key } => x.starts_with(key),
        LookupOp::GreaterThan { key } => gt(key),
        LookupOp::GreaterThanOrEqual { key } => gte(key),
        LookupOp::LessThan { key } => lt(key),
        LookupOp::LessThanOrEqual { key } => lte(key),
        LookupOp::GreaterThanLessThan { gt: lo, lt: hi } => gt(lo) && lt(hi),
        LookupOp::GreaterThanLessThanOrEqual { gt: lo, lte: hi } => gt(lo) && lte(hi),
        LookupOp::GreaterThanOrEqualLessThan { gte: lo, lt: hi } => gte(lo) && lt(hi),
        LookupOp::GreaterThanOrEqualLessThanOrEqual { gte: lo, lte: hi } => gte(lo) && lte(hi),
    }
}

fn match_set(op: &LookupOp, keys: &[Tuple]) -> Vec<bool> {
    keys.iter().map(|x| matches(op, x)).collect()
}

fn store() -> MemoryKeyStore {
    MemoryKeyStore::new(keyspace()).expect("keyspace holds no sentinel")
}

// Open the range on the store and cut it at the first failed check, the way
// the index key iterator does.
fn scan(store: &MemoryKeyStore, range: &ReadRange) -> Vec<Tuple> {
    store
        .scan(&range.start, range.inclusive, range.reverse)
        .expect("memory scan should open")
        .map(|key| key.expect("memory scan should not fail"))
        .take_while(|x| range.check.accepts(x))
        .collect()
}

fn bound_keys() -> Vec<Tuple> {
    vec![
        Tuple::empty(FORMAT),
        key(&[0]),
        key(&[5]),
        key(&[9]),
        key(&[4, 4]),
        key(&[5, 9]),
    ]
}

// Every variant over every bound key, including inverted and equal-key pairs.
fn sample_ops() -> Vec<LookupOp> {
    let keys = bound_keys();
    let mut ops = vec![LookupOp::all(FORMAT), LookupOp::none(FORMAT)];

    for k in &keys {
        ops.push(LookupOp::equals(k.clone()));
        ops.push(LookupOp::greater_than(k.clone()));
        ops.push(LookupOp::greater_than_or_equal(k.clone()));
        ops.push(LookupOp::less_than(k.clone()));
        ops.push(LookupOp::less_than_or_equal(k.clone()));
    }

    for lo in &keys {
        for hi in &keys {
            ops.push(LookupOp::greater_than_less_than(lo.clone(), hi.clone()));
            ops.push(LookupOp::greater_than_less_than_or_equal(lo.clone(), hi.clone()));
            ops.push(LookupOp::greater_than_or_equal_less_than(lo.clone(), hi.clone()));
            ops.push(LookupOp::greater_than_or_equal_less_than_or_equal(
                lo.clone(),
                hi.clone(),
            ));
        }
    }

    ops
}

// One representative per variant.
fn one_of_each() -> Vec<LookupOp> {
    let (a, b) = (key(&[3]), key(&[6, 1]));

    vec![
        LookupOp::all(FORMAT),
        LookupOp::none(FORMAT),
        LookupOp::equals(a.clone()),
        LookupOp::greater_than(a.clone()),
        LookupOp::greater_than_or_equal(a.clone()),
        LookupOp::less_than(b.clone()),
        LookupOp::less_than_or_equal(b.clone()),
        LookupOp::greater_than_less_than(a.clone(), b.clone()),
        LookupOp::greater_than_less_than_or_equal(a.clone(), b.clone()),
        LookupOp::greater_than_or_equal_less_than(a.clone(), b.clone()),
        LookupOp::greater_than_or_equal_less_than_or_equal(a, b),
    ]
}

///
/// ALGEBRA
///

#[test]
fn every_variant_pair_is_handled() {
    let ops = one_of_each();
    let kinds: Vec<LookupOpKind> = ops.iter().map(LookupOp::kind).collect();
    assert_eq!(kinds, LookupOpKind::VARIANTS);

    let mut pairs = 0;
    for a in &ops {
        for b in &ops {
            let _ = a.is_subset_of(b);
            let _ = a.is_superset_of(b);
            let _ = a.union(b);
            let _ = a.intersection(b);
            pairs += 1;
        }
    }

    assert_eq!(pairs, 121);
}

#[test]
fn empty_key_bounds_reduce_to_open_ends() {
    let empty = Tuple::empty(FORMAT);
    let all = LookupOp::all(FORMAT);
    let none = LookupOp::none(FORMAT);

    let everything = [
        LookupOp::equals(empty.clone()),
        LookupOp::greater_than_or_equal(empty.clone()),
        LookupOp::less_than_or_equal(empty.clone()),
        LookupOp::greater_than_or_equal_less_than_or_equal(empty.clone(), empty.clone()),
    ];
    for op in &everything {
        assert!(all.is_subset_of(op), "All should be within {op}");
        assert!(!op.is_empty(), "{op}");
    }

    let nothing = [
        LookupOp::greater_than(empty.clone()),
        LookupOp::less_than(empty.clone()),
        LookupOp::greater_than_less_than(key(&[3]), empty.clone()),
        LookupOp::greater_than_or_equal_less_than(empty.clone(), empty.clone()),
    ];
    for op in &nothing {
        assert!(op.is_subset_of(&none), "{op} should be within None");
        assert!(op.is_empty(), "{op}");
    }

    assert_eq!(
        LookupOp::greater_than_or_equal_less_than(empty.clone(), key(&[4]))
            .intersection(&LookupOp::greater_than(key(&[2]))),
        LookupOp::greater_than_less_than(key(&[2]), key(&[4]))
    );
    assert_eq!(
        LookupOp::greater_than_less_than_or_equal(key(&[4]), empty)
            .union(&LookupOp::equals(key(&[4]))),
        Some(LookupOp::greater_than_or_equal(key(&[4])))
    );
}

#[test]
fn degenerate_equal_key_pairs_are_handled() {
    let k = key(&[5]);
    let equal_bounds = [
        LookupOp::greater_than_less_than(k.clone(), k.clone()),
        LookupOp::greater_than_less_than_or_equal(k.clone(), k.clone()),
        LookupOp::greater_than_or_equal_less_than(k.clone(), k.clone()),
        LookupOp::greater_than_or_equal_less_than_or_equal(k.clone(), k.clone()),
    ];

    assert!(equal_bounds[0].is_empty());
    assert!(equal_bounds[1].is_empty());
    assert!(equal_bounds[2].is_empty());
    assert!(!equal_bounds[3].is_empty());

    // [5, 5⁺) is exactly the prefix group of [5]
    let equals = LookupOp::equals(k);
    assert!(equal_bounds[3].is_subset_of(&equals));
    assert!(equals.is_subset_of(&equal_bounds[3]));
}

#[test]
fn lattice_bounds_hold_for_every_sample() {
    let all = LookupOp::all(FORMAT);
    let none = LookupOp::none(FORMAT);
    let keys = keyspace();

    for x in sample_ops() {
        assert!(x.is_subset_of(&all), "{x} should be within All");
        assert!(none.is_subset_of(&x), "None should be within {x}");
        assert_eq!(x.is_subset_of(&none), x.is_empty(), "{x}");

        assert_eq!(x.intersection(&all), x, "{x} ∩ All");
        assert_eq!(x.union(&all), Some(all.clone()), "{x} ∪ All");
        assert_eq!(
            match_set(&x.intersection(&none), &keys),
            vec![false; keys.len()],
            "{x} ∩ None"
        );
        assert_eq!(x.union(&x), Some(x.clone()), "{x} ∪ {x}");
        assert_eq!(x.intersection(&x), x, "{x} ∩ {x}");
    }
}

#[test]
fn mirror_law_holds_for_every_pair() {
    let ops = sample_ops();

    for a in &ops {
        for b in &ops {
            assert_eq!(a.is_subset_of(b), b.is_superset_of(a), "{a} vs {b}");
        }
    }
}

#[test]
fn algebra_agrees_with_set_semantics() {
    let keys = keyspace();
    let ops = sample_ops();
    let sets: Vec<Vec<bool>> = ops.iter().map(|op| match_set(op, &keys)).collect();

    for (a, set_a) in ops.iter().zip(&sets) {
        assert_eq!(a.is_empty(), !set_a.contains(&true), "{a} emptiness");

        for (b, set_b) in ops.iter().zip(&sets) {
            let contained = set_a.iter().zip(set_b).all(|(x, y)| !x || *y);
            assert_eq!(a.is_subset_of(b), contained, "{a} ⊆ {b}");

            let both: Vec<bool> = set_a.iter().zip(set_b).map(|(x, y)| *x && *y).collect();
            let meet = a.intersection(b);
            assert_eq!(match_set(&meet, &keys), both, "{a} ∩ {b} = {meet}");

            match a.union(b) {
                Some(join) => {
                    let either: Vec<bool> =
                        set_a.iter().zip(set_b).map(|(x, y)| *x || *y).collect();
                    assert_eq!(match_set(&join, &keys), either, "{a} ∪ {b} = {join}");
                }
                None => assert!(!both.contains(&true), "{a} ∪ {b} refused an overlap"),
            }
        }
    }
}

#[test]
fn union_and_intersection_commute() {
    let keys = keyspace();
    let ops = sample_ops();

    for a in &ops {
        for b in &ops {
            assert_eq!(
                a.union(b).is_some(),
                b.union(a).is_some(),
                "{a} ∪ {b} mergeability"
            );
            assert_eq!(
                match_set(&a.intersection(b), &keys),
                match_set(&b.intersection(a), &keys),
                "{a} ∩ {b}"
            );
        }
    }
}

#[test]
fn intersection_associates() {
    let keys = keyspace();
    let ops = one_of_each();

    for a in &ops {
        for b in &ops {
            for c in &ops {
                let left = a.intersection(b).intersection(c);
                let right = a.intersection(&b.intersection(c));
                assert_eq!(match_set(&left, &keys), match_set(&right, &keys));
            }
        }
    }
}

#[test]
fn equals_of_partial_key_absorbs_its_extension() {
    let short = LookupOp::equals(key(&[7]));
    let long = LookupOp::equals(key(&[7, 9]));

    assert!(long.is_subset_of(&short));
    assert!(!short.is_subset_of(&long));
    assert_eq!(short.union(&long), Some(short.clone()));
    assert_eq!(long.union(&short), Some(short.clone()));
    assert_eq!(short.intersection(&long), long);
}

#[test]
fn equals_against_a_shorter_bound() {
    let eq = LookupOp::equals(key(&[5, 3]));

    assert!(eq.is_subset_of(&LookupOp::greater_than_or_equal(key(&[5]))));
    assert!(eq.is_subset_of(&LookupOp::less_than_or_equal(key(&[5]))));
    assert!(!eq.is_subset_of(&LookupOp::greater_than(key(&[5]))));
    assert!(!eq.is_subset_of(&LookupOp::less_than(key(&[5]))));
    assert!(eq.is_subset_of(&LookupOp::greater_than(key(&[4]))));
    assert!(eq.is_subset_of(&LookupOp::less_than(key(&[6]))));
}

#[test]
fn greater_than_meets_less_than() {
    let op = LookupOp::greater_than(key(&[5])).intersection(&LookupOp::less_than(key(&[10])));

    assert_eq!(
        op,
        LookupOp::greater_than_less_than(key(&[5]), key(&[10]))
    );

    let range = op.to_read_range();
    assert_eq!(range.start, key(&[5]).with_sentinel());
    assert!(range.inclusive);
    assert!(!range.reverse);
    assert_eq!(range.check, RangeCheck::LessThan(key(&[10])));
    assert!(!range.check.accepts(&key(&[10, 0])));
    assert!(range.check.accepts(&key(&[9, 9])));
}

#[test]
fn adjacent_ranges_merge_and_gaps_do_not() {
    let low = LookupOp::less_than(key(&[5]));
    let high = LookupOp::greater_than_or_equal(key(&[5]));
    let gap = LookupOp::greater_than(key(&[5]));

    assert_eq!(low.union(&high), Some(LookupOp::all(FORMAT)));
    assert_eq!(low.union(&gap), None);
    assert_eq!(
        LookupOp::less_than_or_equal(key(&[5])).union(&gap),
        Some(LookupOp::all(FORMAT))
    );
    assert_eq!(
        LookupOp::equals(key(&[5])).union(&gap),
        Some(LookupOp::greater_than_or_equal(key(&[5])))
    );
}

#[test]
fn disjoint_intersection_is_none() {
    let op = LookupOp::less_than(key(&[2])).intersection(&LookupOp::greater_than(key(&[7])));

    assert_eq!(op, LookupOp::none(FORMAT));
    assert!(op.is_empty());
}

#[test]
fn two_sided_result_rebuilds_narrowest_variant() {
    let op = LookupOp::greater_than_or_equal(key(&[4]))
        .intersection(&LookupOp::less_than_or_equal(key(&[4])));

    assert_eq!(op, LookupOp::equals(key(&[4])));
}

///
/// READ RANGES
///

#[test]
fn read_ranges_visit_exactly_the_match_set() {
    let keys = keyspace();
    let store = store();

    for op in sample_ops() {
        let expected: Vec<&Tuple> = keys.iter().filter(|x| matches(&op, x)).collect();
        let mut visited = scan(&store, &op.to_read_range());
        visited.sort();

        assert_eq!(visited.iter().collect::<Vec<_>>(), expected, "{op}");
    }
}

#[test]
fn bounded_partial_keys_include_trailing_columns() {
    let op = LookupOp::greater_than_or_equal_less_than_or_equal(key(&[2, 0]), key(&[2, 5]));

    let visited = scan(&store(), &op.to_read_range());

    assert_eq!(visited.len(), 12);
    assert_eq!(visited.first(), Some(&key(&[2, 0, 0])));
    assert_eq!(visited.last(), Some(&key(&[2, 5, 1])));
}

#[test]
fn lowering_table() {
    let k = key(&[1]);
    let empty = Tuple::empty(FORMAT);

    let cases = [
        (LookupOp::all(FORMAT), empty.clone(), true, false, RangeCheck::Always),
        (LookupOp::none(FORMAT), empty, true, false, RangeCheck::Never),
        (
            LookupOp::equals(k.clone()),
            k.clone(),
            true,
            false,
            RangeCheck::StartsWith(k.clone()),
        ),
        (LookupOp::greater_than(k.clone()), k.clone(), false, false, RangeCheck::Always),
        (
            LookupOp::greater_than_or_equal(k.clone()),
            k.clone(),
            true,
            false,
            RangeCheck::Always,
        ),
        (LookupOp::less_than(k.clone()), k.clone(), false, true, RangeCheck::Always),
        (LookupOp::less_than_or_equal(k.clone()), k.clone(), true, true, RangeCheck::Always),
    ];

    for (op, start, inclusive, reverse, check) in cases {
        let range = op.to_read_range();
        assert_eq!(
            range,
            ReadRange {
                start,
                inclusive,
                reverse,
                check,
            },
            "{op}"
        );
    }
}

///
/// KINDS
///

#[test]
fn kind_names_round_trip() {
    for kind in LookupOpKind::VARIANTS {
        assert_eq!(kind.as_str().parse::<LookupOpKind>(), Ok(kind));
    }
}

#[test]
fn unknown_kind_is_unhandled_variant() {
    let err = "GreaterThan_Between".parse::<LookupOpKind>().unwrap_err();

    assert_eq!(
        err,
        LookupError::UnhandledVariant {
            name: "GreaterThan_Between".to_string()
        }
    );
}

#[test]
fn from_kind_checks_key_count_and_format() {
    let err = LookupOp::from_kind(LookupOpKind::GreaterThanLessThan, FORMAT, vec![key(&[1])])
        .unwrap_err();
    assert_eq!(
        err,
        LookupError::KeyCount {
            kind: "GreaterThan_LessThan",
            expected: 2,
            found: 1
        }
    );

    let v1 = Tuple::new(TupleFormat::V1, [Value::Int(1)]);
    let err = LookupOp::from_kind(LookupOpKind::Equals, FORMAT, vec![v1]).unwrap_err();
    assert!(matches!(err, LookupError::FormatMismatch { .. }));

    let op = LookupOp::from_kind(
        LookupOpKind::GreaterThanOrEqualLessThan,
        FORMAT,
        vec![key(&[1]), key(&[4])],
    )
    .expect("two keys should build");
    assert_eq!(
        op,
        LookupOp::greater_than_or_equal_less_than(key(&[1]), key(&[4]))
    );
}

#[test]
fn equality_ignores_format_for_every_variant() {
    let v1 = |n: i64| Tuple::new(TupleFormat::V1, [Value::Int(n)]);
    let pairs = [
        (LookupOp::all(TupleFormat::V1), LookupOp::all(FORMAT)),
        (LookupOp::none(TupleFormat::V1), LookupOp::none(FORMAT)),
        (LookupOp::equals(v1(3)), LookupOp::equals(key(&[3]))),
        (
            LookupOp::greater_than_less_than(v1(1), v1(4)),
            LookupOp::greater_than_less_than(key(&[1]), key(&[4])),
        ),
    ];

    for (left, right) in pairs {
        assert_eq!(left, right);

        let distinct: HashSet<LookupOp> = [left, right].into_iter().collect();
        assert_eq!(distinct.len(), 1);
    }

    assert_ne!(LookupOp::all(FORMAT), LookupOp::none(FORMAT));
    assert_ne!(
        LookupOp::less_than(key(&[4])),
        LookupOp::less_than_or_equal(key(&[4]))
    );
}

#[test]
fn display_names_kind_and_keys() {
    assert_eq!(LookupOp::all(FORMAT).to_string(), "All");
    assert_eq!(
        LookupOp::greater_than_less_than(key(&[5]), key(&[10])).to_string(),
        "GreaterThan_LessThan([5], [10])"
    );
}
