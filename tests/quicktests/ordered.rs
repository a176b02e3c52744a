use ordered_tree::Tree;

use std::collections::HashSet;

/// Inserts `xs` in order, returning the tree and the values in the order they were first accepted.
fn build(xs: &[i8]) -> (Tree<i8>, Vec<i8>) {
    let mut tree = Tree::new();
    let mut accepted = Vec::new();
    for x in xs {
        if tree.insert(*x) {
            accepted.push(*x);
        }
    }
    (tree, accepted)
}

/// The smallest height a tree of `len` nodes can have.
fn minimal_height(len: usize) -> usize {
    let mut height = 0;
    while (1usize << height) - 1 < len {
        height += 1;
    }
    height
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let (tree, _) = build(&xs);

    let mut expected: Vec<_> = xs.into_iter().collect::<HashSet<_>>().into_iter().collect();
    expected.sort_unstable();

    tree.iter().copied().eq(expected.into_iter())
}

#[quickcheck]
fn display_matches_iter(xs: Vec<i8>) -> bool {
    let (tree, _) = build(&xs);

    let mut expected: String = tree.iter().map(|x| format!("{} ", x)).collect();
    expected.push('\n');

    tree.to_string() == expected
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let (tree, _) = build(&xs);

    xs.iter().all(|x| tree.retrieve(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let (tree, _) = build(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.retrieve(x).is_none() && tree.depth(x) == 0)
}

#[quickcheck]
fn duplicates_are_rejected(xs: Vec<i8>) -> bool {
    let (mut tree, accepted) = build(&xs);
    let before = tree.clone();

    accepted.iter().all(|x| !tree.insert(*x)) && tree == before && tree.len() == accepted.len()
}

#[quickcheck]
fn first_inserted_is_root(xs: Vec<i8>) -> bool {
    let (tree, accepted) = build(&xs);

    match accepted.first() {
        Some(first) => tree.depth(first) == 1,
        None => tree.is_empty(),
    }
}

#[quickcheck]
fn drain_leaves_nothing_behind(xs: Vec<i8>) -> bool {
    let (mut tree, accepted) = build(&xs);
    let mut slots: Vec<Option<i8>> = vec![None; accepted.len()];

    tree.drain_into(&mut slots) == Ok(accepted.len())
        && tree.is_empty()
        && accepted.iter().all(|x| tree.retrieve(x).is_none())
        && slots.iter().all(Option::is_some)
}

#[quickcheck]
fn round_trip_is_minimal_and_ordered(xs: Vec<i8>) -> bool {
    let (mut tree, accepted) = build(&xs);
    let mut slots: Vec<Option<i8>> = vec![None; accepted.len()];
    tree.drain_into(&mut slots).unwrap();
    let drained = slots.clone();

    // An `i8` tree never exceeds 256 elements.
    let inserted = tree.fill_from_with_limit(&mut slots, 256).unwrap();

    let rebuilt: Vec<_> = tree.iter().copied().map(Some).collect();
    inserted == accepted.len()
        && tree.height() == minimal_height(accepted.len())
        && rebuilt == drained
        && slots.iter().all(Option::is_none)
}

#[quickcheck]
fn drain_sorted_matches_iter(xs: Vec<i8>) -> bool {
    let (mut tree, _) = build(&xs);
    let expected: Vec<_> = tree.iter().copied().collect();

    tree.drain_sorted() == expected && tree.is_empty()
}

#[quickcheck]
fn copies_are_independent(xs: Vec<i8>, extra: i8, other: i8) -> bool {
    let (mut original, _) = build(&xs);
    let mut copy = original.clone();
    let copy_before = copy.clone();

    // Inserting into the original leaves the copy alone...
    original.insert(extra);
    let copy_untouched = copy == copy_before;

    // ...and inserting into the copy leaves the original alone.
    let original_before = original.clone();
    copy.insert(other);
    let original_untouched = original == original_before;

    copy_untouched && original_untouched
}
