//! Sequence algorithms: sorting, zipping, flattening, set operations and
//! shuffling.

use crate::collections::{contains, map, reduce, reject, some, Collection, Fields, Sequence};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use std::cmp::Ordering;

/// A copy of `seq` in random order.
///
/// Every element appears exactly once in the result.
pub fn shuffle<'a, S>(seq: &'a S) -> Vec<S::Item>
where
    S: Sequence<'a> + ?Sized,
    S::Item: Clone,
{
    shuffle_with(seq, &mut rand::thread_rng())
}

/// [`shuffle`] driven by a caller-supplied RNG
pub fn shuffle_with<'a, S, R>(seq: &'a S, rng: &mut R) -> Vec<S::Item>
where
    S: Sequence<'a> + ?Sized,
    S::Item: Clone,
    R: Rng + ?Sized,
{
    let mut shuffled = map(seq, |value| value.clone());
    // Fisher-Yates: walks from the end, swapping each slot with a random
    // slot at or before it.
    shuffled.shuffle(rng);
    shuffled
}

/// Elements ordered by ascending `criterion(element)`; ties keep their
/// original relative order.
pub fn sort_by<'a, C, K, F>(collection: &'a C, mut criterion: F) -> Vec<C::Item>
where
    C: Collection<'a> + ?Sized,
    C::Item: Clone,
    K: Ord,
    F: FnMut(&'a C::Item) -> K,
{
    let mut keyed = map(collection, |value| (criterion(value), value));
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, value)| value.clone()).collect()
}

/// Elements ordered by ascending value of the `name` field.
///
/// Elements missing the field sort last. Values that do not compare (such as
/// `NaN`) count as equal. The sort is stable.
pub fn sort_by_field<'a, C>(collection: &'a C, name: &str) -> Vec<C::Item>
where
    C: Collection<'a> + ?Sized,
    C::Item: Fields + Clone,
    <C::Item as Fields>::Value: PartialOrd,
{
    let mut keyed = map(collection, |value| (value.field(name), value));
    keyed.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, value)| value.clone()).collect()
}

/// Group the `i`-th elements of every sequence into row `i`.
///
/// The result is as long as the longest input; shorter inputs contribute
/// `None` once they run out.
pub fn zip<'a, S>(seqs: &'a [S]) -> Vec<Vec<Option<S::Item>>>
where
    S: Sequence<'a>,
    S::Item: Clone,
{
    let width = seqs.len();
    let longest = reduce(seqs, |longest, seq| longest.max(seq.len()), 0usize);
    let mut rows: Vec<Vec<Option<S::Item>>> = (0..longest)
        .map(|_| (0..width).map(|_| None).collect())
        .collect();
    seqs.each(|seq, column, _| {
        seq.each(|value, row, _| rows[row][column] = Some(value.clone()));
    });
    rows
}

/// [`zip`] for two sequences of different element types
pub fn zip_pair<'a, 'b, A, B>(
    left: &'a A,
    right: &'b B,
) -> Vec<(Option<A::Item>, Option<B::Item>)>
where
    A: Sequence<'a> + ?Sized,
    B: Sequence<'b> + ?Sized,
    A::Item: Clone,
    B::Item: Clone,
{
    let longest = left.len().max(right.len());
    let mut rows: Vec<(Option<A::Item>, Option<B::Item>)> =
        (0..longest).map(|_| (None, None)).collect();
    left.each(|value, row, _| rows[row].0 = Some(value.clone()));
    right.each(|value, row, _| rows[row].1 = Some(value.clone()));
    rows
}

/// One level of a nested sequence
pub enum Node<'a, N: Nested> {
    Branch(&'a [N]),
    Leaf(&'a N::Leaf),
}

/// Types that are either a leaf value or a sequence of further nodes
pub trait Nested: Sized {
    type Leaf;

    fn node(&self) -> Node<'_, Self>;
}

/// An arbitrarily nested list
#[derive(Debug, Clone, PartialEq)]
pub enum Tree<T> {
    Leaf(T),
    Branch(Vec<Tree<T>>),
}

impl<T> Tree<T> {
    pub fn leaf(value: T) -> Self {
        Tree::Leaf(value)
    }

    pub fn branch(children: impl IntoIterator<Item = Tree<T>>) -> Self {
        Tree::Branch(children.into_iter().collect())
    }
}

impl<T> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::Leaf(value)
    }
}

impl<T> Nested for Tree<T> {
    type Leaf = T;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Tree::Leaf(value) => Node::Leaf(value),
            Tree::Branch(children) => Node::Branch(children),
        }
    }
}

/// JSON arrays are branches; every other value is a leaf.
impl Nested for Value {
    type Leaf = Value;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Value::Array(items) => Node::Branch(items),
            other => Node::Leaf(other),
        }
    }
}

/// All leaves of `nested`, depth-first, left to right
pub fn flatten<N>(nested: &[N]) -> Vec<N::Leaf>
where
    N: Nested,
    N::Leaf: Clone,
{
    let mut result = Vec::new();
    flatten_into(nested, &mut result);
    result
}

/// Append all leaves of `nested` to `result`, depth-first, left to right
pub fn flatten_into<'r, N>(nested: &[N], result: &'r mut Vec<N::Leaf>) -> &'r mut Vec<N::Leaf>
where
    N: Nested,
    N::Leaf: Clone,
{
    nested.each(|node, _, _| match node.node() {
        Node::Branch(children) => {
            flatten_into(children, &mut *result);
        }
        Node::Leaf(value) => result.push(value.clone()),
    });
    result
}

/// Elements of the first sequence present in all the others.
///
/// Order and repeats follow the first sequence. With a single sequence,
/// every element qualifies; with none, the result is empty.
pub fn intersection<'a, S>(seqs: &'a [S]) -> Vec<S::Item>
where
    S: Sequence<'a>,
    S::Item: PartialEq + Clone,
{
    let mut shared = Vec::new();
    seqs.each(|head, position, _| {
        if position != 0 {
            return;
        }
        head.each(|item, _, _| {
            let mut in_all = true;
            seqs.each(|other, index, _| {
                if index != 0 {
                    in_all = in_all && contains(other, item);
                }
            });
            if in_all {
                shared.push(item.clone());
            }
        });
    });
    shared
}

/// Elements of `first` that appear in none of `others`, in order
pub fn difference<'a, S, O>(first: &'a S, others: &'a [O]) -> Vec<S::Item>
where
    S: Sequence<'a> + ?Sized,
    O: Sequence<'a, Item = S::Item>,
    S::Item: PartialEq + Clone,
{
    reject(first, |item| some(others, |other| contains(other, item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..50).collect();
        for _ in 0..100 {
            let mut shuffled = shuffle(&items);
            assert_eq!(shuffled.len(), items.len());
            shuffled.sort();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn test_shuffle_with_seed_is_reproducible() {
        let items = [1, 2, 3, 4, 5, 6, 7, 8];
        let a = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        let b = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_empty() {
        let items: Vec<i32> = Vec::new();
        assert!(shuffle(&items).is_empty());
    }

    #[test]
    fn test_sort_by_function() {
        let words = ["banana", "kiwi", "apple", "fig"];
        assert_eq!(
            sort_by(&words, |w| w.len()),
            vec!["fig", "kiwi", "apple", "banana"]
        );
    }

    #[test]
    fn test_sort_by_is_stable() {
        let pairs = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        assert_eq!(
            sort_by(&pairs, |p| p.0),
            vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]
        );
    }

    #[test]
    fn test_sort_by_field() {
        let rows: Vec<HashMap<String, i32>> = [3, 1, 2]
            .iter()
            .map(|k| HashMap::from([("k".to_string(), *k)]))
            .collect();
        let sorted = sort_by_field(&rows, "k");
        let keys: Vec<i32> = sorted.iter().map(|row| row["k"]).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_by_field_is_stable() {
        let rows: Vec<BTreeMap<String, i32>> = [(1, 0), (0, 1), (1, 2), (0, 3)]
            .iter()
            .map(|&(k, id)| BTreeMap::from([("k".to_string(), k), ("id".to_string(), id)]))
            .collect();
        let sorted = sort_by_field(&rows, "k");
        let ids: Vec<i32> = sorted.iter().map(|row| row["id"]).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_sort_by_field_missing_last() {
        let rows = vec![
            BTreeMap::from([("name".to_string(), 6), ("age".to_string(), 60)]),
            BTreeMap::from([("name".to_string(), 0)]),
            BTreeMap::from([("name".to_string(), 4), ("age".to_string(), 40)]),
        ];
        let sorted = sort_by_field(&rows, "age");
        let names: Vec<i32> = sorted.iter().map(|row| row["name"]).collect();
        assert_eq!(names, vec![4, 6, 0]);
    }

    #[test]
    fn test_sort_by_json_key() {
        let people = vec![
            json!({"name": "curly", "age": 60}),
            json!({"name": "moe", "age": 40}),
        ];
        let sorted = sort_by(&people, |p| p["age"].as_u64().unwrap_or(u64::MAX));
        assert_eq!(sorted[0]["name"], "moe");
        assert_eq!(sorted[1]["name"], "curly");
    }

    #[test]
    fn test_zip() {
        let zipped = zip(&[vec![1, 2, 3], vec![4, 5], vec![6]]);
        assert_eq!(
            zipped,
            vec![
                vec![Some(1), Some(4), Some(6)],
                vec![Some(2), Some(5), None],
                vec![Some(3), None, None],
            ]
        );
    }

    #[test]
    fn test_zip_empty() {
        let seqs: Vec<Vec<i32>> = Vec::new();
        assert!(zip(&seqs).is_empty());
    }

    #[test]
    fn test_zip_pair() {
        assert_eq!(
            zip_pair(&["a", "b", "c"], &[1, 2]),
            vec![
                (Some("a"), Some(1)),
                (Some("b"), Some(2)),
                (Some("c"), None)
            ]
        );
    }

    #[test]
    fn test_flatten_tree() {
        let nested = vec![
            Tree::leaf(1),
            Tree::branch([
                Tree::leaf(2),
                Tree::branch([Tree::leaf(3), Tree::branch([Tree::leaf(4)])]),
                Tree::leaf(5),
            ]),
        ];
        assert_eq!(flatten(&nested), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flatten_into_existing() {
        let mut result = vec![0];
        let nested = [Tree::from(1), Tree::branch([Tree::from(2)])];
        flatten_into(&nested, &mut result);
        assert_eq!(result, vec![0, 1, 2]);
    }

    #[test]
    fn test_flatten_json() {
        let nested = json!([1, [2, [3, [4]], 5], []]);
        let items = nested.as_array().unwrap();
        assert_eq!(
            flatten(items),
            vec![json!(1), json!(2), json!(3), json!(4), json!(5)]
        );
    }

    #[test]
    fn test_intersection() {
        assert_eq!(
            intersection(&[vec![1, 2, 3], vec![2, 3, 4], vec![2, 3, 5]]),
            vec![2, 3]
        );
        assert_eq!(intersection(&[vec![1, 2], vec![3]]), Vec::<i32>::new());
        assert_eq!(intersection(&[vec![1, 1, 2], vec![1]]), vec![1, 1]);
    }

    #[test]
    fn test_intersection_checks_every_sequence() {
        // 1 is missing from the middle sequence only
        assert_eq!(
            intersection(&[vec![1, 2], vec![2], vec![1, 2]]),
            vec![2]
        );
    }

    #[test]
    fn test_intersection_single_and_none() {
        assert_eq!(intersection(&[vec!["a", "b"]]), vec!["a", "b"]);
        let none: Vec<Vec<i32>> = Vec::new();
        assert!(intersection(&none).is_empty());
    }

    #[test]
    fn test_difference() {
        assert_eq!(difference(&[1, 2, 3], &[vec![2], vec![3]]), vec![1]);
        assert_eq!(difference(&[1, 2, 3, 4], &[vec![2, 30, 40]]), vec![1, 3, 4]);
        let none: [Vec<i32>; 0] = [];
        assert_eq!(difference(&[1, 2], &none), vec![1, 2]);
    }
}
