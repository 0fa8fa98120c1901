//! Height-balanced binary search tree with in-order top-K retrieval.
//!
//! Each node owns its children outright; rotations move boxes around and
//! never alias them. The ordering is a plain function pointer fixed when the
//! tree is built, so a "higher is better" ranking is just a tree built with
//! [`OrderStatTree::descending`].

use std::cmp::Ordering;
use std::mem;

type Link<K, V> = Option<Box<Node<K, V>>>;
type Comparator<K> = fn(&K, &K) -> Ordering;

struct Node<K, V> {
    key: K,
    value: V,
    height: i32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[inline]
    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

#[inline]
fn height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(0, |n| n.height)
}

fn rotate_right<K, V>(mut y: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update();
    x.right = Some(y);
    x.update();
    x
}

fn rotate_left<K, V>(mut x: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update();
    y.left = Some(x);
    y.update();
    y
}

/// Restore the height invariant at `n`, assuming both subtrees satisfy it.
fn rebalance<K, V>(mut n: Box<Node<K, V>>) -> Box<Node<K, V>> {
    n.update();
    let b = n.balance();
    if b > 1 {
        // Left-right: straighten the left child first.
        if n.left.as_ref().is_some_and(|l| l.balance() < 0) {
            n.left = n.left.take().map(rotate_left);
        }
        return rotate_right(n);
    }
    if b < -1 {
        // Right-left.
        if n.right.as_ref().is_some_and(|r| r.balance() > 0) {
            n.right = n.right.take().map(rotate_right);
        }
        return rotate_left(n);
    }
    n
}

fn insert_at<K, V>(link: Link<K, V>, key: K, value: V, cmp: Comparator<K>) -> Box<Node<K, V>> {
    let Some(mut n) = link else {
        return Node::leaf(key, value);
    };
    if cmp(&key, &n.key) == Ordering::Less {
        n.left = Some(insert_at(n.left.take(), key, value, cmp));
    } else {
        n.right = Some(insert_at(n.right.take(), key, value, cmp));
    }
    rebalance(n)
}

fn upsert_at<K, V>(
    link: Link<K, V>,
    key: K,
    value: V,
    cmp: Comparator<K>,
    replaced: &mut Option<V>,
) -> Box<Node<K, V>> {
    let Some(mut n) = link else {
        return Node::leaf(key, value);
    };
    match cmp(&key, &n.key) {
        Ordering::Equal => {
            // Shape is unchanged; no rebalancing needed.
            *replaced = Some(mem::replace(&mut n.value, value));
            n
        }
        Ordering::Less => {
            n.left = Some(upsert_at(n.left.take(), key, value, cmp, replaced));
            rebalance(n)
        }
        Ordering::Greater => {
            n.right = Some(upsert_at(n.right.take(), key, value, cmp, replaced));
            rebalance(n)
        }
    }
}

/// Detach the leftmost node of `n`, returning it and the rebalanced rest.
fn take_min<K, V>(mut n: Box<Node<K, V>>) -> (Box<Node<K, V>>, Link<K, V>) {
    match n.left.take() {
        None => {
            let rest = n.right.take();
            (n, rest)
        }
        Some(left) => {
            let (min, rest) = take_min(left);
            n.left = rest;
            (min, Some(rebalance(n)))
        }
    }
}

fn remove_at<K, V>(
    link: Link<K, V>,
    key: &K,
    cmp: Comparator<K>,
    removed: &mut Option<(K, V)>,
) -> Link<K, V> {
    let mut n = link?;
    match cmp(key, &n.key) {
        Ordering::Less => n.left = remove_at(n.left.take(), key, cmp, removed),
        Ordering::Greater => n.right = remove_at(n.right.take(), key, cmp, removed),
        Ordering::Equal => {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = *n;
            *removed = Some((key, value));
            return match (left, right) {
                (None, child) | (child, None) => child,
                (Some(left), Some(right)) => {
                    let (mut successor, rest) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(rebalance(successor))
                }
            };
        }
    }
    Some(rebalance(n))
}

/// Checks heights and balance factors; returns the subtree height.
fn check<K, V>(link: &Link<K, V>) -> Option<i32> {
    let Some(n) = link else {
        return Some(0);
    };
    let lh = check(&n.left)?;
    let rh = check(&n.right)?;
    let h = 1 + lh.max(rh);
    ((lh - rh).abs() <= 1 && n.height == h).then_some(h)
}

/// Ordered key/value store with O(log n) insert, upsert and remove.
///
/// Equal keys are allowed through [`insert`](Self::insert) and keep their
/// insertion order during traversal.
pub struct OrderStatTree<K, V> {
    root: Link<K, V>,
    len: usize,
    cmp: Comparator<K>,
}

impl<K: Ord, V> OrderStatTree<K, V> {
    /// Ascending order.
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }

    /// Descending order: in-order traversal yields the greatest key first.
    pub fn descending() -> Self {
        Self::with_comparator(|a, b| b.cmp(a))
    }
}

impl<K: Ord, V> Default for OrderStatTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderStatTree<K, V> {
    /// Order keys with `cmp`.
    pub fn with_comparator(cmp: fn(&K, &K) -> Ordering) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Insert a new node, even if an equal key exists.
    pub fn insert(&mut self, key: K, value: V) {
        self.root = Some(insert_at(self.root.take(), key, value, self.cmp));
        self.len += 1;
    }

    /// Overwrite the value stored under an equal key, or insert a new node.
    ///
    /// Returns the previous value when one was replaced.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        self.root = Some(upsert_at(self.root.take(), key, value, self.cmp, &mut replaced));
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Remove one node with a key equal to `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut removed = None;
        self.root = remove_at(self.root.take(), key, self.cmp, &mut removed);
        let (_, value) = removed?;
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cur = self.root.as_deref();
        while let Some(n) = cur {
            cur = match (self.cmp)(key, &n.key) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Greater => n.right.as_deref(),
                Ordering::Equal => return Some(&n.value),
            };
        }
        None
    }

    /// The first `k` values in order.
    pub fn top_k(&self, k: usize) -> Vec<&V> {
        self.iter().take(k).map(|(_, v)| v).collect()
    }

    /// In-order iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root; 0 when empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Drop every node and re-insert `values` under keys derived by `key_fn`.
    pub fn rebuild<I, F>(&mut self, values: I, mut key_fn: F)
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        self.clear();
        for value in values {
            let key = key_fn(&value);
            self.insert(key, value);
        }
    }

    /// Whether every node's stored height is exact and its balance factor
    /// lies in `-1..=1`.
    pub fn is_balanced(&self) -> bool {
        check(&self.root).is_some()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderStatTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// In-order iterator returned by [`OrderStatTree::iter`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut cur: Option<&'a Node<K, V>>) {
        while let Some(n) = cur {
            self.stack.push(n);
            cur = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left(n.right.as_deref());
        Some((&n.key, &n.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Copy, V>(t: &OrderStatTree<K, V>) -> Vec<K> {
        t.iter().map(|(k, _)| *k).collect()
    }

    fn scrambled(n: u32) -> impl Iterator<Item = u32> {
        // 37 is coprime with 101, so this visits every value once.
        (0..n).map(|i| (i * 37) % 101)
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut t = OrderStatTree::new();
        for i in 0..100 {
            t.insert(i, i * 10);
            assert!(t.is_balanced(), "unbalanced after inserting {i}");
        }
        assert_eq!(t.len(), 100);
        assert!(t.height() <= 9, "height {}", t.height());
        assert_eq!(keys(&t), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn in_order_is_sorted() {
        let mut t = OrderStatTree::new();
        for k in scrambled(101) {
            t.insert(k, ());
        }
        let ks = keys(&t);
        assert!(ks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ks.len(), 101);
        assert!(t.is_balanced());
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let mut t = OrderStatTree::new();
        t.insert(1, "a");
        t.insert(0, "z");
        t.insert(1, "b");
        t.insert(1, "c");
        let vals: Vec<_> = t.iter().map(|(_, v)| *v).collect();
        assert_eq!(vals, vec!["z", "a", "b", "c"]);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut t = OrderStatTree::new();
        for k in scrambled(50) {
            t.upsert(k, 0);
        }
        let h = t.height();
        let len = t.len();

        assert_eq!(t.upsert(37, 5), Some(0));
        assert_eq!(t.get(&37), Some(&5));
        assert_eq!(t.height(), h);
        assert_eq!(t.len(), len);

        assert_eq!(t.upsert(1000, 1), None);
        assert_eq!(t.len(), len + 1);
        assert!(t.is_balanced());
    }

    #[test]
    fn remove_rebalances() {
        let mut t = OrderStatTree::new();
        for k in 0..64 {
            t.insert(k, k);
        }
        for k in (0..64).step_by(2) {
            assert_eq!(t.remove(&k), Some(k));
            assert!(t.is_balanced(), "unbalanced after removing {k}");
        }
        assert_eq!(t.remove(&0), None);
        assert_eq!(t.len(), 32);
        assert_eq!(keys(&t), (1..64).step_by(2).collect::<Vec<_>>());
        assert_eq!(t.get(&2), None);
        assert_eq!(t.get(&3), Some(&3));
    }

    #[test]
    fn remove_everything() {
        let mut t = OrderStatTree::new();
        for k in scrambled(30) {
            t.insert(k, ());
        }
        for k in scrambled(30) {
            assert!(t.remove(&k).is_some());
            assert!(t.is_balanced());
        }
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.height(), 0);
    }

    #[test]
    fn descending_yields_greatest_first() {
        let mut t = OrderStatTree::descending();
        for k in [3, 9, 1, 7] {
            t.insert(k, k.to_string());
        }
        assert_eq!(keys(&t), vec![9, 7, 3, 1]);
        assert_eq!(t.top_k(2), vec!["9", "7"]);
    }

    #[test]
    fn custom_comparator() {
        let mut t: OrderStatTree<(i32, char), ()> =
            OrderStatTree::with_comparator(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));
        t.insert((1, 'b'), ());
        t.insert((2, 'a'), ());
        t.insert((5, 'b'), ());
        assert_eq!(keys(&t), vec![(2, 'a'), (5, 'b'), (1, 'b')]);
    }

    #[test]
    fn top_k_is_bounded() {
        let mut t = OrderStatTree::new();
        for k in 0..5 {
            t.insert(k, k);
        }
        assert_eq!(t.top_k(3), vec![&0, &1, &2]);
        assert_eq!(t.top_k(10).len(), 5);
        assert!(t.top_k(0).is_empty());
    }

    #[test]
    fn rebuild_rekeys_everything() {
        let mut t = OrderStatTree::new();
        for (k, v) in [(1, "ccc"), (2, "a"), (3, "bb")] {
            t.insert(k, v);
        }
        let values: Vec<&str> = t.iter().map(|(_, v)| *v).collect();
        t.rebuild(values, |v| v.len());
        assert_eq!(t.top_k(3), vec![&"a", &"bb", &"ccc"]);
        assert_eq!(t.len(), 3);

        t.clear();
        assert!(t.is_empty());
        assert!(t.is_balanced());
    }
}
