//! Registry of collectible objectives placed on the grid.

use std::collections::HashMap;

use mazerun_core::Point;

/// Collectible positions and whether each one has been picked up.
///
/// Lookups are by hash so the per-step interception check stays O(1).
#[derive(Debug, Clone, Default)]
pub struct Collectibles {
    collected: HashMap<Point, bool>,
    order: Vec<Point>,
    count: usize,
}

impl Collectibles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a collectible at `p`. Returns `false` if one is already there.
    pub fn place(&mut self, p: Point) -> bool {
        if self.collected.contains_key(&p) {
            return false;
        }
        self.collected.insert(p, false);
        self.order.push(p);
        true
    }

    /// Whether a collectible was ever placed at `p`.
    pub fn contains(&self, p: Point) -> bool {
        self.collected.contains_key(&p)
    }

    /// Whether `p` holds a collectible that has not been picked up yet.
    pub fn is_uncollected(&self, p: Point) -> bool {
        self.collected.get(&p) == Some(&false)
    }

    /// Pick up the collectible at `p`. Returns `true` only the first time.
    pub fn collect(&mut self, p: Point) -> bool {
        match self.collected.get_mut(&p) {
            Some(done) if !*done => {
                *done = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    /// All positions, in placement order.
    pub fn positions(&self) -> &[Point] {
        &self.order
    }

    /// Positions still waiting to be collected, in placement order.
    pub fn uncollected(&self) -> impl Iterator<Item = Point> + '_ {
        self.order.iter().copied().filter(|&p| self.is_uncollected(p))
    }

    pub fn collected_count(&self) -> usize {
        self.count
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.count
    }

    pub fn all_collected(&self) -> bool {
        self.remaining() == 0
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Point> for Collectibles {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut c = Collectibles::new();
        for p in iter {
            c.place(p);
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_deduplicates() {
        let mut c = Collectibles::new();
        assert!(c.place(Point::new(1, 1)));
        assert!(!c.place(Point::new(1, 1)));
        assert!(c.place(Point::new(2, 0)));
        assert_eq!(c.len(), 2);
        assert_eq!(c.positions(), &[Point::new(1, 1), Point::new(2, 0)]);
    }

    #[test]
    fn collect_only_once() {
        let mut c: Collectibles = [Point::new(0, 1), Point::new(3, 3)].into_iter().collect();
        assert!(c.is_uncollected(Point::new(3, 3)));
        assert!(c.collect(Point::new(3, 3)));
        assert!(!c.collect(Point::new(3, 3)));
        assert!(!c.collect(Point::new(9, 9)));
        assert!(c.contains(Point::new(3, 3)));
        assert!(!c.is_uncollected(Point::new(3, 3)));
        assert_eq!(c.collected_count(), 1);
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.uncollected().collect::<Vec<_>>(), vec![Point::new(0, 1)]);
        assert!(!c.all_collected());
        c.collect(Point::new(0, 1));
        assert!(c.all_collected());
    }
}
