//! Disjoint-set forest backing Kruskal's cycle checks.
//!
//! Union by rank keeps trees shallow and `find` compresses every path it
//! walks, so both operations run in near-constant amortised time. The forest
//! also tracks the number of live components so callers can detect early
//! that a spanning tree is complete.

/// Union-find over the node ids `0..len`.
///
/// Indices outside `0..len` are a caller contract violation and panic.
///
/// # Examples
/// ```
/// use colonet_core::DisjointSet;
///
/// let mut sets = DisjointSet::new(3);
/// assert!(sets.union(0, 1));
/// assert!(!sets.union(1, 0));
/// assert!(sets.same_set(0, 1));
/// assert_eq!(sets.components(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Returns the number of elements tracked by the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the forest tracks no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint sets.
    #[must_use]
    #[rustfmt::skip]
    pub fn components(&self) -> usize { self.components }

    /// Returns the representative of the set containing `node`.
    ///
    /// Every node visited on the way up is re-pointed at the root.
    ///
    /// # Panics
    /// Panics when `node >= self.len()`.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Returns `true` when `left` and `right` share a representative.
    ///
    /// # Panics
    /// Panics when either index is `>= self.len()`.
    pub fn same_set(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// The lower-ranked root is attached beneath the higher-ranked one. On a
    /// rank tie the root of `right` moves under the root of `left`, whose rank
    /// grows by one. Returns `false` when both already share a set.
    ///
    /// # Panics
    /// Panics when either index is `>= self.len()`.
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }

        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }
}
