//! Depth-first tour search with cost pruning.

use tracing::trace;

use crate::matrix::SquareMatrix;

use super::{Tour, link};

struct Search<'a> {
    distances: &'a SquareMatrix,
    path: Vec<usize>,
    visited: Vec<bool>,
    best: Option<Tour>,
    pruned: u64,
}

impl Search<'_> {
    fn beaten_by_incumbent(&self, cost: u64) -> bool {
        self.best.as_ref().is_some_and(|best| cost >= best.cost)
    }

    fn extend(&mut self, current: usize, cost: u64) {
        let node_count = self.distances.order();
        if self.path.len() == node_count {
            self.close(current, cost);
            return;
        }

        for next in 1..node_count {
            if self.visited[next] {
                continue;
            }
            let Some(distance) = link(self.distances, current, next) else {
                continue;
            };
            let extended = cost + u64::from(distance);
            if self.beaten_by_incumbent(extended) {
                self.pruned += 1;
                continue;
            }

            self.visited[next] = true;
            self.path.push(next);
            self.extend(next, extended);
            self.path.pop();
            self.visited[next] = false;
        }
    }

    fn close(&mut self, last: usize, cost: u64) {
        let Some(distance) = link(self.distances, last, 0) else {
            return;
        };
        let total = cost + u64::from(distance);
        if self.beaten_by_incumbent(total) {
            return;
        }
        let mut path = self.path.clone();
        path.push(0);
        trace!(cost = total, "improved incumbent tour");
        self.best = Some(Tour { cost: total, path });
    }
}

/// Returns the cheapest tour, or `None` when no closed tour exists.
///
/// Expects at least two nodes.
pub(super) fn search(distances: &SquareMatrix) -> Option<Tour> {
    let node_count = distances.order();
    let mut visited = vec![false; node_count];
    visited[0] = true;
    let mut path = Vec::with_capacity(node_count + 1);
    path.push(0);

    let mut search = Search {
        distances,
        path,
        visited,
        best: None,
        pruned: 0,
    };
    search.extend(0, 0);
    trace!(pruned = search.pruned, "backtracking search finished");
    search.best
}
