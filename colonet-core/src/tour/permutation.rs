//! Exhaustive tour search over lexicographic orderings.

use tracing::trace;

use crate::matrix::SquareMatrix;

use super::{Tour, link};

/// Rearranges `items` into the next lexicographically greater ordering.
///
/// Returns `false` (leaving `items` as the last ordering) when none exists.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let successor = items
        .iter()
        .rposition(|&item| item > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

/// Cost of the cycle `0 -> order[0] -> ... -> order[last] -> 0`, or `None`
/// when a leg has no link.
fn cycle_cost(distances: &SquareMatrix, order: &[usize]) -> Option<u64> {
    let legs = std::iter::once(0)
        .chain(order.iter().copied())
        .zip(order.iter().copied().chain(std::iter::once(0)));
    legs.map(|(from, to)| link(distances, from, to).map(u64::from))
        .sum()
}

/// Returns the cheapest tour, or `None` when no closed tour exists.
///
/// Expects at least two nodes.
pub(super) fn search(distances: &SquareMatrix) -> Option<Tour> {
    let mut order: Vec<usize> = (1..distances.order()).collect();
    let mut best: Option<(u64, Vec<usize>)> = None;
    let mut scored: u64 = 0;

    loop {
        scored += 1;
        if let Some(cost) = cycle_cost(distances, &order)
            && best.as_ref().is_none_or(|(incumbent, _)| cost < *incumbent)
        {
            best = Some((cost, order.clone()));
        }
        if !next_permutation(&mut order) {
            break;
        }
    }

    trace!(scored, "permutation search finished");
    best.map(|(cost, order)| {
        let mut path = Vec::with_capacity(order.len() + 2);
        path.push(0);
        path.extend(order);
        path.push(0);
        Tour { cost, path }
    })
}
