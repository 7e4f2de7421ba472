use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Candidate edge in the complete attribute graph. Ordered by weight with
/// node indices as the final tie-break so the heap pops deterministically.
struct Edge {
    weight: f64,
    from: usize,
    to: usize,
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Edge {}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| other.from.cmp(&self.from))
            .then_with(|| other.to.cmp(&self.to))
    }
}

/// Maximum-weight spanning tree over the complete graph of attributes,
/// rooted at attribute 0, via Prim's algorithm: grow a reached set from the
/// root, always attaching the unreached node behind the heaviest available
/// edge. Returns one parent entry per attribute; the root has none.
pub(super) fn maximum_spanning_tree<F>(num_attributes: usize, weight: F) -> Vec<Option<usize>>
where
    F: Fn(usize, usize) -> f64,
{
    let mut parents = vec![None; num_attributes];
    if num_attributes < 2 {
        return parents;
    }

    let mut heap = BinaryHeap::new();
    for to in 1..num_attributes {
        heap.push(Edge {
            weight: weight(0, to),
            from: 0,
            to,
        });
    }

    let mut reached = vec![false; num_attributes];
    reached[0] = true;
    let mut num_reached = 1;

    while num_reached < num_attributes {
        let Some(edge) = heap.pop() else { break };
        if reached[edge.to] {
            continue;
        }
        reached[edge.to] = true;
        num_reached += 1;
        parents[edge.to] = Some(edge.from);

        for to in 0..num_attributes {
            if !reached[to] {
                heap.push(Edge {
                    weight: weight(edge.to, to),
                    from: edge.to,
                    to,
                });
            }
        }
    }
    parents
}
