// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Maximum flow algorithms.
//!
//! All algorithms solve the maximum flow problem on a bidirectional graph,
//! i.e. a graph in which each edge `e` has a twin edge running in the
//! opposite direction. The twin is used to store the residual capacity of
//! the backward direction of `e`. If the original network does not
//! contain the reverse edge, it should be added with capacity 0.
//!
//! The algorithms compute a flow with `flow[e] = capacity[e] -
//! residual[e]`. Hence the flow is skew symmetric, `flow[twin(e)] ==
//! -flow[e]`, and the flow on a twin with capacity 0 is non-positive. The
//! flow value type must therefore be able to represent negative numbers.
//!
//! There are three algorithms implementing the common `MaxFlow` trait:
//!
//! - [`ImprovedSap`](isap::ImprovedSap): shortest augmenting paths with
//!   distance labels and the gap heuristic, good on sparse graphs,
//! - [`PushRelabel`](pushrelabel::PushRelabel): highest-label
//!   push-relabel with the gap and global relabelling heuristics, good on
//!   dense graphs,
//! - [`BoykovKolmogorov`](boykovkolmogorov::BoykovKolmogorov): growing
//!   search trees from both terminals, good on grid-like graphs with many
//!   short augmenting paths (e.g. from image segmentation).
//!
//! # Example
//!
//! ```
//! use rs_maxflow::traits::*;
//! use rs_maxflow::maxflow::{BoykovKolmogorov, ImprovedSap, MaxFlow, PushRelabel};
//! use rs_maxflow::{Buildable, Builder, EdgeProperty, VecGraph};
//!
//! let mut b = VecGraph::<u32>::new_builder();
//! let nodes = b.add_nodes(5);
//! let mut arcs = vec![];
//! for &(u, v, c) in &[(1, 2, 40), (1, 4, 20), (2, 4, 20), (2, 3, 30), (3, 4, 10)] {
//!     let (e, _) = b.add_twin_edges(nodes[u], nodes[v]);
//!     arcs.push((e, c));
//! }
//! let g = b.into_graph();
//!
//! let mut capacity = EdgeProperty::new(&g, 0);
//! for &(e, c) in &arcs {
//!     capacity[e] = c;
//! }
//!
//! let mut flow = EdgeProperty::new(&g, 0);
//! let s = g.id2node(1);
//! let t = g.id2node(4);
//! assert_eq!(ImprovedSap::new().solve(&g, &capacity, s, t, &mut flow), 50);
//! assert_eq!(PushRelabel::new().solve(&g, &capacity, s, t, &mut flow), 50);
//! assert_eq!(BoykovKolmogorov::new().solve(&g, &capacity, s, t, &mut flow), 50);
//! ```

use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use std::collections::VecDeque;

use crate::num::traits::{Bounded, NumAssign};

pub mod boykovkolmogorov;
pub mod isap;
pub mod pushrelabel;
pub mod verify;

mod residual;

pub use self::boykovkolmogorov::{boykov_kolmogorov, BoykovKolmogorov};
pub use self::isap::{isap, ImprovedSap};
pub use self::pushrelabel::{pushrelabel, PushRelabel};

/// Numbers that can be used as flow values.
pub trait Flow: NumAssign + Ord + Copy + Bounded {}

impl<F> Flow for F where F: NumAssign + Ord + Copy + Bounded {}

/// Common interface of all max flow algorithms.
///
/// An algorithm object only contains working data. It may be used for
/// several, unrelated problems; each call to `solve` reinitializes all
/// data.
pub trait MaxFlow<F>
where
    F: Flow,
{
    /// Solve the max flow problem from `src` to `snk`.
    ///
    /// The flow is written to `flow` and its value is returned. If `src ==
    /// snk`, the flow is zero.
    ///
    /// # Panics
    ///
    /// The method panics if `g` is not bidirectional, if `capacity` or
    /// `flow` do not have an entry for each edge, if some capacity is
    /// negative or if `src` or `snk` are not nodes of `g`.
    fn solve<'a, G>(
        &mut self,
        g: &'a G,
        capacity: &EdgeProperty<F>,
        src: G::Node,
        snk: G::Node,
        flow: &mut EdgeProperty<F>,
    ) -> F
    where
        G: TwinDigraph<'a>;
}

/// Check the preconditions of the max flow algorithms.
///
/// Returns the ids of the source and sink nodes.
pub(crate) fn check_input<'a, G, F>(
    g: &'a G,
    capacity: &EdgeProperty<F>,
    src: G::Node,
    snk: G::Node,
    flow: &EdgeProperty<F>,
) -> (usize, usize)
where
    G: TwinDigraph<'a>,
    F: Flow,
{
    assert!(g.is_bidirectional(), "Graph must be bidirectional");
    assert_eq!(capacity.len(), g.num_edges(), "Capacity must have an entry for each edge");
    assert_eq!(flow.len(), g.num_edges(), "Flow must have an entry for each edge");
    assert!(
        capacity.iter().all(|&c| c >= F::zero()),
        "Capacities must be non-negative"
    );
    let src = g.node_id(src);
    let snk = g.node_id(snk);
    assert!(src < g.num_nodes(), "Invalid source node");
    assert!(snk < g.num_nodes(), "Invalid sink node");
    (src, snk)
}

/// Return the minimal cut associated with a maximum flow.
///
/// The cut consists of all nodes that are reachable from `src` in the
/// residual network of `flow`.
pub fn mincut<'a, G, F>(g: &'a G, capacity: &EdgeProperty<F>, flow: &EdgeProperty<F>, src: G::Node) -> Vec<G::Node>
where
    G: TwinDigraph<'a>,
    F: Flow,
{
    let mut seen = vec![false; g.num_nodes()];
    let mut queue = VecDeque::with_capacity(g.num_nodes());
    seen[g.node_id(src)] = true;
    queue.push_back(src);
    while let Some(u) = queue.pop_front() {
        for (e, v) in g.outedges(u) {
            let eid = g.edge_id(e);
            let vid = g.node_id(v);
            if !seen[vid] && flow.as_slice()[eid] < capacity.as_slice()[eid] {
                seen[vid] = true;
                queue.push_back(v);
            }
        }
    }
    g.nodes().filter(|&u| seen[g.node_id(u)]).collect()
}

#[cfg(test)]
mod tests {
    use super::{mincut, BoykovKolmogorov, ImprovedSap, MaxFlow, PushRelabel};
    use crate::traits::*;
    use crate::{classes, Buildable, Builder, EdgeProperty, VecGraph};

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// Solve with all three algorithms and verify each flow.
    ///
    /// Returns the common flow value.
    pub(crate) fn solve_all(g: &VecGraph, capacity: &EdgeProperty<i64>, s: usize, t: usize) -> i64 {
        let (s, t) = (g.id2node(s), g.id2node(t));
        let mut flow = EdgeProperty::new(g, 0);

        let v1 = ImprovedSap::new().solve(g, capacity, s, t, &mut flow);
        super::verify::check(g, capacity, &flow, s, t, v1).unwrap();
        let v2 = PushRelabel::new().solve(g, capacity, s, t, &mut flow);
        super::verify::check(g, capacity, &flow, s, t, v2).unwrap();
        let v3 = BoykovKolmogorov::new().solve(g, capacity, s, t, &mut flow);
        super::verify::check(g, capacity, &flow, s, t, v3).unwrap();

        assert_eq!(v1, v2);
        assert_eq!(v1, v3);
        v1
    }

    /// Random network with `n` nodes and up to `m` edge pairs.
    ///
    /// Only the forward edge of each pair gets a positive capacity, some
    /// pairs get capacities in both directions.
    pub(crate) fn random_network<R: Rng>(rng: &mut R, n: usize, m: usize, maxcap: i64) -> (VecGraph, EdgeProperty<i64>) {
        let mut b = VecGraph::<u32>::new_builder();
        let nodes = b.add_nodes(n);
        let mut caps = vec![];
        for _ in 0..m {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u == v {
                continue;
            }
            let (e, f) = b.add_twin_edges(nodes[u], nodes[v]);
            caps.push((e, rng.random_range(0..=maxcap)));
            if rng.random_bool(0.2) {
                caps.push((f, rng.random_range(0..=maxcap)));
            }
        }
        let g = b.into_graph();
        let mut capacity = EdgeProperty::new(&g, 0);
        for (e, c) in caps {
            capacity[e] = c;
        }
        (g, capacity)
    }

    #[test]
    fn test_mincut_value() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);
        for _ in 0..20 {
            let (g, capacity) = random_network(rng, 30, 120, 20);
            let s = g.id2node(0);
            let t = g.id2node(29);
            let mut flow = EdgeProperty::new(&g, 0);
            let value = PushRelabel::new().solve(&g, &capacity, s, t, &mut flow);
            let cut = mincut(&g, &capacity, &flow, s);
            let mut incut = vec![false; g.num_nodes()];
            for &u in &cut {
                incut[g.node_id(u)] = true;
            }
            assert!(incut[0]);
            assert!(!incut[29]);
            let cutval = g
                .edges()
                .filter(|&e| incut[g.node_id(g.src(e))] && !incut[g.node_id(g.snk(e))])
                .map(|e| capacity[e])
                .sum::<i64>();
            assert_eq!(cutval, value);
        }
    }

    #[test]
    fn test_random_agreement() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        for &(n, m) in &[(2, 3), (5, 10), (10, 40), (20, 60), (50, 300), (100, 400)] {
            for _ in 0..10 {
                let (g, capacity) = random_network(rng, n, m, 100);
                let s = rng.random_range(0..n);
                let t = rng.random_range(0..n);
                solve_all(&g, &capacity, s, t);
            }
        }
    }

    #[test]
    fn test_grid() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let g: VecGraph = classes::grid(12, 9);
        let mut capacity = EdgeProperty::new(&g, 0);
        for e in g.edges().step_by(2) {
            capacity[e] = rng.random_range(0..50);
        }
        let s = g.num_nodes() - 2;
        let t = g.num_nodes() - 1;
        let value = solve_all(&g, &capacity, s, t);
        assert!(value > 0);
    }

    #[test]
    fn test_layered() {
        let g: VecGraph = classes::layered(&[1, 4, 4, 4, 1]);
        let capacity = EdgeProperty::from_vec(g.edges().map(|e| if g.edge_id(e) % 2 == 0 { 3 } else { 0 }).collect());
        // the first and last layer have 4 edges of capacity 3
        assert_eq!(solve_all(&g, &capacity, 0, 13), 12);
    }

    #[test]
    fn test_source_is_sink() {
        let g: VecGraph = classes::complete_graph(4);
        let capacity = EdgeProperty::new(&g, 5);
        let s = g.id2node(2);
        let mut flow = EdgeProperty::new(&g, 1);
        assert_eq!(ImprovedSap::new().solve(&g, &capacity, s, s, &mut flow), 0);
        assert!(flow.iter().all(|&f| f == 0));
        flow.fill(1);
        assert_eq!(PushRelabel::new().solve(&g, &capacity, s, s, &mut flow), 0);
        assert!(flow.iter().all(|&f| f == 0));
        flow.fill(1);
        assert_eq!(BoykovKolmogorov::new().solve(&g, &capacity, s, s, &mut flow), 0);
        assert!(flow.iter().all(|&f| f == 0));
    }

    #[test]
    #[should_panic(expected = "bidirectional")]
    fn test_not_bidirectional() {
        let g = VecGraph::<u32>::new_with(|b| {
            let nodes = b.add_nodes(2);
            b.add_edge(nodes[0], nodes[1]);
        });
        let capacity = EdgeProperty::new(&g, 1);
        let mut flow = EdgeProperty::new(&g, 0);
        ImprovedSap::new().solve(&g, &capacity, g.id2node(0), g.id2node(1), &mut flow);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_capacity() {
        let g: VecGraph = classes::path(2);
        let capacity = EdgeProperty::from_vec(vec![1, 0, -1, 0]);
        let mut flow = EdgeProperty::new(&g, 0);
        PushRelabel::new().solve(&g, &capacity, g.id2node(0), g.id2node(2), &mut flow);
    }
}
