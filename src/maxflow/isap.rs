/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! This module implements the improved shortest augmenting path algorithm.
//!
//! Each node carries a distance label `level[u]`, a lower bound on the
//! length of a shortest path from `u` to the sink in the residual network.
//! Flow is augmented along paths of *admissible* edges, i.e. edges `(u,v)`
//! with positive residual capacity and `level[u] == level[v] + 1`. If a
//! node has no admissible edge, it is relabelled. The algorithm stops as
//! soon as some level becomes empty (gap heuristic) or the level of the
//! source reaches `n`.
//!
//! The running time is `O(n^2 m)`.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::traits::*;
//! use rs_maxflow::maxflow::isap;
//! use rs_maxflow::{Buildable, Builder, EdgeProperty, VecGraph};
//!
//! let mut b = VecGraph::<u32>::new_builder();
//! let s = b.add_node();
//! let t = b.add_node();
//! let v1 = b.add_node();
//! let v2 = b.add_node();
//! let mut upper = vec![];
//! for &(u, v, c) in &[(s, v1, 5), (s, v2, 5), (v1, v2, 1), (v1, t, 2), (v2, t, 4)] {
//!     b.add_twin_edges(u, v);
//!     upper.push(c);
//!     upper.push(0);
//! }
//! let g = b.into_graph();
//! let upper = EdgeProperty::from_vec(upper);
//!
//! let (value, flow, mut mincut) = isap(&g, &upper, s, t);
//! assert_eq!(value, 6);
//! assert!(g.edges().all(|e| flow[e] <= upper[e]));
//!
//! mincut.sort_by_key(|&u| g.node_id(u));
//! assert_eq!(mincut, vec![s, v1, v2]);
//! ```

use super::residual::Residual;
use super::{check_input, mincut, Flow, MaxFlow};
use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use log::debug;
use std::collections::VecDeque;

/// The improved shortest augmenting path algorithm.
///
/// This struct contains all algorithmic working data.
pub struct ImprovedSap<F> {
    /// The residual network.
    net: Residual<F>,
    /// The distance label of each node.
    level: Vec<usize>,
    /// The number of nodes with a certain label.
    ///
    /// The entry `n` counts the nodes that are cut off from the sink.
    n_level: Vec<usize>,
    /// The current edge of each node (a position in `net.arcs`).
    current: Vec<usize>,
    /// The edges of the current path from the source.
    path: Vec<usize>,
    /// The queue of nodes for the initial BFS.
    queue: VecDeque<usize>,
    /// The number of augmentations in the last run.
    pub cnt_augment: usize,
    /// The number of relabel operations in the last run.
    pub cnt_relabel: usize,
}

impl<F> ImprovedSap<F>
where
    F: Flow,
{
    /// Create a new algorithm object.
    ///
    /// The working data is allocated on the first call to `solve`.
    pub fn new() -> Self {
        ImprovedSap {
            net: Residual::new(),
            level: vec![],
            n_level: vec![],
            current: vec![],
            path: vec![],
            queue: VecDeque::new(),
            cnt_augment: 0,
            cnt_relabel: 0,
        }
    }

    /// Compute exact labels by a BFS from the sink.
    ///
    /// The BFS runs backwards, i.e. node `u` gets label `level[v] + 1` if the
    /// edge `(u,v)` has positive residual capacity. Nodes that cannot reach
    /// the sink get label `n`.
    fn init_levels(&mut self, snk: usize) {
        let n = self.net.num_nodes();
        self.level.clear();
        self.level.resize(n, n);
        self.n_level.clear();
        self.n_level.resize(n + 1, 0);

        self.level[snk] = 0;
        self.queue.clear();
        self.queue.push_back(snk);
        while let Some(v) = self.queue.pop_front() {
            let d = self.level[v] + 1;
            for &e in &self.net.arcs[self.net.first[v]..self.net.first[v + 1]] {
                let u = self.net.head[e];
                if self.level[u] == n && self.net.res[self.net.twin[e]] > F::zero() {
                    self.level[u] = d;
                    self.queue.push_back(u);
                }
            }
        }

        for &l in &self.level {
            self.n_level[l] += 1;
        }
    }

    /// Augment along the current path.
    ///
    /// Returns the amount of flow that has been sent.
    fn augment(&mut self) -> F {
        let net = &mut self.net;
        let df = self
            .path
            .iter()
            .map(|&e| net.res[e])
            .min()
            .expect("augmenting path must not be empty");
        debug_assert!(df > F::zero());
        for &e in &self.path {
            net.push(e, df);
        }
        self.path.clear();
        self.cnt_augment += 1;
        df
    }

    /// Relabel node `u` and return `false` if this creates a gap.
    fn relabel(&mut self, u: usize) -> bool {
        let n = self.net.num_nodes();
        let (beg, end) = (self.net.first[u], self.net.first[u + 1]);

        let mut h = n;
        let mut cur = beg;
        for i in beg..end {
            let e = self.net.arcs[i];
            if self.net.res[e] > F::zero() {
                let l = self.level[self.net.head[e]];
                if l < h {
                    h = l;
                    cur = i;
                }
            }
        }
        let h = (h + 1).min(n);

        self.cnt_relabel += 1;
        let old = self.level[u];
        debug_assert!(h > old);
        self.n_level[old] -= 1;
        if self.n_level[old] == 0 {
            // gap: no node with a larger label can reach the sink anymore
            return false;
        }
        self.level[u] = h;
        self.n_level[h] += 1;
        self.current[u] = cur;
        true
    }
}

impl<F> Default for ImprovedSap<F>
where
    F: Flow,
{
    fn default() -> Self {
        ImprovedSap::new()
    }
}

impl<F> MaxFlow<F> for ImprovedSap<F>
where
    F: Flow,
{
    fn solve<'a, G>(
        &mut self,
        g: &'a G,
        capacity: &EdgeProperty<F>,
        src: G::Node,
        snk: G::Node,
        flow: &mut EdgeProperty<F>,
    ) -> F
    where
        G: TwinDigraph<'a>,
    {
        let (src, snk) = check_input(g, capacity, src, snk, flow);
        self.cnt_augment = 0;
        self.cnt_relabel = 0;
        if src == snk {
            flow.fill(F::zero());
            return F::zero();
        }

        let n = g.num_nodes();
        self.net.init(g, capacity);
        self.init_levels(snk);
        self.current.clear();
        self.current.extend_from_slice(&self.net.first[..n]);
        self.path.clear();

        let mut value = F::zero();
        let mut u = src;
        while self.level[src] < n {
            if u == snk {
                value += self.augment();
                u = src;
                continue;
            }

            // look for an admissible edge
            let end = self.net.first[u + 1];
            let mut cur = self.current[u];
            while cur < end {
                let e = self.net.arcs[cur];
                if self.net.res[e] > F::zero() && self.level[u] == self.level[self.net.head[e]] + 1 {
                    break;
                }
                cur += 1;
            }

            if cur < end {
                // advance
                self.current[u] = cur;
                let e = self.net.arcs[cur];
                self.path.push(e);
                u = self.net.head[e];
            } else {
                // retreat
                if !self.relabel(u) {
                    debug!("ImprovedSap: gap at level {}", self.level[u]);
                    break;
                }
                if let Some(e) = self.path.pop() {
                    u = self.net.tail(e);
                }
            }
        }

        self.net.write_flow(capacity, flow);

        debug!(
            "ImprovedSap: value reached after {} augmentations and {} relabels",
            self.cnt_augment, self.cnt_relabel
        );

        value
    }
}

/// Solve the maxflow problem using the improved shortest augmenting path
/// algorithm.
///
/// The function solves the max flow problem from the source node `src` to
/// the sink node `snk` with the given `capacity` on the edges.
///
/// The function returns the flow value, the flow on each edge and the
/// nodes in a minimal cut.
pub fn isap<'a, G, F>(
    g: &'a G,
    capacity: &EdgeProperty<F>,
    src: G::Node,
    snk: G::Node,
) -> (F, EdgeProperty<F>, Vec<G::Node>)
where
    G: TwinDigraph<'a>,
    F: Flow,
{
    let mut flow = EdgeProperty::new(g, F::zero());
    let value = ImprovedSap::new().solve(g, capacity, src, snk, &mut flow);
    let cut = mincut(g, capacity, &flow, src);
    (value, flow, cut)
}

#[cfg(test)]
mod tests {
    use super::{isap, ImprovedSap};
    use crate::maxflow::tests::random_network;
    use crate::maxflow::{verify, MaxFlow};
    use crate::traits::*;
    use crate::{classes, Buildable, Builder, EdgeProperty, VecGraph};

    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_isap() {
        let mut g = VecGraph::<u32>::new_builder();
        let mut upper = vec![];
        let s = g.add_node();
        let t = g.add_node();
        let v1 = g.add_node();
        let v2 = g.add_node();
        let v3 = g.add_node();
        let v4 = g.add_node();
        for &(u, v, c) in &[
            (s, v1, 15),
            (s, v3, 10),
            (v1, v2, 6),
            (v1, v3, 7),
            (v2, t, 5),
            (v2, v4, 2),
            (v3, v2, 11),
            (v3, v4, 4),
            (v4, v2, 4),
            (v4, t, 20),
        ] {
            g.add_twin_edges(u, v);
            upper.push(c);
            upper.push(0);
        }

        let g = g.into_graph();
        let upper = EdgeProperty::from_vec(upper);
        let (value, flow, _) = isap(&g, &upper, s, t);

        assert_eq!(value, 11);
        assert!(verify::check(&g, &upper, &flow, s, t, value).is_ok());
        assert!(g.edges().step_by(2).all(|e| flow[e] >= 0 && flow[e] <= upper[e]));
    }

    #[test]
    fn test_disconnected() {
        let g: VecGraph = classes::layered(&[1, 2, 2, 1]);
        let mut upper = EdgeProperty::new(&g, 0);
        // only the edges out of the first layer have capacity
        for (e, _) in g.outedges(g.id2node(0)) {
            upper[e] = 4;
        }
        let mut alg = ImprovedSap::new();
        let mut flow = EdgeProperty::new(&g, 0);
        let value = alg.solve(&g, &upper, g.id2node(0), g.id2node(5), &mut flow);
        assert_eq!(value, 0);
        assert_eq!(alg.cnt_augment, 0);
        assert!(flow.iter().all(|&f| f == 0));
    }

    #[test]
    fn test_reuse() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        let mut alg = ImprovedSap::new();
        for &n in &[30, 5, 50, 2] {
            let (g, upper) = random_network(rng, n, 4 * n, 30);
            let (s, t) = (g.id2node(0), g.id2node(n - 1));
            let mut flow = EdgeProperty::new(&g, 0);
            let value = alg.solve(&g, &upper, s, t, &mut flow);
            assert_eq!(verify::check(&g, &upper, &flow, s, t, value), Ok(()));

            // a fresh object gives the same value
            let (value2, _, _) = isap(&g, &upper, s, t);
            assert_eq!(value, value2);
        }
    }
}
