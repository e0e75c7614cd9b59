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

//! This module implements a push relabel algorithm for solving max
//! flow problems.
//!
//! The algorithm works in two phases. The first phase computes a maximum
//! preflow by always discharging an active node with the highest label.
//! This implementation uses the gap heuristic and the global relabelling
//! heuristic. The second phase converts the preflow into a flow: flow
//! cycles are cancelled and the remaining excess is sent back to the
//! source in topological order.
//!
//! Each relabel operation counts `12` plus the degree of the node as work.
//! A global relabelling is done whenever the work since the last one
//! exceeds `2 * (6n + m)`, i.e. the heuristic runs after an amount of
//! relabel work linear in the size of the network.
//!
//! The running time is `O(n^3)`.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::traits::*;
//! use rs_maxflow::maxflow::pushrelabel;
//! use rs_maxflow::{Buildable, Builder, EdgeProperty, VecGraph};
//!
//! //      a---2-->b
//! //     /|\      ^\
//! //    5 | 1     | 4
//! //   /  1  \    2  \
//! //  s   |   \   |   t
//! //   \  |    \  |  /
//! //    5 |     \ | 5
//! //     \v      v|/
//! //      c---2-->d
//! let mut b = VecGraph::<u32>::new_builder();
//! let nodes = b.add_nodes(6);
//! let (s, a, bb, c, d, t) = (nodes[0], nodes[1], nodes[2], nodes[3], nodes[4], nodes[5]);
//! let mut upper = vec![];
//! for &(u, v, cap) in &[
//!     (s, a, 5), (s, c, 5), (a, bb, 2), (a, c, 1), (a, d, 1),
//!     (c, d, 2), (d, bb, 2), (bb, t, 4), (d, t, 5),
//! ] {
//!     b.add_twin_edges(u, v);
//!     upper.push(cap);
//!     upper.push(0);
//! }
//! let g = b.into_graph();
//! let upper = EdgeProperty::from_vec(upper);
//!
//! let (value, flow, mut mincut) = pushrelabel(&g, &upper, s, t);
//!
//! assert_eq!(value, 5);
//! assert!(g.edges().all(|e| flow[e] <= upper[e]));
//! assert!(g
//!     .nodes()
//!     .filter(|&u| u != s && u != t)
//!     .all(|u| g.outedges(u).map(|(e, _)| flow[e]).sum::<i32>() == 0));
//!
//! mincut.sort_by_key(|&u| g.node_id(u));
//! assert_eq!(mincut, vec![s, a, c]);
//! ```

use super::residual::Residual;
use super::{check_input, mincut, Flow, MaxFlow};
use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use log::{debug, trace};
use std::cmp::min;
use std::collections::VecDeque;

/// Marks the end of a node list.
const NIL: usize = usize::max_value();

/// Work per node for the global relabelling frequency.
const ALPHA: usize = 6;

/// Base work of a single relabel operation.
const BETA: usize = 12;

/// The nodes of some distance label.
///
/// Active nodes are kept in a singly linked list, inactive nodes in a
/// doubly linked list (nodes may be removed from the middle when they
/// become active).
#[derive(Clone)]
struct Layer {
    /// The first active node.
    active: usize,
    /// The first inactive node.
    inactive: usize,
}

impl Layer {
    fn empty() -> Self {
        Layer {
            active: NIL,
            inactive: NIL,
        }
    }

    fn is_empty(&self) -> bool {
        self.active == NIL && self.inactive == NIL
    }
}

/// Colors of the DFS in the second phase.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// The push-relabel algorithm.
///
/// This struct contains all algorithmic working data.
pub struct PushRelabel<F> {
    /// The residual network.
    net: Residual<F>,
    /// The excess of flow of each node.
    excess: Vec<F>,
    /// The distance label of each node.
    distance: Vec<usize>,
    /// The current edge of each node (a position in `net.arcs`).
    current: Vec<usize>,
    /// Next node in the list of the node's layer.
    next: Vec<usize>,
    /// Previous node in the (inactive) list of the node's layer.
    prev: Vec<usize>,
    /// The layers of nodes with distance label `0..n`.
    layers: Vec<Layer>,
    /// The queue of nodes for a BFS.
    queue: VecDeque<usize>,
    /// The largest distance label of a node in some layer.
    max_distance: usize,
    /// Upper bound on the largest label of an active node.
    max_active: usize,
    /// Lower bound on the smallest label of an active node.
    min_active: usize,
    /// Relabel work since the last global relabelling.
    work: usize,
    /// DFS colors in the second phase.
    color: Vec<Color>,
    /// DFS parents in the second phase.
    parent: Vec<usize>,
    /// The nodes in the order they have been finished by the DFS.
    order: Vec<usize>,

    /// Whether to use the global relabelling heuristic.
    ///
    /// If `false`, exact labels are only computed once at the beginning.
    pub use_global_relabelling: bool,
    /// The number of relabel operations in the last run.
    pub cnt_relabel: usize,
    /// The number of gaps found in the last run.
    pub cnt_gap: usize,
    /// The number of global relabellings in the last run.
    pub cnt_global_update: usize,
    /// The number of flow cycles cancelled in the last run.
    pub cnt_cycle: usize,
}

impl<F> PushRelabel<F>
where
    F: Flow,
{
    /// Create a new algorithm object.
    ///
    /// The working data is allocated on the first call to `solve`.
    pub fn new() -> Self {
        PushRelabel {
            net: Residual::new(),
            excess: vec![],
            distance: vec![],
            current: vec![],
            next: vec![],
            prev: vec![],
            layers: vec![],
            queue: VecDeque::new(),
            max_distance: 0,
            max_active: 0,
            min_active: 0,
            work: 0,
            color: vec![],
            parent: vec![],
            order: vec![],
            use_global_relabelling: true,
            cnt_relabel: 0,
            cnt_gap: 0,
            cnt_global_update: 0,
            cnt_cycle: 0,
        }
    }

    fn add_active(&mut self, u: usize) {
        let d = self.distance[u];
        self.next[u] = self.layers[d].active;
        self.layers[d].active = u;
        self.max_active = self.max_active.max(d);
        self.min_active = self.min_active.min(d);
    }

    fn add_inactive(&mut self, u: usize) {
        let d = self.distance[u];
        let first = self.layers[d].inactive;
        self.next[u] = first;
        self.prev[u] = NIL;
        if first != NIL {
            self.prev[first] = u;
        }
        self.layers[d].inactive = u;
    }

    fn remove_inactive(&mut self, u: usize) {
        let (p, q) = (self.prev[u], self.next[u]);
        if p != NIL {
            self.next[p] = q;
        } else {
            self.layers[self.distance[u]].inactive = q;
        }
        if q != NIL {
            self.prev[q] = p;
        }
    }

    /// Initialize the preflow.
    ///
    /// The source sends as much flow as possible to its neighbors. The
    /// excess of the source is the sum of the capacities of its outgoing
    /// edges; if that sum is not representable, it is `F::max_value()`.
    fn init_preflow(&mut self, src: usize) {
        let n = self.net.num_nodes();
        self.excess.clear();
        self.excess.resize(n, F::zero());
        self.distance.clear();
        self.distance.resize(n, 0);
        self.current.clear();
        self.current.extend_from_slice(&self.net.first[..n]);
        self.next.clear();
        self.next.resize(n, NIL);
        self.prev.clear();
        self.prev.resize(n, NIL);
        self.layers.clear();
        self.layers.resize(n, Layer::empty());
        self.work = 0;

        let (beg, end) = (self.net.first[src], self.net.first[src + 1]);
        let mut total = F::zero();
        for i in beg..end {
            let r = self.net.res[self.net.arcs[i]];
            total = if total > F::max_value() - r {
                F::max_value()
            } else {
                total + r
            };
        }
        self.excess[src] = total;

        for i in beg..end {
            let a = self.net.arcs[i];
            let v = self.net.head[a];
            if v == src {
                continue;
            }
            let df = min(self.excess[src], self.net.res[a]);
            if df > F::zero() {
                self.net.push(a, df);
                self.excess[src] -= df;
                self.excess[v] += df;
            }
        }

        self.distance[src] = n;
    }

    /// Compute exact labels by a BFS from the sink.
    ///
    /// All layers are rebuilt. Nodes that cannot reach the sink get label
    /// `n` and are not contained in any layer.
    fn global_relabel(&mut self, src: usize, snk: usize) {
        let n = self.net.num_nodes();
        self.cnt_global_update += 1;

        for l in &mut self.layers[..=self.max_distance.min(n - 1)] {
            *l = Layer::empty();
        }
        for d in &mut self.distance {
            *d = n;
        }
        self.max_distance = 0;
        self.max_active = 0;
        self.min_active = n;

        self.distance[snk] = 0;
        self.queue.clear();
        self.queue.push_back(snk);
        while let Some(u) = self.queue.pop_front() {
            let d = self.distance[u] + 1;
            for i in self.net.first[u]..self.net.first[u + 1] {
                let a = self.net.arcs[i];
                let v = self.net.head[a];
                if v != src && self.distance[v] == n && self.net.res[self.net.twin[a]] > F::zero() {
                    self.distance[v] = d;
                    self.current[v] = self.net.first[v];
                    self.max_distance = self.max_distance.max(d);
                    if self.excess[v] > F::zero() {
                        self.add_active(v);
                    } else {
                        self.add_inactive(v);
                    }
                    self.queue.push_back(v);
                }
            }
        }

        trace!(
            "PushRelabel: global relabelling, max distance {}, active {}..{}",
            self.max_distance,
            self.min_active,
            self.max_active
        );
    }

    /// Relabel node `u`.
    ///
    /// The new label is one more than the smallest label of a node
    /// reachable by a residual edge, or `n` if that would be `n` or more.
    /// Returns the work done.
    fn relabel(&mut self, u: usize) -> usize {
        self.cnt_relabel += 1;
        let n = self.net.num_nodes();
        let (beg, end) = (self.net.first[u], self.net.first[u + 1]);

        let mut min_distance = n;
        let mut min_edge = beg;
        for i in beg..end {
            let a = self.net.arcs[i];
            if self.net.res[a] > F::zero() {
                let d = self.distance[self.net.head[a]];
                if d < min_distance {
                    min_distance = d;
                    min_edge = i;
                }
            }
        }

        let h = min_distance + 1;
        debug_assert!(h > self.distance[u]);
        if h < n {
            self.distance[u] = h;
            self.current[u] = min_edge;
            self.max_distance = self.max_distance.max(h);
        } else {
            self.distance[u] = n;
        }

        BETA + end - beg
    }

    /// The gap heuristic.
    ///
    /// Layer `empty` has become empty, so no node with a larger label can
    /// reach the sink anymore. All these nodes get label `n`.
    fn gap(&mut self, empty: usize) {
        self.cnt_gap += 1;
        let n = self.net.num_nodes();
        for l in empty + 1..=self.max_distance {
            debug_assert_eq!(self.layers[l].active, NIL);
            let mut u = self.layers[l].inactive;
            while u != NIL {
                self.distance[u] = n;
                u = self.next[u];
            }
            self.layers[l].inactive = NIL;
        }
        trace!("PushRelabel: gap at {}, removed layers up to {}", empty, self.max_distance);
        self.max_distance = empty - 1;
        self.max_active = self.max_distance;
    }

    /// Discharge the active node `u`.
    ///
    /// Flow is pushed along admissible edges until the excess of `u` is
    /// zero or `u` gets label `n`.
    fn discharge(&mut self, u: usize, snk: usize) {
        let n = self.net.num_nodes();
        debug_assert!(self.excess[u] > F::zero());

        loop {
            let du = self.distance[u];
            let end = self.net.first[u + 1];
            let mut cur = self.current[u];
            while cur < end {
                let a = self.net.arcs[cur];
                if self.net.res[a] > F::zero() {
                    let v = self.net.head[a];
                    if du == self.distance[v] + 1 {
                        if v != snk && self.excess[v].is_zero() {
                            // v becomes active
                            self.remove_inactive(v);
                            self.add_active(v);
                        }
                        let df = min(self.excess[u], self.net.res[a]);
                        self.net.push(a, df);
                        self.excess[u] -= df;
                        self.excess[v] += df;
                        if self.excess[u].is_zero() {
                            break;
                        }
                    }
                }
                cur += 1;
            }

            if cur == end {
                self.work += self.relabel(u);
                if self.layers[du].is_empty() {
                    self.gap(du);
                    // u is above the gap, too
                    self.distance[u] = n;
                }
                if self.distance[u] == n {
                    break;
                }
            } else {
                self.current[u] = cur;
                self.add_inactive(u);
                break;
            }
        }
    }

    /// The first phase: compute a maximum preflow.
    fn max_preflow(&mut self, src: usize, snk: usize) {
        let n = self.net.num_nodes();
        let m = self.net.arcs.len();

        self.global_relabel(src, snk);

        while self.max_active >= self.min_active {
            let l = self.max_active;
            let u = self.layers[l].active;
            if u == NIL {
                if l == 0 {
                    break;
                }
                self.max_active -= 1;
                continue;
            }
            self.layers[l].active = self.next[u];
            self.discharge(u, snk);

            if self.use_global_relabelling && self.work > 2 * (ALPHA * n + m) {
                self.global_relabel(src, snk);
                self.work = 0;
            }
        }
    }

    /// The second phase: convert the maximum preflow into a flow.
    ///
    /// A DFS over edges whose twin carries flow (i.e. against the flow
    /// direction) cancels all flow cycles. The finishing order of the DFS
    /// is a topological order of the remaining flow, in which the excess is
    /// sent back towards the source.
    fn preflow_to_flow(&mut self, src: usize, snk: usize, capacity: &[F]) {
        let n = self.net.num_nodes();
        self.color.clear();
        self.color.resize(n, Color::White);
        self.parent.clear();
        self.parent.resize(n, NIL);
        self.order.clear();
        self.current.clear();
        self.current.extend_from_slice(&self.net.first[..n]);
        self.color[src] = Color::Black;
        self.color[snk] = Color::Black;

        for r in 0..n {
            if self.color[r] != Color::White || self.excess[r] <= F::zero() {
                continue;
            }
            self.color[r] = Color::Gray;
            let mut u = r;
            loop {
                let end = self.net.first[u + 1];
                let mut descended = false;
                while self.current[u] < end {
                    let a = self.net.arcs[self.current[u]];
                    if self.net.res[a] > capacity[a] {
                        let v = self.net.head[a];
                        match self.color[v] {
                            Color::White => {
                                self.color[v] = Color::Gray;
                                self.parent[v] = u;
                                u = v;
                                descended = true;
                                break;
                            }
                            Color::Gray => {
                                let restart = self.cancel_cycle(u, v, capacity);
                                if restart != u {
                                    u = restart;
                                    self.current[u] += 1;
                                    descended = true;
                                    break;
                                }
                            }
                            Color::Black => {}
                        }
                    }
                    self.current[u] += 1;
                }
                if descended {
                    continue;
                }

                // u is finished
                self.color[u] = Color::Black;
                self.order.push(u);
                if u == r {
                    break;
                }
                u = self.parent[u];
                self.current[u] += 1;
            }
        }

        // return the excess in topological order
        for k in (0..self.order.len()).rev() {
            let u = self.order[k];
            for i in self.net.first[u]..self.net.first[u + 1] {
                if self.excess[u].is_zero() {
                    break;
                }
                let a = self.net.arcs[i];
                let back = self.net.res[a] - capacity[a];
                if back > F::zero() {
                    let df = min(self.excess[u], back);
                    let v = self.net.head[a];
                    self.net.push(a, df);
                    self.excess[u] -= df;
                    self.excess[v] += df;
                }
            }
            debug_assert!(self.excess[u].is_zero());
        }
    }

    /// Cancel the cycle closed by the current edge of `u` leading to `v`.
    ///
    /// The cycle consists of the current edges of the DFS path from `v` to
    /// `u`. Returns the node at which the DFS continues, i.e. the first
    /// node on the cycle whose current edge is saturated by the
    /// cancellation. All nodes behind that node are removed from the DFS
    /// path.
    fn cancel_cycle(&mut self, u: usize, v: usize, capacity: &[F]) -> usize {
        let back = |net: &Residual<F>, a: usize| net.res[a] - capacity[a];

        let mut delta = back(&self.net, self.net.arcs[self.current[u]]);
        let mut x = v;
        while x != u {
            let a = self.net.arcs[self.current[x]];
            delta = min(delta, back(&self.net, a));
            x = self.net.head[a];
        }
        debug_assert!(delta > F::zero());
        self.cnt_cycle += 1;

        let mut x = v;
        loop {
            let a = self.net.arcs[self.current[x]];
            self.net.push(a, delta);
            x = self.net.head[a];
            if x == v {
                break;
            }
        }

        let mut restart = u;
        let mut x = v;
        while x != u {
            let a = self.net.arcs[self.current[x]];
            let y = self.net.head[a];
            if self.color[x] == Color::White || back(&self.net, a).is_zero() {
                self.color[y] = Color::White;
                if self.color[x] != Color::White {
                    restart = x;
                }
            }
            x = y;
        }
        restart
    }
}

impl<F> Default for PushRelabel<F>
where
    F: Flow,
{
    fn default() -> Self {
        PushRelabel::new()
    }
}

impl<F> MaxFlow<F> for PushRelabel<F>
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
        self.cnt_relabel = 0;
        self.cnt_gap = 0;
        self.cnt_global_update = 0;
        self.cnt_cycle = 0;
        if src == snk {
            flow.fill(F::zero());
            return F::zero();
        }

        self.net.init(g, capacity);
        self.max_distance = 0;
        self.init_preflow(src);
        self.max_preflow(src, snk);
        self.preflow_to_flow(src, snk, capacity.as_slice());
        self.net.write_flow(capacity, flow);

        debug!(
            "PushRelabel: {} relabels, {} gaps, {} global relabellings, {} cycles",
            self.cnt_relabel, self.cnt_gap, self.cnt_global_update, self.cnt_cycle
        );

        self.excess[snk]
    }
}

/// Solve the maxflow problem using the push-relabel algorithm.
///
/// The function solves the max flow problem from the source node `src` to
/// the sink node `snk` with the given `capacity` on the edges.
///
/// The function returns the flow value, the flow on each edge and the
/// nodes in a minimal cut.
pub fn pushrelabel<'a, G, F>(
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
    let value = PushRelabel::new().solve(g, capacity, src, snk, &mut flow);
    let cut = mincut(g, capacity, &flow, src);
    (value, flow, cut)
}

#[cfg(test)]
mod tests {
    use super::{pushrelabel, PushRelabel};
    use crate::maxflow::tests::random_network;
    use crate::maxflow::verify::{self, VerifyError};
    use crate::maxflow::MaxFlow;
    use crate::traits::*;
    use crate::{Buildable, Builder, EdgeProperty, VecGraph};

    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_pushrelabel() {
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
        let (value, flow, _) = pushrelabel(&g, &upper, s, t);

        assert_eq!(value, 11);
        assert!(g.edges().step_by(2).all(|e| flow[e] >= 0 && flow[e] <= upper[e]));
        assert!(g
            .nodes()
            .filter(|&u| u != s && u != t)
            .all(|u| g.outedges(u).map(|(e, _)| flow[e]).sum::<isize>() == 0));
    }

    #[test]
    fn test_heuristics() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);
        let mut with = PushRelabel::new();
        let mut without = PushRelabel::new();
        without.use_global_relabelling = false;
        let mut gaps = 0;

        for _ in 0..20 {
            let (g, upper) = random_network(rng, 40, 200, 50);
            let (s, t) = (g.id2node(0), g.id2node(39));
            let mut flow = EdgeProperty::new(&g, 0);

            let v1 = with.solve(&g, &upper, s, t, &mut flow);
            assert_eq!(verify::check(&g, &upper, &flow, s, t, v1), Ok(()));
            assert!(with.cnt_global_update >= 1);

            let v2 = without.solve(&g, &upper, s, t, &mut flow);
            assert_eq!(verify::check(&g, &upper, &flow, s, t, v2), Ok(()));
            assert_eq!(without.cnt_global_update, 1);
            gaps += with.cnt_gap + without.cnt_gap;

            assert_eq!(v1, v2);
        }
        assert!(gaps > 0);
    }

    #[test]
    fn test_flow_cycles() {
        // Two parallel paths from s to t with a cycle a -> b -> c -> a in
        // between, the preflow may route flow around the cycle.
        let mut b = VecGraph::<u32>::new_builder();
        let nodes = b.add_nodes(6);
        let (s, a, bb, c, d, t) = (nodes[0], nodes[1], nodes[2], nodes[3], nodes[4], nodes[5]);
        let mut upper = vec![];
        for &(u, v, cap) in &[
            (s, a, 10),
            (a, bb, 10),
            (bb, c, 10),
            (c, a, 10),
            (bb, d, 3),
            (c, d, 2),
            (d, t, 4),
        ] {
            b.add_twin_edges(u, v);
            upper.push(cap);
            upper.push(0);
        }
        let g = b.into_graph();
        let upper = EdgeProperty::from_vec(upper);

        let mut pr = PushRelabel::new();
        let mut flow = EdgeProperty::new(&g, 0);
        let value = pr.solve(&g, &upper, s, t, &mut flow);
        assert_eq!(value, 4);
        assert_eq!(verify::check(&g, &upper, &flow, s, t, value), Ok(()));
        assert!(pr.cnt_relabel > 0);
        // the returned flow must not contain the cycle
        assert!([(a, bb), (bb, c), (c, a)].iter().any(|&(u, v)| {
            g.outedges(u).all(|(e, w)| w != v || flow[e] <= 0)
        }));
    }

    #[test]
    fn test_cancel_cycles() {
        // Small dense networks with arcs in both directions. The excess that
        // cannot reach the sink often flows around cycles in the preflow,
        // these must be cancelled before it is returned to the source.
        let rng = &mut Pcg64Mcg::seed_from_u64(17);
        let mut pr = PushRelabel::new();
        let mut cycles = 0;
        for _ in 0..200 {
            let (g, upper) = random_network(rng, 8, 40, 10);
            let (s, t) = (g.id2node(0), g.id2node(7));
            let mut flow = EdgeProperty::new(&g, 0);
            let value = pr.solve(&g, &upper, s, t, &mut flow);
            assert_eq!(verify::check(&g, &upper, &flow, s, t, value), Ok(()));
            cycles += pr.cnt_cycle;
        }
        assert!(cycles > 0);
    }

    #[test]
    fn test_source_capacity_overflow() {
        // The capacities leaving the source sum up to 200, which exceeds
        // `i8::MAX`. The excess of the source is cut at 127, the result
        // is still a feasible flow.
        let mut b = VecGraph::<u32>::new_builder();
        let nodes = b.add_nodes(4);
        let (s, v1, v2, t) = (nodes[0], nodes[1], nodes[2], nodes[3]);
        let mut upper: Vec<i8> = vec![];
        for &(u, v, cap) in &[(s, v1, 100), (s, v2, 100), (v1, t, 50), (v2, t, 50)] {
            b.add_twin_edges(u, v);
            upper.push(cap);
            upper.push(0);
        }
        let g = b.into_graph();
        let upper = EdgeProperty::from_vec(upper);

        let mut flow = EdgeProperty::new(&g, 0);
        let value = PushRelabel::new().solve(&g, &upper, s, t, &mut flow);
        assert!(value > 0 && value <= 100);
        match verify::check(&g, &upper, &flow, s, t, value) {
            Ok(()) | Err(VerifyError::AugmentingPath) => {}
            Err(err) => panic!("Invalid flow: {}", err),
        }
    }
}
