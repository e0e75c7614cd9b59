/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements the max flow algorithm of Boykov and Kolmogorov.
//!
//! The algorithm maintains two search trees, one rooted at the source and
//! one rooted at the sink. The trees are grown until they touch, then flow
//! is augmented along the path through both trees. Edges saturated by the
//! augmentation split the trees; the detached nodes (*orphans*) try to find
//! a new parent in their tree or become free.
//!
//! There is no good bound on the running time, but the algorithm is very
//! fast on graphs arising in computer vision, i.e. grid-like graphs in
//! which most nodes are directly connected to both terminals.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::traits::*;
//! use rs_maxflow::maxflow::boykov_kolmogorov;
//! use rs_maxflow::{classes, EdgeProperty, VecGraph};
//!
//! // a 3x2 grid, each cell is connected to both terminals
//! let g: VecGraph = classes::grid(3, 2);
//! let s = g.id2node(6);
//! let t = g.id2node(7);
//! let mut upper = EdgeProperty::new(&g, 0);
//! for (e, _) in g.outedges(s) {
//!     upper[e] = 3;
//! }
//! for u in g.nodes().take(6) {
//!     for (e, v) in g.outedges(u) {
//!         if v == t {
//!             upper[e] = 2;
//!         }
//!     }
//! }
//!
//! let (value, flow, mincut) = boykov_kolmogorov(&g, &upper, s, t);
//! assert_eq!(value, 12);
//! assert!(g.edges().all(|e| flow[e] <= upper[e]));
//! assert_eq!(mincut.len(), 7);
//! ```

use super::residual::Residual;
use super::{check_input, mincut, Flow, MaxFlow};
use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use log::{debug, trace};
use std::cmp::min;
use std::collections::VecDeque;

/// The tree a node belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tree {
    Free,
    Source,
    Sink,
}

/// The Boykov-Kolmogorov max flow algorithm.
///
/// This struct contains all algorithmic working data.
pub struct BoykovKolmogorov<F> {
    /// The residual network.
    net: Residual<F>,
    /// The source node of the current problem.
    src: usize,
    /// The sink node of the current problem.
    snk: usize,
    /// The tree of each node.
    tree: Vec<Tree>,
    /// The edge from each node to its parent.
    ///
    /// In the source tree the flow runs over the twin of this edge, in the
    /// sink tree over the edge itself.
    parent: Vec<Option<usize>>,
    /// The (cached) distance of each node to its root.
    dist: Vec<usize>,
    /// The time at which `dist` has been computed.
    stamp: Vec<usize>,
    /// The current time, increased by each augmentation.
    time: usize,
    /// The queue of active nodes.
    active: VecDeque<usize>,
    /// Whether a node is contained in `active`.
    in_active: Vec<bool>,
    /// The orphans created by an augmentation.
    orphans: VecDeque<usize>,
    /// The orphans created by freeing other orphans.
    child_orphans: VecDeque<usize>,
    /// The node and edge position at which the last grow step stopped.
    resume: Option<(usize, usize)>,
    /// The number of augmentations in the last run.
    pub cnt_augment: usize,
    /// The number of processed orphans in the last run.
    pub cnt_orphan: usize,
}

impl<F> BoykovKolmogorov<F>
where
    F: Flow,
{
    /// Create a new algorithm object.
    ///
    /// The working data is allocated on the first call to `solve`.
    pub fn new() -> Self {
        BoykovKolmogorov {
            net: Residual::new(),
            src: 0,
            snk: 0,
            tree: vec![],
            parent: vec![],
            dist: vec![],
            stamp: vec![],
            time: 0,
            active: VecDeque::new(),
            in_active: vec![],
            orphans: VecDeque::new(),
            child_orphans: VecDeque::new(),
            resume: None,
            cnt_augment: 0,
            cnt_orphan: 0,
        }
    }

    fn activate(&mut self, u: usize) {
        if !self.in_active[u] {
            self.in_active[u] = true;
            self.active.push_back(u);
        }
    }

    /// Add the free node `v` to `tree` with parent edge `p`.
    fn attach(&mut self, v: usize, tree: Tree, p: usize, dist: usize, stamp: usize) {
        self.tree[v] = tree;
        self.parent[v] = Some(p);
        self.dist[v] = dist;
        self.stamp[v] = stamp;
        self.activate(v);
    }

    /// Whether edge `a` leaving `u` can carry flow towards `u`'s tree
    /// neighbor, i.e. from the source side to the sink side.
    fn is_tree_residual(&self, tree: Tree, a: usize) -> bool {
        match tree {
            Tree::Source => self.net.res[a] > F::zero(),
            Tree::Sink => self.net.res[self.net.twin[a]] > F::zero(),
            Tree::Free => false,
        }
    }

    /// Reset all data and build the initial trees.
    ///
    /// Edges from the source to the sink are saturated. Each path
    /// `src -> v -> snk` is augmented by its bottleneck, then `v` joins the
    /// tree on whose side residual capacity remains. Returns the amount of
    /// flow that has been sent.
    fn init(&mut self, src: usize, snk: usize) -> F {
        let n = self.net.num_nodes();
        self.src = src;
        self.snk = snk;
        self.tree.clear();
        self.tree.resize(n, Tree::Free);
        self.parent.clear();
        self.parent.resize(n, None);
        self.dist.clear();
        self.dist.resize(n, 0);
        self.stamp.clear();
        self.stamp.resize(n, 0);
        self.in_active.clear();
        self.in_active.resize(n, false);
        self.active.clear();
        self.orphans.clear();
        self.child_orphans.clear();
        self.resume = None;
        self.time = 1;

        self.tree[src] = Tree::Source;
        self.stamp[src] = self.time;
        self.tree[snk] = Tree::Sink;
        self.stamp[snk] = self.time;

        let mut value = F::zero();
        for i in self.net.first[src]..self.net.first[src + 1] {
            let a = self.net.arcs[i];
            let v = self.net.head[a];
            if v == src {
                continue;
            }
            if v == snk {
                let df = self.net.res[a];
                self.net.push(a, df);
                value += df;
                continue;
            }
            for j in self.net.first[v]..self.net.first[v + 1] {
                let b = self.net.arcs[j];
                if self.net.head[b] == snk {
                    let df = min(self.net.res[a], self.net.res[b]);
                    if df > F::zero() {
                        self.net.push(a, df);
                        self.net.push(b, df);
                        value += df;
                    }
                }
            }
            if self.net.res[a] > F::zero() && self.tree[v] == Tree::Free {
                let p = self.net.twin[a];
                self.attach(v, Tree::Source, p, 1, self.time);
            }
        }

        for i in self.net.first[snk]..self.net.first[snk + 1] {
            let a = self.net.arcs[i];
            let v = self.net.head[a];
            let b = self.net.twin[a];
            if self.net.res[b] > F::zero() && self.tree[v] == Tree::Free {
                self.attach(v, Tree::Sink, b, 1, self.time);
            }
        }

        value
    }

    /// Grow the trees until they touch.
    ///
    /// Returns the connecting edge, i.e. an edge with positive residual
    /// capacity from a node of the source tree to a node of the sink tree,
    /// or `None` if there is none.
    fn grow(&mut self) -> Option<usize> {
        loop {
            let (u, start) = match self.resume.take() {
                Some((u, i)) if self.tree[u] != Tree::Free => (u, i),
                _ => {
                    let u = self.active.pop_front()?;
                    self.in_active[u] = false;
                    if self.tree[u] == Tree::Free {
                        continue;
                    }
                    (u, self.net.first[u])
                }
            };

            let t = self.tree[u];
            for i in start..self.net.first[u + 1] {
                let a = self.net.arcs[i];
                if !self.is_tree_residual(t, a) {
                    continue;
                }
                let v = self.net.head[a];
                let b = self.net.twin[a];
                if self.tree[v] == Tree::Free {
                    let (d, s) = (self.dist[u] + 1, self.stamp[u]);
                    self.attach(v, t, b, d, s);
                } else if self.tree[v] != t {
                    self.resume = Some((u, i));
                    return Some(if t == Tree::Source { a } else { b });
                } else if self.stamp[v] <= self.stamp[u] && self.dist[u] + 1 < self.dist[v] {
                    // a shorter path to the root
                    self.parent[v] = Some(b);
                    self.dist[v] = self.dist[u] + 1;
                    self.stamp[v] = self.stamp[u];
                }
            }
        }
    }

    /// Augment along the path through the connecting edge `c`.
    ///
    /// All nodes whose parent edge gets saturated become orphans. Returns
    /// the amount of flow that has been sent.
    fn augment(&mut self, c: usize) -> F {
        self.cnt_augment += 1;
        let net = &self.net;

        // bottleneck
        let mut df = net.res[c];
        let mut x = net.tail(c);
        while let Some(p) = self.parent[x] {
            df = min(df, net.res[net.twin[p]]);
            x = net.head[p];
        }
        let mut y = net.head[c];
        while let Some(p) = self.parent[y] {
            df = min(df, net.res[p]);
            y = net.head[p];
        }
        debug_assert!(df > F::zero());
        debug_assert_eq!(x, self.src);
        debug_assert_eq!(y, self.snk);

        self.net.push(c, df);

        let mut x = self.net.tail(c);
        while let Some(p) = self.parent[x] {
            let a = self.net.twin[p];
            self.net.push(a, df);
            if self.net.res[a].is_zero() {
                self.parent[x] = None;
                self.orphans.push_back(x);
            }
            x = self.net.head[p];
        }
        let mut y = self.net.head[c];
        while let Some(p) = self.parent[y] {
            self.net.push(p, df);
            if self.net.res[p].is_zero() {
                self.parent[y] = None;
                self.orphans.push_back(y);
            }
            y = self.net.head[p];
        }

        df
    }

    /// Return the distance of `u` to its root if `u` is connected to it.
    ///
    /// The path to the root is followed until a node with a valid distance
    /// for the current time is found. The distances of all nodes on the
    /// path are updated.
    fn root_distance(&mut self, u: usize) -> Option<usize> {
        let mut d = 0;
        let mut x = u;
        loop {
            if self.stamp[x] == self.time {
                debug_assert!(
                    self.parent[x].is_some() || x == self.src || x == self.snk,
                    "Node with a current distance has no parent"
                );
                d += self.dist[x];
                break;
            }
            match self.parent[x] {
                Some(p) => {
                    d += 1;
                    x = self.net.head[p];
                }
                None if x == self.src || x == self.snk => {
                    self.stamp[x] = self.time;
                    self.dist[x] = 0;
                    break;
                }
                None => return None,
            }
        }

        let mut x = u;
        let mut dx = d;
        while self.stamp[x] != self.time {
            debug_assert!(dx > 0);
            self.stamp[x] = self.time;
            self.dist[x] = dx;
            dx -= 1;
            match self.parent[x] {
                Some(p) => x = self.net.head[p],
                None => break,
            }
        }

        Some(d)
    }

    /// Find a new parent for the orphan `v` or make it free.
    fn process_orphan(&mut self, v: usize) {
        self.cnt_orphan += 1;
        let t = self.tree[v];
        debug_assert!(t != Tree::Free);
        debug_assert!(self.parent[v].is_none());
        // nodes whose distance has been verified in this phase keep their parent
        debug_assert!(self.stamp[v] < self.time, "Orphan has a current distance");

        // A parent edge `a = (v, q)` must be able to carry flow towards v
        // (source tree) or away from v (sink tree).
        let mut best: Option<(usize, usize)> = None;
        for i in self.net.first[v]..self.net.first[v + 1] {
            let a = self.net.arcs[i];
            let q = self.net.head[a];
            if self.tree[q] != t || !self.is_tree_residual(t, self.net.twin[a]) {
                continue;
            }
            if let Some(d) = self.root_distance(q) {
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((a, d));
                }
            }
        }

        if let Some((a, d)) = best {
            let q = self.net.head[a];
            debug_assert!(self.stamp[q] == self.time && self.dist[q] == d);
            self.parent[v] = Some(a);
            self.dist[v] = d + 1;
            self.stamp[v] = self.time;
            return;
        }

        // no parent found, v becomes free
        trace!("BoykovKolmogorov: free orphan {} ({:?} tree)", v, t);
        for i in self.net.first[v]..self.net.first[v + 1] {
            let a = self.net.arcs[i];
            let q = self.net.head[a];
            if self.tree[q] != t {
                continue;
            }
            if self.is_tree_residual(t, self.net.twin[a]) {
                self.activate(q);
            }
            if self.parent[q] == Some(self.net.twin[a]) {
                self.parent[q] = None;
                self.child_orphans.push_back(q);
            }
        }
        self.tree[v] = Tree::Free;
    }

    /// Process all orphans.
    fn adopt(&mut self) {
        loop {
            let v = match self.child_orphans.pop_front() {
                Some(v) => v,
                None => match self.orphans.pop_front() {
                    Some(v) => v,
                    None => break,
                },
            };
            self.process_orphan(v);
        }
    }
}

impl<F> Default for BoykovKolmogorov<F>
where
    F: Flow,
{
    fn default() -> Self {
        BoykovKolmogorov::new()
    }
}

impl<F> MaxFlow<F> for BoykovKolmogorov<F>
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
        self.cnt_orphan = 0;
        if src == snk {
            flow.fill(F::zero());
            return F::zero();
        }

        self.net.init(g, capacity);
        let mut value = self.init(src, snk);
        debug!("BoykovKolmogorov: initial flow along short paths done");

        while let Some(c) = self.grow() {
            self.time += 1;
            value += self.augment(c);
            self.adopt();
        }

        self.net.write_flow(capacity, flow);

        debug!(
            "BoykovKolmogorov: {} augmentations, {} orphans",
            self.cnt_augment, self.cnt_orphan
        );

        value
    }
}

/// Solve the maxflow problem using the algorithm of Boykov and Kolmogorov.
///
/// The function solves the max flow problem from the source node `src` to
/// the sink node `snk` with the given `capacity` on the edges.
///
/// The function returns the flow value, the flow on each edge and the
/// nodes in a minimal cut.
pub fn boykov_kolmogorov<'a, G, F>(
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
    let value = BoykovKolmogorov::new().solve(g, capacity, src, snk, &mut flow);
    let cut = mincut(g, capacity, &flow, src);
    (value, flow, cut)
}

#[cfg(test)]
mod tests {
    use super::{boykov_kolmogorov, BoykovKolmogorov};
    use crate::maxflow::tests::{random_network, solve_all};
    use crate::maxflow::{verify, MaxFlow};
    use crate::traits::*;
    use crate::{classes, Buildable, Builder, EdgeProperty, VecGraph};

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_boykov_kolmogorov() {
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
        let (value, flow, _) = boykov_kolmogorov(&g, &upper, s, t);

        assert_eq!(value, 11);
        assert!(verify::check(&g, &upper, &flow, s, t, value).is_ok());
    }

    #[test]
    fn test_short_paths() {
        // All paths have length 2, everything is done by the initialization.
        let g: VecGraph = classes::layered(&[1, 10, 1]);
        let mut upper = EdgeProperty::new(&g, 0);
        for e in g.edges().step_by(2) {
            let u = g.node_id(g.src(e));
            let v = g.node_id(g.snk(e));
            upper[e] = if u == 0 { v as i32 } else { 5 };
        }
        let (s, t) = (g.id2node(0), g.id2node(11));

        let mut bk = BoykovKolmogorov::new();
        let mut flow = EdgeProperty::new(&g, 0);
        let value = bk.solve(&g, &upper, s, t, &mut flow);
        // min(v, 5) for v = 1..=10
        assert_eq!(value, 1 + 2 + 3 + 4 + 5 * 6);
        assert_eq!(bk.cnt_augment, 0);
        assert_eq!(verify::check(&g, &upper, &flow, s, t, value), Ok(()));
    }

    #[test]
    fn test_orphans() {
        // Dense random grids with capacities in both directions need
        // many augmentations and adoptions.
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let g: VecGraph = classes::grid(8, 8);
        let mut upper = EdgeProperty::new(&g, 0);
        for e in g.edges() {
            upper[e] = rng.random_range(0..20);
        }
        let value = solve_all(&g, &upper, 64, 65);

        let mut bk = BoykovKolmogorov::new();
        let mut flow = EdgeProperty::new(&g, 0);
        assert_eq!(bk.solve(&g, &upper, g.id2node(64), g.id2node(65), &mut flow), value);
        assert!(bk.cnt_augment > 0);
        assert!(bk.cnt_orphan > 0);
    }

    #[test]
    fn test_reuse() {
        let rng = &mut Pcg64Mcg::seed_from_u64(99);
        let mut bk = BoykovKolmogorov::new();
        for &n in &[40, 3, 25] {
            let (g, upper) = random_network(rng, n, 5 * n, 40);
            let (s, t) = (g.id2node(n - 1), g.id2node(0));
            let mut flow = EdgeProperty::new(&g, 0);
            let value = bk.solve(&g, &upper, s, t, &mut flow);
            assert_eq!(verify::check(&g, &upper, &flow, s, t, value), Ok(()));
        }
    }
}
