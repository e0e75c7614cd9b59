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

//! The residual network shared by the max flow algorithms.

use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use crate::num::traits::NumAssign;

/// Index based copy of the graph topology plus residual capacities.
///
/// Nodes and edges are identified by their ids. The outgoing edges of node
/// `u` are `arcs[first[u]..first[u + 1]]`, so the algorithms can store
/// positions in these slices as "current arc" pointers.
pub(crate) struct Residual<F> {
    /// Start of the outgoing edges of each node (plus a sentinel).
    pub first: Vec<usize>,
    /// The edge ids ordered by their source node.
    pub arcs: Vec<usize>,
    /// The sink node of each edge.
    pub head: Vec<usize>,
    /// The twin of each edge.
    pub twin: Vec<usize>,
    /// The residual capacity of each edge.
    pub res: Vec<F>,
}

impl<F> Residual<F>
where
    F: NumAssign + Ord + Copy,
{
    pub fn new() -> Self {
        Residual {
            first: vec![],
            arcs: vec![],
            head: vec![],
            twin: vec![],
            res: vec![],
        }
    }

    /// Load the topology of `g` and set the residual capacities to
    /// `capacity`.
    ///
    /// The graph must be bidirectional.
    pub fn init<'a, G>(&mut self, g: &'a G, capacity: &EdgeProperty<F>)
    where
        G: TwinDigraph<'a>,
    {
        let n = g.num_nodes();
        let m = g.num_edges();

        self.first.clear();
        self.arcs.clear();
        self.head.clear();
        self.head.resize(m, 0);
        self.twin.clear();
        self.twin.resize(m, 0);

        for u in g.nodes() {
            self.first.push(self.arcs.len());
            for (e, v) in g.outedges(u) {
                let eid = g.edge_id(e);
                self.arcs.push(eid);
                self.head[eid] = g.node_id(v);
                self.twin[eid] = g.twin(e).map(|f| g.edge_id(f)).expect("Graph must be bidirectional");
            }
        }
        self.first.push(self.arcs.len());
        debug_assert_eq!(self.first.len(), n + 1);

        self.res.clear();
        self.res.extend_from_slice(capacity.as_slice());
    }

    /// The number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.first.len() - 1
    }

    /// The source node of edge `e`.
    pub fn tail(&self, e: usize) -> usize {
        self.head[self.twin[e]]
    }

    /// Send `df` units of flow over edge `e`.
    pub fn push(&mut self, e: usize, df: F) {
        debug_assert!(df <= self.res[e], "Push exceeds residual capacity");
        self.res[e] -= df;
        self.res[self.twin[e]] += df;
    }

    /// Write `capacity - residual` to `flow`.
    pub fn write_flow(&self, capacity: &EdgeProperty<F>, flow: &mut EdgeProperty<F>) {
        for ((f, &c), &r) in flow.iter_mut().zip(capacity.iter()).zip(self.res.iter()) {
            *f = c - r;
        }
    }
}
