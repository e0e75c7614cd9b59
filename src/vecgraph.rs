/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A vector based digraph with twin edges.

use crate::builder::{Buildable, Builder};
use crate::traits::{Digraph, GraphIterator, Indexable, TwinDigraph};

use crate::num::iter::{range, Range};
use crate::num::traits::{PrimInt, Unsigned};

use std::fmt;
use std::slice::Iter as SliceIter;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Node of a vector graph.
///
/// This is basically a newtype of the node index.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Node<ID = u32>(ID)
where
    ID: PrimInt + Unsigned;

impl<ID> fmt::Display for Node<ID>
where
    ID: PrimInt + Unsigned + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl<ID> Indexable for Node<ID>
where
    ID: PrimInt + Unsigned,
{
    fn index(&self) -> usize {
        self.0.to_usize().unwrap()
    }
}

/// Edge of a vector graph.
///
/// This is basically a newtype of the edge index. An edge and its twin are
/// different edges with different indices.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Edge<ID = u32>(ID)
where
    ID: PrimInt + Unsigned;

impl<ID> fmt::Display for Edge<ID>
where
    ID: PrimInt + Unsigned + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "e{}", self.0)
    }
}

impl<ID> Indexable for Edge<ID>
where
    ID: PrimInt + Unsigned,
{
    fn index(&self) -> usize {
        self.0.to_usize().unwrap()
    }
}

/// Data for a node in a vector graph.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct NodeData<ID> {
    firstout: ID,
}

/// Data for an edge in a vector graph.
#[derive(Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct EdgeData<ID> {
    nodes: [ID; 2],
    /// The twin edge, `ID::max_value()` if there is none.
    twin: ID,
}

/// A vector based graph data structure.
///
/// The graph stores the outgoing edges of each node in consecutive
/// positions of one adjacency array. Each edge may be paired with a twin
/// edge running in the opposite direction.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VecGraph<ID = u32> {
    nodes: Vec<NodeData<ID>>,
    edges: Vec<EdgeData<ID>>,
    // The list of adjacencies. This list contains the edge numbers
    // ordered by their source node.
    adj: Vec<ID>,
}

/// A graph iterator over all nodes of a vector graph.
#[derive(Clone)]
pub struct NodeIt<ID>(Range<ID>);

impl<ID> GraphIterator<VecGraph<ID>> for NodeIt<ID>
where
    ID: PrimInt + Unsigned,
{
    type Item = Node<ID>;

    fn next(&mut self, _g: &VecGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Node)
    }

    fn size_hint(&self, _g: &VecGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }

    fn count(self, _g: &VecGraph<ID>) -> usize {
        Iterator::count(self.0)
    }
}

/// A graph iterator over all edges of a vector graph.
#[derive(Clone)]
pub struct EdgeIt<ID>(Range<ID>);

impl<ID> GraphIterator<VecGraph<ID>> for EdgeIt<ID>
where
    ID: PrimInt + Unsigned,
{
    type Item = Edge<ID>;

    fn next(&mut self, _g: &VecGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Edge)
    }

    fn size_hint(&self, _g: &VecGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }

    fn count(self, _g: &VecGraph<ID>) -> usize {
        Iterator::count(self.0)
    }
}

/// A graph iterator over the outgoing edges of a node.
#[derive(Clone)]
pub struct OutIt<'a, ID>(SliceIter<'a, ID>);

impl<'a, ID> GraphIterator<VecGraph<ID>> for OutIt<'a, ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = (Edge<ID>, Node<ID>);

    fn next(&mut self, g: &VecGraph<ID>) -> Option<Self::Item> {
        self.0.next().map(|&eid| {
            let i = eid.to_usize().unwrap();
            (Edge(eid), Node(g.edges[i].nodes[1]))
        })
    }

    fn size_hint(&self, _g: &VecGraph<ID>) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, ID> Digraph<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Node = Node<ID>;
    type Edge = Edge<ID>;
    type NodeIt = NodeIt<ID>;
    type EdgeIt = EdgeIt<ID>;
    type OutIt = OutIt<'a, ID>;

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn nodes_iter(&self) -> Self::NodeIt {
        NodeIt(range(ID::zero(), ID::from(self.nodes.len()).unwrap()))
    }

    fn edges_iter(&self) -> Self::EdgeIt {
        EdgeIt(range(ID::zero(), ID::from(self.edges.len()).unwrap()))
    }

    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt {
        let uid = u.index();
        let beg = self.nodes[uid].firstout.to_usize().unwrap();
        let end = self
            .nodes
            .get(uid + 1)
            .map(|n| n.firstout.to_usize().unwrap())
            .unwrap_or_else(|| self.adj.len());
        OutIt(self.adj[beg..end].iter())
    }

    fn src(&self, e: Self::Edge) -> Self::Node {
        Node(self.edges[e.index()].nodes[0])
    }

    fn snk(&self, e: Self::Edge) -> Self::Node {
        Node(self.edges[e.index()].nodes[1])
    }

    fn node_id(&self, u: Self::Node) -> usize {
        u.index()
    }

    fn id2node(&self, id: usize) -> Self::Node {
        assert!(id < self.nodes.len(), "Invalid node id: {}", id);
        Node(ID::from(id).unwrap())
    }

    fn edge_id(&self, e: Self::Edge) -> usize {
        e.index()
    }

    fn id2edge(&self, id: usize) -> Self::Edge {
        assert!(
            id < self.edges.len(),
            "Invalid edge id: {}, must be in 0..{}",
            id,
            self.edges.len()
        );
        Edge(ID::from(id).unwrap())
    }
}

impl<'a, ID> TwinDigraph<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn twin(&self, e: Self::Edge) -> Option<Self::Edge> {
        let t = self.edges[e.index()].twin;
        if t == ID::max_value() {
            None
        } else {
            Some(Edge(t))
        }
    }
}

/// A builder for a VecGraph.
///
/// The basic task is to arrange the outgoing edges of each node in
/// consecutive positions of the adjacency array.
pub struct VecGraphBuilder<ID> {
    /// The outgoing edges of each node.
    nodes: Vec<Vec<ID>>,

    /// The end nodes and twins of each edge.
    edges: Vec<EdgeData<ID>>,
}

impl<ID> VecGraphBuilder<ID>
where
    ID: PrimInt + Unsigned,
{
    /// Add a twin for each edge that does not have one, yet.
    ///
    /// Returns the number of edges that have been added.
    pub fn make_bidirectional(&mut self) -> usize {
        let mut cnt = 0;
        for eid in 0..self.edges.len() {
            if self.edges[eid].twin == ID::max_value() {
                let [u, v] = self.edges[eid].nodes;
                let e = Edge(ID::from(eid).unwrap());
                let f = self.add_edge(Node(v), Node(u));
                self.set_twins(e, f);
                cnt += 1;
            }
        }
        cnt
    }
}

impl<ID> Builder for VecGraphBuilder<ID>
where
    ID: PrimInt + Unsigned,
{
    type Graph = VecGraph<ID>;
    type Node = Node<ID>;
    type Edge = Edge<ID>;

    fn with_capacities(nnodes: usize, nedges: usize) -> Self {
        VecGraphBuilder {
            nodes: Vec::with_capacity(nnodes),
            edges: Vec::with_capacity(nedges),
        }
    }

    fn reserve(&mut self, nnodes: usize, nedges: usize) {
        self.nodes.reserve(nnodes);
        self.edges.reserve(nedges);
    }

    // `ID::max_value()` marks a missing twin
    fn max_size() -> (usize, usize) {
        let m = ID::max_value().to_usize().unwrap_or_else(usize::max_value) - 1;
        (m, m)
    }

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn add_node(&mut self) -> Self::Node {
        assert!(
            self.nodes.len() + 1 < ID::max_value().to_usize().unwrap(),
            "Node capacity exceeded"
        );
        let id = self.nodes.len();
        self.nodes.push(vec![]);
        Node(ID::from(id).unwrap())
    }

    fn add_edge(&mut self, u: Self::Node, v: Self::Node) -> Self::Edge {
        assert!(
            self.edges.len() + 1 < ID::max_value().to_usize().unwrap(),
            "Edge capacity exceeded"
        );
        let eid = ID::from(self.edges.len()).unwrap();
        self.edges.push(EdgeData {
            nodes: [u.0, v.0],
            twin: ID::max_value(),
        });
        self.nodes[u.index()].push(eid);
        Edge(eid)
    }

    fn set_twins(&mut self, e: Self::Edge, f: Self::Edge) {
        let (eid, fid) = (e.index(), f.index());
        assert_ne!(eid, fid, "An edge cannot be its own twin");
        assert!(
            self.edges[eid].nodes[0] == self.edges[fid].nodes[1] && self.edges[eid].nodes[1] == self.edges[fid].nodes[0],
            "Twin edges must run in opposite directions"
        );
        assert!(
            self.edges[eid].twin == ID::max_value() && self.edges[fid].twin == ID::max_value(),
            "Edge has already a twin"
        );
        self.edges[eid].twin = f.0;
        self.edges[fid].twin = e.0;
    }

    fn node2id(&self, u: Self::Node) -> usize {
        u.index()
    }

    fn edge2id(&self, e: Self::Edge) -> usize {
        e.index()
    }

    fn into_graph(self) -> VecGraph<ID> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut adj = Vec::with_capacity(self.edges.len());

        for outs in self.nodes.into_iter() {
            nodes.push(NodeData {
                firstout: ID::from(adj.len()).unwrap(),
            });
            adj.extend(outs);
        }

        VecGraph {
            nodes,
            edges: self.edges,
            adj,
        }
    }
}

impl<ID> Buildable for VecGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    type Builder = VecGraphBuilder<ID>;
}

impl<ID> VecGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    pub fn new() -> VecGraph<ID> {
        VecGraph {
            nodes: vec![],
            edges: vec![],
            adj: vec![],
        }
    }
}

impl<ID> Default for VecGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    fn default() -> Self {
        VecGraph::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::classes::*;
    use crate::traits::*;
    use crate::{Buildable, Builder, VecGraph};

    #[test]
    fn test_outedges() {
        let g: VecGraph = complete_graph(5);

        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.num_edges(), 20);

        for u in g.nodes() {
            assert_eq!(g.outedges(u).count(), 4);
            for (e, v) in g.outedges(u) {
                assert_eq!(g.src(e), u);
                assert_eq!(g.snk(e), v);
            }
        }

        let mut x = vec![0; g.num_edges()];
        for (i, e) in g.edges().enumerate() {
            x[g.edge_id(e)] = i;
        }
        for e in g.edges() {
            assert_eq!(g.id2edge(x[g.edge_id(e)]), e);
        }
    }

    #[test]
    fn test_twins() {
        let g: VecGraph = grid(4, 3);
        assert!(g.is_bidirectional());
        for e in g.edges() {
            let f = g.twin(e).unwrap();
            assert_ne!(e, f);
            assert_eq!(g.twin(f), Some(e));
            assert_eq!(g.src(f), g.snk(e));
            assert_eq!(g.snk(f), g.src(e));
        }
    }

    #[test]
    fn test_make_bidirectional() {
        let mut b = VecGraph::<u32>::new_builder();
        let nodes = b.add_nodes(3);
        b.add_edge(nodes[0], nodes[1]);
        b.add_edge(nodes[1], nodes[2]);
        let e = b.add_edge(nodes[2], nodes[0]);
        let f = b.add_edge(nodes[0], nodes[2]);
        b.set_twins(e, f);

        let partial = VecGraph::<u32>::new_with(|b| {
            let nodes = b.add_nodes(2);
            b.add_edge(nodes[0], nodes[1]);
        });
        assert!(!partial.is_bidirectional());

        assert_eq!(b.make_bidirectional(), 2);
        let g = b.into_graph();
        assert_eq!(g.num_edges(), 6);
        assert!(g.is_bidirectional());
        assert_eq!(g.twin(g.id2edge(2)), Some(g.id2edge(3)));
    }

    #[test]
    fn test_max_size() {
        assert_eq!(<VecGraph<u8> as Buildable>::Builder::max_size(), (254, 254));
        let g = VecGraph::<u8>::new_with(|b| {
            b.add_nodes(254);
        });
        assert_eq!(g.num_nodes(), 254);
    }

    #[test]
    #[should_panic(expected = "opposite directions")]
    fn test_invalid_twins() {
        let mut b = VecGraph::<u32>::new_builder();
        let nodes = b.add_nodes(3);
        let e = b.add_edge(nodes[0], nodes[1]);
        let f = b.add_edge(nodes[1], nodes[2]);
        b.set_twins(e, f);
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use crate::classes::grid;
        use crate::traits::{Digraph, TwinDigraph};
        use crate::VecGraph;

        #[test]
        fn test_serde() {
            let g: VecGraph = grid(3, 2);

            let serialized = serde_json::to_string(&g).unwrap();
            let h: VecGraph = serde_json::from_str(&serialized).unwrap();

            assert_eq!(g.num_nodes(), h.num_nodes());
            assert_eq!(g.num_edges(), h.num_edges());
            for e in g.edges() {
                let f = h.id2edge(g.edge_id(e));
                assert_eq!(g.node_id(g.src(e)), h.node_id(h.src(f)));
                assert_eq!(g.node_id(g.snk(e)), h.node_id(h.snk(f)));
                assert_eq!(g.twin(e).map(|t| g.edge_id(t)), h.twin(f).map(|t| h.edge_id(t)));
            }
        }
    }
}
