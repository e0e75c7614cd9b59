/*
 * Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Traits for graph data structures.
//!
//! The flow algorithms of this crate only need a small interface to the
//! graph they run on:
//!
//! 1. `Digraph`: a finite directed graph with numbered nodes and edges and
//!    list access to the edges leaving a node.
//! 2. `TwinDigraph`: a `Digraph` in which edges may be paired with a
//!    reverse edge, the *twin*. Twins are used to store the residual
//!    capacity of the backward direction of an edge.

use crate::property::EdgeProperty;

/// A graph iterator.
///
/// This is roughly the same interface as a standard iterator. However,
/// all its method take additionally the graph itself as parameter. This
/// allows the iterator to not contain a reference to internal graph data.
pub trait GraphIterator<G: ?Sized>: Clone {
    type Item;

    fn next(&mut self, g: &G) -> Option<Self::Item>;

    fn size_hint(&self, _g: &G) -> (usize, Option<usize>) {
        (0, None)
    }

    fn count(mut self, g: &G) -> usize {
        let mut c = 0;
        while self.next(g).is_some() {
            c += 1
        }
        c
    }

    fn iter(self, g: &G) -> GraphIter<G, Self>
    where
        G: Sized,
    {
        GraphIter(self, g)
    }
}

/// A graph iterator as a standard iterator.
///
/// This is a pair consisting of a graph iterator and a reference the
/// graph itself. It can be used as a standard iterator.
pub struct GraphIter<'a, G, I>(pub(crate) I, pub(crate) &'a G);

impl<'a, G, I> Clone for GraphIter<'a, G, I>
where
    I: Clone,
{
    fn clone(&self) -> Self {
        GraphIter(self.0.clone(), self.1)
    }
}

impl<'a, G, I> Iterator for GraphIter<'a, G, I>
where
    I: GraphIterator<G>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next(self.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint(self.1)
    }

    fn count(self) -> usize {
        self.0.count(self.1)
    }
}

/// An item that has an index.
pub trait Indexable {
    fn index(&self) -> usize;
}

/// Iterator over all nodes of a graph.
pub type NodeIterator<'a, G> = GraphIter<'a, G, <G as Digraph<'a>>::NodeIt>;

/// Iterator over all edges of a graph.
pub type EdgeIterator<'a, G> = GraphIter<'a, G, <G as Digraph<'a>>::EdgeIt>;

/// Iterator over edges leaving a node.
pub type OutIterator<'a, G> = GraphIter<'a, G, <G as Digraph<'a>>::OutIt>;

/// A finite directed graph with numbered nodes and edges.
///
/// Node ids are in `0..num_nodes()` and edge ids in `0..num_edges()`.
pub trait Digraph<'a> {
    /// Type of a node.
    type Node: 'a + Copy + Eq;

    /// Type of an edge.
    type Edge: 'a + Copy + Eq;

    /// Type of a graph iterator over all nodes.
    type NodeIt: GraphIterator<Self, Item = Self::Node>;

    /// Type of a graph iterator over all edges.
    type EdgeIt: GraphIterator<Self, Item = Self::Edge>;

    /// Type of a graph iterator over the edges leaving a node.
    type OutIt: GraphIterator<Self, Item = (Self::Edge, Self::Node)>;

    /// Return the number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// Return the number of edges in the graph.
    fn num_edges(&self) -> usize;

    /// Return a graph iterator over all nodes.
    fn nodes_iter(&'a self) -> Self::NodeIt;

    /// Return an iterator over all nodes.
    fn nodes(&'a self) -> NodeIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.nodes_iter(), self)
    }

    /// Return a graph iterator over all edges.
    fn edges_iter(&'a self) -> Self::EdgeIt;

    /// Return an iterator over all edges.
    fn edges(&'a self) -> EdgeIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.edges_iter(), self)
    }

    /// Return a graph iterator over the edges leaving a node.
    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt;

    /// Return an iterator over the edges leaving a node.
    ///
    /// The iterator returns pairs `(e, v)` where `v` is the sink of `e`.
    fn outedges(&'a self, u: Self::Node) -> OutIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.out_iter(u), self)
    }

    /// Return the source node of an edge.
    fn src(&'a self, e: Self::Edge) -> Self::Node;

    /// Return the sink node of an edge.
    fn snk(&'a self, e: Self::Edge) -> Self::Node;

    /// Return a unique id associated with a node.
    fn node_id(&self, u: Self::Node) -> usize;

    /// Return the node associated with the given id.
    ///
    /// The method panics if the id is invalid.
    fn id2node(&'a self, id: usize) -> Self::Node;

    /// Return a unique id associated with an edge.
    fn edge_id(&self, e: Self::Edge) -> usize;

    /// Return the edge associated with the given id.
    ///
    /// The method panics if the id is invalid.
    fn id2edge(&'a self, id: usize) -> Self::Edge;
}

/// A digraph whose edges may be paired with reverse edges.
///
/// If `f = g.twin(e)` exists, then `g.twin(f) == Some(e)`,
/// `g.src(f) == g.snk(e)` and `g.snk(f) == g.src(e)`.
pub trait TwinDigraph<'a>: Digraph<'a> {
    /// Return the reverse edge paired with `e` (if any).
    fn twin(&'a self, e: Self::Edge) -> Option<Self::Edge>;

    /// Return `true` if every edge has a twin.
    fn is_bidirectional(&'a self) -> bool
    where
        Self: Sized,
    {
        self.edges().all(|e| match self.twin(e) {
            Some(f) => self.twin(f) == Some(e) && self.src(f) == self.snk(e) && self.snk(f) == self.src(e),
            None => false,
        })
    }

    /// Create a new edge property with all values set to `value`.
    fn edge_property<T>(&self, value: T) -> EdgeProperty<T>
    where
        T: Clone,
    {
        EdgeProperty::with_len(self.num_edges(), value)
    }
}
