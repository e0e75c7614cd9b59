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

//! Some common network classes.
//!
//! All generators add their edges as twin pairs, i.e. the returned graphs
//! are bidirectional and can be used directly with the max flow algorithms.
//! The edge `2*i` is always the forward edge of the `i`-th pair and `2*i+1`
//! its twin.

use crate::builder::{Buildable, Builder};

/// Returns a path with `m` edge pairs.
pub fn path<G>(m: usize) -> G
where
    G: Buildable,
{
    let mut b = G::Builder::with_capacities(m + 1, 2 * m);
    let nodes = b.add_nodes(m + 1);
    for (u, v) in nodes.iter().zip(nodes.iter().skip(1)) {
        b.add_twin_edges(*u, *v);
    }
    b.into_graph()
}

/// Returns the complete graph on `n` nodes.
///
/// Each pair of nodes `i < j` is connected by a forward edge `(i,j)` and its
/// twin `(j,i)`.
pub fn complete_graph<G>(n: usize) -> G
where
    G: Buildable,
{
    let mut b = G::Builder::with_capacities(n, n * n.saturating_sub(1));
    let nodes = b.add_nodes(n);
    for (i, &u) in nodes.iter().enumerate() {
        for &v in &nodes[i + 1..] {
            b.add_twin_edges(u, v);
        }
    }
    b.into_graph()
}

/// Returns a layered network.
///
/// The `i`-th layer contains `widths[i]` nodes, the nodes are numbered
/// layer by layer. Each node is connected to all nodes of the next layer.
pub fn layered<G>(widths: &[usize]) -> G
where
    G: Buildable,
{
    let n = widths.iter().sum();
    let m = widths.windows(2).map(|w| w[0] * w[1]).sum::<usize>();
    let mut b = G::Builder::with_capacities(n, 2 * m);
    let layers: Vec<_> = widths.iter().map(|&w| b.add_nodes(w)).collect();
    for l in layers.windows(2) {
        for &u in &l[0] {
            for &v in &l[1] {
                b.add_twin_edges(u, v);
            }
        }
    }
    b.into_graph()
}

/// Return a grid network with `n` columns and `m` rows and two terminals.
///
/// This is the typical shape of a network arising in image segmentation.
/// The cells are created from left to right and from bottom to top. Each
/// cell is connected to its (up to four) neighbors. Furthermore, there are
/// two terminal nodes, node `n*m` and node `n*m+1`. Each cell is connected
/// from the first terminal and to the second terminal.
///
/// The following is the grid part of a network with 5 columns and 4 rows.
///
///   15 - 16 - 17 - 18 - 19
///    |    |    |    |    |
///   10 - 11 - 12 - 13 - 14
///    |    |    |    |    |
///    5 -- 6 -- 7 -- 8 -- 9
///    |    |    |    |    |
///    0 -- 1 -- 2 -- 3 -- 4
///
/// ```
/// use rs_maxflow::VecGraph;
/// use rs_maxflow::traits::*;
/// use rs_maxflow::classes;
///
/// let g: VecGraph = classes::grid(5, 4);
/// assert_eq!(g.num_nodes(), 22);
/// assert_eq!(g.num_edges(), 2 * (5*3 + 4*4) + 4 * 20);
/// assert!(g.is_bidirectional());
///
/// let s = g.id2node(20);
/// let t = g.id2node(21);
/// assert_eq!(g.outedges(s).count(), 20);
/// assert_eq!(g.outedges(t).count(), 20);
/// ```
pub fn grid<G>(n: usize, m: usize) -> G
where
    G: Buildable,
{
    let mut b = G::Builder::with_capacities(n * m + 2, 2 * (n.saturating_sub(1) * m + n * m.saturating_sub(1)) + 4 * n * m);
    let nodes = b.add_nodes(n * m);
    let s = b.add_node();
    let t = b.add_node();
    for i in 0..m {
        for j in 0..n {
            if j + 1 < n {
                b.add_twin_edges(nodes[i * n + j], nodes[i * n + j + 1]);
            }
            if i + 1 < m {
                b.add_twin_edges(nodes[i * n + j], nodes[(i + 1) * n + j]);
            }
        }
    }
    for &u in &nodes {
        b.add_twin_edges(s, u);
        b.add_twin_edges(u, t);
    }
    b.into_graph()
}
