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

//! This module implements read and write functions for the famous DIMACS
//! max flow format. A DIMACS file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p max <n> <m>`,
//!    where `<n>` is an integer > 0 denoting the number of nodes and
//!    `<m>` an integer >= 0 denoting the number of arcs.
//! 4. after the problem line there must follow exactly two node lines
//!    of the form `n <node> <type>` where `<node>` is the node number
//!    between `1..n` and `<type>` is either `s` (if this is the source
//!    node) or `t` (if this is the sink node).
//! 5. after the node lines there must be exactly `m` arc lines `a <u>
//!    <v> <c>` denoting the source and sink nodes of an arc as well as
//!    the arcs capacity `<c>` (an integer >= 0).
//!
//! Loops are not allowed, parallel arcs are. Each arc `(u,v)` is added to
//! the graph together with a twin `(v,u)` of capacity 0, so the arc with
//! number `i` in the file becomes edge `2*i` of the graph and its twin
//! edge `2*i + 1`. The resulting network can be passed directly to the
//! max flow algorithms.

use super::{DimacsReader, Error, Result};
use crate::builder::{Buildable, Builder};
use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use crate::num::traits::FromPrimitive;
use std::io::{Read, Write};

/// A max flow instance.
pub struct Instance<G, N> {
    /// The graph.
    pub graph: G,
    /// The source node.
    pub src: N,
    /// The sink node.
    pub snk: N,
    /// The capacity of each edge (0 for the added twins).
    pub upper: Vec<usize>,
}

impl<G, N> Instance<G, N> {
    /// Return the capacities as an edge property.
    ///
    /// Returns `None` if some capacity cannot be represented by `F`.
    pub fn capacity<F>(&self) -> Option<EdgeProperty<F>>
    where
        F: FromPrimitive,
    {
        self.upper
            .iter()
            .map(|&c| F::from_usize(c))
            .collect::<Option<Vec<_>>>()
            .map(EdgeProperty::from_vec)
    }
}

/// Read a max flow instance.
pub fn read<R: Read, G, N>(r: R) -> Result<Instance<G, N>>
where
    G: for<'a> TwinDigraph<'a, Node = N> + Buildable,
{
    let mut reader = DimacsReader::new(r);

    // Read the problem line.
    let mut pline = reader.expect_line('p')?;
    pline.expect("max")?;
    let nnodes: usize = pline.number()?;
    let nedges: usize = pline.number()?;
    pline.end()?;

    if nnodes == 0 {
        return Err(Error::Data {
            line: pline.line,
            msg: "the network must contain at least one node".to_string(),
        });
    }

    let (max_nodes, max_edges) = G::Builder::max_size();
    if nnodes > max_nodes {
        return Err(Error::Data {
            line: pline.line,
            msg: format!("too many nodes: {} (at most {})", nnodes, max_nodes),
        });
    }
    match nedges.checked_mul(2) {
        Some(m) if m <= max_edges => {}
        _ => {
            return Err(Error::Data {
                line: pline.line,
                msg: format!("too many arcs: {} (at most {})", nedges, max_edges / 2),
            })
        }
    }

    let mut src = None;
    let mut snk = None;

    for _ in 0..2 {
        let mut nline = reader.expect_line('n')?;
        let u = nline.node(nnodes)?;
        let what = nline.str()?;
        nline.end()?;
        let terminal = match what {
            "s" => &mut src,
            "t" => &mut snk,
            _ => {
                return Err(Error::Format {
                    line: nline.line,
                    msg: format!("invalid node type, must be 's' or 't', got: {}", what),
                });
            }
        };
        if terminal.is_some() {
            return Err(Error::Format {
                line: nline.line,
                msg: format!("duplicate terminal node '{}'", what),
            });
        }
        *terminal = Some(u);
    }

    // one 's' and one 't' line have been read
    let (src, snk) = match (src, snk) {
        (Some(s), Some(t)) => (s, t),
        _ => unreachable!(),
    };

    // The counts in the problem line are not trusted for allocations, the
    // arcs are collected first.
    let mut arcs = vec![];
    for _ in 0..nedges {
        let mut aline = reader.expect_line('a')?;
        let u = aline.node(nnodes)?;
        let v = aline.node(nnodes)?;
        let c: usize = aline.number()?;
        aline.end()?;

        if u == v {
            return Err(Error::Data {
                line: aline.line,
                msg: format!("invalid loop ({},{}) in edge", u + 1, u + 1),
            });
        }

        arcs.push((u, v, c));
    }

    reader.expect_eof()?;

    let mut b = G::Builder::with_capacities(nnodes, 2 * arcs.len());
    let mut upper = vec![0; 2 * arcs.len()];
    let nodes = b.add_nodes(nnodes);
    for (u, v, c) in arcs {
        let (e, _) = b.add_twin_edges(nodes[u], nodes[v]);
        upper[b.edge2id(e)] = c;
    }

    let graph = b.into_graph();
    let src = graph.id2node(src);
    let snk = graph.id2node(snk);
    Ok(Instance { graph, src, snk, upper })
}

/// Read a max flow instance from a named file.
pub fn read_from_file<G, N>(filename: &str) -> Result<Instance<G, N>>
where
    G: for<'a> TwinDigraph<'a, Node = N> + Buildable,
{
    read(std::fs::File::open(filename)?)
}

/// Write a max flow instance.
///
/// Only edges with positive capacity are written. Reading the file again
/// gives an equivalent network.
pub fn write<'a, W, G>(mut w: W, instance: &'a Instance<G, G::Node>) -> std::io::Result<()>
where
    W: Write,
    G: TwinDigraph<'a>,
{
    let g = &instance.graph;
    let arcs: Vec<_> = g.edges().filter(|&e| instance.upper[g.edge_id(e)] > 0).collect();
    writeln!(w, "p max {} {}", g.num_nodes(), arcs.len())?;
    writeln!(w, "n {} s", g.node_id(instance.src) + 1)?;
    writeln!(w, "n {} t", g.node_id(instance.snk) + 1)?;
    for e in arcs {
        writeln!(
            w,
            "a {} {} {}",
            g.node_id(g.src(e)) + 1,
            g.node_id(g.snk(e)) + 1,
            instance.upper[g.edge_id(e)],
        )?;
    }

    Ok(())
}

/// Write a max flow instance to a named file.
pub fn write_to_file<'a, G>(filename: &str, instance: &'a Instance<G, G::Node>) -> std::io::Result<()>
where
    G: TwinDigraph<'a>,
{
    write(&mut std::fs::File::create(filename)?, instance)
}
