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

//! Verification of maximum flows.
//!
//! The function [`check`] tests whether a flow computed by one of the
//! algorithms is a maximum flow:
//!
//! 1. `-capacity[twin(e)] <= flow[e] <= capacity[e]` for each edge,
//! 2. `flow[twin(e)] == -flow[e]` for each edge,
//! 3. the flow is conserved at each node except the source and the sink,
//! 4. the net flow leaving the source equals the flow value,
//! 5. there is no augmenting path in the residual network.

use super::{mincut, Flow};
use crate::property::EdgeProperty;
use crate::traits::TwinDigraph;

use std::error;
use std::fmt;

/// A violated property of a flow.
///
/// Nodes and edges are given by their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The flow on an edge exceeds its capacity (or the capacity of its twin).
    Capacity { edge: usize },
    /// The flow on an edge is not the negative flow on its twin.
    SkewSymmetry { edge: usize },
    /// The inflow and outflow of a node differ.
    Conservation { node: usize },
    /// The net flow out of the source is not the flow value.
    Value,
    /// The sink can be reached in the residual network.
    AugmentingPath,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::VerifyError::*;
        match self {
            Capacity { edge } => write!(fmt, "Capacity bound violated on edge {}", edge),
            SkewSymmetry { edge } => write!(fmt, "Flow on edge {} is not skew symmetric", edge),
            Conservation { node } => write!(fmt, "Flow conservation violated at node {}", node),
            Value => write!(fmt, "Net flow out of the source differs from the flow value"),
            AugmentingPath => write!(fmt, "Flow is not maximal, there is an augmenting path"),
        }
    }
}

impl error::Error for VerifyError {}

pub type Result<T> = std::result::Result<T, VerifyError>;

/// Check that `flow` is a maximum flow of value `value` from `src` to `snk`.
///
/// The graph must be bidirectional.
pub fn check<'a, G, F>(
    g: &'a G,
    capacity: &EdgeProperty<F>,
    flow: &EdgeProperty<F>,
    src: G::Node,
    snk: G::Node,
    value: F,
) -> Result<()>
where
    G: TwinDigraph<'a>,
    F: Flow,
{
    for e in g.edges() {
        let eid = g.edge_id(e);
        let tid = g.edge_id(g.twin(e).expect("Graph must be bidirectional"));
        let (f, c) = (flow.as_slice()[eid], capacity.as_slice()[eid]);
        if f > c || F::zero() - f > capacity.as_slice()[tid] {
            return Err(VerifyError::Capacity { edge: eid });
        }
        if f + flow.as_slice()[tid] != F::zero() {
            return Err(VerifyError::SkewSymmetry { edge: eid });
        }
    }

    // Flows are skew symmetric, so the net outflow of a node is the sum over
    // its outgoing edges.
    let mut outflow = vec![F::zero(); g.num_nodes()];
    for e in g.edges() {
        outflow[g.node_id(g.src(e))] += flow.as_slice()[g.edge_id(e)];
    }
    let (s, t) = (g.node_id(src), g.node_id(snk));
    if s == t {
        if value != F::zero() {
            return Err(VerifyError::Value);
        }
        return Ok(());
    }
    for (u, &f) in outflow.iter().enumerate() {
        if u != s && u != t && f != F::zero() {
            return Err(VerifyError::Conservation { node: u });
        }
    }
    if outflow[s] != value {
        return Err(VerifyError::Value);
    }

    if mincut(g, capacity, flow, src).into_iter().any(|u| u == snk) {
        return Err(VerifyError::AugmentingPath);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check, VerifyError};
    use crate::traits::*;
    use crate::{classes, EdgeProperty, VecGraph};

    #[test]
    fn test_violations() {
        // 0 -> 1 -> 2 with capacities 3 and 2
        let g: VecGraph = classes::path(2);
        let capacity = EdgeProperty::from_vec(vec![3, 0, 2, 0]);
        let (s, t) = (g.id2node(0), g.id2node(2));

        let flow = EdgeProperty::from_vec(vec![2, -2, 2, -2]);
        assert_eq!(check(&g, &capacity, &flow, s, t, 2), Ok(()));
        assert_eq!(check(&g, &capacity, &flow, s, t, 3), Err(VerifyError::Value));

        let flow = EdgeProperty::from_vec(vec![3, -3, 3, -3]);
        assert_eq!(check(&g, &capacity, &flow, s, t, 3), Err(VerifyError::Capacity { edge: 2 }));

        let flow = EdgeProperty::from_vec(vec![2, -1, 2, -2]);
        assert_eq!(check(&g, &capacity, &flow, s, t, 2), Err(VerifyError::SkewSymmetry { edge: 0 }));

        let flow = EdgeProperty::from_vec(vec![2, -2, 1, -1]);
        assert_eq!(check(&g, &capacity, &flow, s, t, 2), Err(VerifyError::Conservation { node: 1 }));

        let flow = EdgeProperty::from_vec(vec![1, -1, 1, -1]);
        assert_eq!(check(&g, &capacity, &flow, s, t, 1), Err(VerifyError::AugmentingPath));
    }
}
