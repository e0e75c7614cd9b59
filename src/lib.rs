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

#![forbid(unsafe_code)]

//! A library of maximum flow algorithms on bidirectional networks.
//!
//! The network is a `VecGraph` in which each edge is paired with a twin
//! edge running in the opposite direction. Capacities and flows are stored
//! in `EdgeProperty`s indexed by edges. Three algorithms are provided in
//! [`maxflow`]: improved shortest augmenting paths, push-relabel and
//! Boykov-Kolmogorov.

mod num {
    pub use num_iter as iter;
    pub use num_traits as traits;
}

// # Data structures

pub mod traits;
pub use self::traits::{Digraph, TwinDigraph};

pub mod builder;
pub use crate::builder::{Buildable, Builder};

pub mod vecgraph;
pub use self::vecgraph::VecGraph;

pub mod property;
pub use self::property::EdgeProperty;

/// Network classes
pub mod classes;

/// The default network type.
///
/// A vector graph with up to 2^32 - 1 nodes and edges.
pub type Net = self::VecGraph<u32>;

// # Algorithms

pub mod maxflow;

#[cfg(feature = "dimacs")]
pub mod dimacs;
