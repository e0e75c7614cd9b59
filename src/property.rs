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

//! Values associated with the edges of a graph.
//!
//! An `EdgeProperty` stores one value per edge. It is indexed by the edges
//! of a `VecGraph` (or by edge ids) in constant time.
//!
//! ```
//! use rs_maxflow::traits::*;
//! use rs_maxflow::{Buildable, Builder, EdgeProperty, VecGraph};
//!
//! let mut b = VecGraph::<u32>::new_builder();
//! let u = b.add_node();
//! let v = b.add_node();
//! let (e, f) = b.add_twin_edges(u, v);
//! let g = b.into_graph();
//!
//! let mut capacity = EdgeProperty::new(&g, 0);
//! capacity[e] = 7;
//! assert_eq!(capacity[e], 7);
//! assert_eq!(capacity[f], 0);
//! assert_eq!(capacity.len(), g.num_edges());
//! ```

use crate::traits::{Digraph, Indexable};

use std::ops::{Index, IndexMut};
use std::slice::{Iter as SliceIter, IterMut as SliceIterMut};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A value for each edge of a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EdgeProperty<T> {
    values: Vec<T>,
}

impl<T> EdgeProperty<T> {
    /// Create a new property for the edges of `g` with all values set to
    /// `value`.
    pub fn new<'a, G>(g: &G, value: T) -> Self
    where
        G: Digraph<'a>,
        T: Clone,
    {
        EdgeProperty::with_len(g.num_edges(), value)
    }

    /// Create a new property for `m` edges with all values set to `value`.
    pub fn with_len(m: usize, value: T) -> Self
    where
        T: Clone,
    {
        EdgeProperty { values: vec![value; m] }
    }

    /// Create a property from a vector of values indexed by edge id.
    pub fn from_vec(values: Vec<T>) -> Self {
        EdgeProperty { values }
    }

    /// Return the number of edges.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` if the property has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set all values to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for x in &mut self.values {
            *x = value.clone();
        }
    }

    /// Return the values indexed by edge id.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Return the mutable values indexed by edge id.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterate over the values in the order of the edge ids.
    pub fn iter(&self) -> SliceIter<T> {
        self.values.iter()
    }

    /// Iterate mutably over the values in the order of the edge ids.
    pub fn iter_mut(&mut self) -> SliceIterMut<T> {
        self.values.iter_mut()
    }

    /// Return the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T, E> Index<E> for EdgeProperty<T>
where
    E: Indexable,
{
    type Output = T;

    fn index(&self, e: E) -> &T {
        &self.values[e.index()]
    }
}

impl<T, E> IndexMut<E> for EdgeProperty<T>
where
    E: Indexable,
{
    fn index_mut(&mut self, e: E) -> &mut T {
        &mut self.values[e.index()]
    }
}

impl<T> From<Vec<T>> for EdgeProperty<T> {
    fn from(values: Vec<T>) -> Self {
        EdgeProperty::from_vec(values)
    }
}

impl<'a, T> IntoIterator for &'a EdgeProperty<T> {
    type Item = &'a T;
    type IntoIter = SliceIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeProperty;

    #[test]
    fn test_fill_and_convert() {
        let mut p = EdgeProperty::from(vec![1, 2, 3]);
        assert_eq!(p.len(), 3);
        assert_eq!(p.iter().sum::<i32>(), 6);

        p.as_mut_slice()[1] = 5;
        assert_eq!(p.as_slice(), &[1, 5, 3]);

        p.fill(0);
        assert!(p.iter().all(|&x| x == 0));
        assert_eq!(p.into_vec(), vec![0, 0, 0]);

        let q = EdgeProperty::<u8>::with_len(0, 1);
        assert!(q.is_empty());
    }
}
