/*
 * Copyright (c) 2020, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use rs_maxflow::dimacs;
use rs_maxflow::maxflow::{verify, BoykovKolmogorov, Flow, ImprovedSap, MaxFlow, PushRelabel};
use rs_maxflow::traits::*;
use rs_maxflow::{EdgeProperty, Net};

use num_traits::FromPrimitive;
use ordered_float::NotNan;
use std::error::Error;

const TESTS: &[(&str, i64)] = &[
    ("tests/maxflow_small.dat", 50),
    ("tests/maxflow_layers.dat", 19),
    ("tests/maxflow_random.dat", 1040),
    ("tests/maxflow_grid.dat", 8543),
    ("tests/maxflow_dense.dat", 1737),
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Run `alg` on all test instances with flow values of type `F`.
fn run_all<F, A>(alg: &mut A) -> Result<(), Box<dyn Error>>
where
    F: Flow + FromPrimitive + std::fmt::Debug,
    A: MaxFlow<F>,
{
    for &(file, expected) in TESTS {
        let instance = dimacs::max::read_from_file(file)?;
        let capacity: EdgeProperty<F> = instance.capacity().ok_or("capacity out of range")?;
        let g: Net = instance.graph;
        let s = instance.src;
        let t = instance.snk;

        let mut flow = EdgeProperty::new(&g, F::zero());
        let value = alg.solve(&g, &capacity, s, t, &mut flow);
        assert_eq!(value, F::from_i64(expected).ok_or("value out of range")?, "{}", file);
        verify::check(&g, &capacity, &flow, s, t, value)?;
    }
    Ok(())
}

#[test]
fn test_isap() -> Result<(), Box<dyn Error>> {
    init_logger();
    run_all::<i64, _>(&mut ImprovedSap::new())
}

#[test]
fn test_pushrelabel() -> Result<(), Box<dyn Error>> {
    init_logger();
    for &use_relabelling in &[true, false] {
        let mut pr = PushRelabel::new();
        pr.use_global_relabelling = use_relabelling;
        run_all::<i32, _>(&mut pr)?;
    }
    Ok(())
}

#[test]
fn test_boykov_kolmogorov() -> Result<(), Box<dyn Error>> {
    init_logger();
    run_all::<i64, _>(&mut BoykovKolmogorov::new())
}

#[test]
fn test_real_flows() -> Result<(), Box<dyn Error>> {
    init_logger();
    run_all::<NotNan<f64>, _>(&mut ImprovedSap::new())?;
    run_all::<NotNan<f64>, _>(&mut PushRelabel::new())?;
    run_all::<NotNan<f64>, _>(&mut BoykovKolmogorov::new())?;
    Ok(())
}

#[test]
fn test_mincut() -> Result<(), Box<dyn Error>> {
    let instance = dimacs::max::read_from_file("tests/maxflow_grid.dat")?;
    let capacity: EdgeProperty<i64> = instance.capacity().ok_or("capacity out of range")?;
    let g: Net = instance.graph;

    let (value, _, cut) = rs_maxflow::maxflow::boykov_kolmogorov(&g, &capacity, instance.src, instance.snk);
    let mut incut = vec![false; g.num_nodes()];
    for u in cut {
        incut[g.node_id(u)] = true;
    }
    assert!(incut[g.node_id(instance.src)]);
    assert!(!incut[g.node_id(instance.snk)]);
    let cutvalue: i64 = g
        .edges()
        .filter(|&e| incut[g.node_id(g.src(e))] && !incut[g.node_id(g.snk(e))])
        .map(|e| capacity[e])
        .sum();
    assert_eq!(cutvalue, value);
    Ok(())
}

#[test]
fn test_write_read() -> Result<(), Box<dyn Error>> {
    let instance = dimacs::max::read_from_file::<Net, _>("tests/maxflow_random.dat")?;
    let mut buf = vec![];
    dimacs::max::write(&mut buf, &instance)?;

    let again = dimacs::max::read::<_, Net, _>(&buf[..])?;
    let capacity: EdgeProperty<i64> = again.capacity().ok_or("capacity out of range")?;
    let (value, _, _) = rs_maxflow::maxflow::isap(&again.graph, &capacity, again.src, again.snk);
    assert_eq!(value, 1040);
    Ok(())
}
