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

use time::OffsetDateTime;

use rustop::opts;

use rs_maxflow::dimacs;
use rs_maxflow::maxflow::{verify, BoykovKolmogorov, Flow, ImprovedSap, MaxFlow, PushRelabel};
use rs_maxflow::traits::*;
use rs_maxflow::vecgraph::Node;
use rs_maxflow::{EdgeProperty, Net};

use num_traits::FromPrimitive;
use ordered_float::NotNan;
use std::error::Error;
use std::fmt::Display;

fn run<F, A>(alg: &mut A, g: &Net, capacity: &EdgeProperty<F>, s: Node, t: Node, niter: usize) -> (F, EdgeProperty<F>)
where
    F: Flow + Display,
    A: MaxFlow<F>,
{
    let mut flow = EdgeProperty::new(g, F::zero());
    let mut value = F::zero();

    let tstart = OffsetDateTime::now_utc();
    for _ in 0..niter {
        value = alg.solve(g, capacity, s, t, &mut flow);
    }
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("Flow: {}", value);

    (value, flow)
}

fn read_and_run<F>(
    filename: &str,
    algorithm: &str,
    num: usize,
    global_relabelling: bool,
    check: bool,
    typ: &str,
) -> Result<(), Box<dyn Error>>
where
    F: Flow + Display + FromPrimitive,
{
    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::max::read_from_file(filename)?;
    let capacity: EdgeProperty<F> = instance.capacity().ok_or("capacity not representable")?;

    let g: Net = instance.graph;
    let s = instance.src;
    let t = instance.snk;

    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  graph: {}", std::any::type_name::<Net>());
    println!("  number type: {}", typ);
    println!("  algorithm: {}", algorithm);
    println!("  number of nodes: {}", g.num_nodes());
    println!("  number of edges: {}", g.num_edges());

    let (value, flow) = match algorithm {
        "isap" => {
            let mut alg = ImprovedSap::new();
            let result = run(&mut alg, &g, &capacity, s, t, num);
            println!("  number of augmentations: {}", alg.cnt_augment);
            println!("  number of relabels: {}", alg.cnt_relabel);
            result
        }
        "pushrelabel" => {
            let mut alg = PushRelabel::new();
            alg.use_global_relabelling = global_relabelling;
            println!(
                "  global-relabelling heuristic: {}",
                if alg.use_global_relabelling { "YES" } else { "NO" }
            );
            let result = run(&mut alg, &g, &capacity, s, t, num);
            println!("  number of relabels: {}", alg.cnt_relabel);
            println!("  number of gaps: {}", alg.cnt_gap);
            println!("  number of global relabellings: {}", alg.cnt_global_update);
            println!("  number of cancelled cycles: {}", alg.cnt_cycle);
            result
        }
        "bk" => {
            let mut alg = BoykovKolmogorov::new();
            let result = run(&mut alg, &g, &capacity, s, t, num);
            println!("  number of augmentations: {}", alg.cnt_augment);
            println!("  number of orphans: {}", alg.cnt_orphan);
            result
        }
        alg => return Err(format!("unknown algorithm: {} (must be isap, pushrelabel or bk)", alg).into()),
    };

    if check {
        verify::check(&g, &capacity, &flow, s, t, value)?;
        println!("  verification: OK");
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a max-flow problem in DIMACS format.";
        opt algorithm:String=String::from("pushrelabel"), desc:"The algorithm (isap, pushrelabel, bk).";
        opt no_global_relabelling:bool, desc:"Do not use the global-relabel heuristic.";
        opt num:usize=1, desc:"Number of times the algorithm is repeated.";
        opt real:bool, desc:"Use real valued flows.";
        opt verify:bool, desc:"Verify the computed flow.";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    let global_relabelling = !args.no_global_relabelling;
    let result = if !args.real {
        read_and_run::<i64>(&args.file, &args.algorithm, args.num, global_relabelling, args.verify, "i64")
    } else {
        read_and_run::<NotNan<f64>>(&args.file, &args.algorithm, args.num, global_relabelling, args.verify, "f64")
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
