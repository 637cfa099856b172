// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write as _;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use scenemap_parse::{ParseOptions, SceneParser, parse_bytes_with};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// A scene with `nodes` nodes; some carry long attribute arrays, some carry
/// scripts that mention `createNode` inside strings.
fn gen_scene(nodes: usize, seed: u64) -> Vec<u8> {
    const TYPES: [&str; 6] = ["transform", "mesh", "joint", "animCurveTL", "script", "camera"];
    let mut rng = Rng(seed);
    let mut s = String::from("//Maya ASCII 2024 scene\nrequires maya \"2024\";\n");
    for i in 0..nodes {
        let ty = TYPES[(rng.next_u64() % TYPES.len() as u64) as usize];
        let _ = writeln!(s, "createNode {ty} -n \"{ty}{i}\" -p \"grp{}\";", i / 16);
        match ty {
            "mesh" | "animCurveTL" => {
                let n = 8 + rng.next_u64() % 256;
                s.push_str("\tsetAttr -s ");
                let _ = write!(s, "{n} \".vt[0:{}]\"", n - 1);
                for k in 0..n {
                    let _ = write!(s, " {}.{}", k % 97, rng.next_u64() % 1000);
                }
                s.push_str(";\n");
            }
            "script" => {
                s.push_str(
                    "\tsetAttr \".b\" -type \"string\" \"createNode fake -n \\\"x\\\";\\n// ok\";\n",
                );
            }
            _ => s.push_str("\tsetAttr \".t\" -type \"double3\" 0 1 2 ;\n"),
        }
    }
    s.push_str("connectAttr \"a.o\" \"b.i\";\n");
    s.into_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &n in &[1_000_usize, 20_000] {
        let scene = gen_scene(n, 0x5eed_0000 ^ n as u64);
        group.throughput(Throughput::Bytes(scene.len() as u64));
        group.bench_function(format!("collect_n{n}"), |b| {
            b.iter(|| {
                let (records, summary) = parse_bytes_with(black_box(&scene), ParseOptions::default());
                black_box((records.len(), summary.total_bytes))
            });
        });
        group.bench_function(format!("stream_sizes_n{n}"), |b| {
            b.iter(|| {
                let total: u64 = SceneParser::new(black_box(&scene[..]))
                    .map(|r| r.byte_size)
                    .sum();
                black_box(total)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
