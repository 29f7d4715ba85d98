//! Benchmarks for PostScript to SVG conversion.
//!
//! Benchmark groups:
//! - `tokenize`: Lexer throughput on synthetic programs
//! - `convert`: Full pipeline (lex, interpret, assemble)

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pssvg_core::{convert, tokenize};

// =============================================================================
// Data Generation
// =============================================================================

/// Generate a program drawing `n` small shapes.
///
/// Cycles through stroked squares, filled arcs, curves and text so that
/// most operator families are exercised.
fn generate_program(n: usize) -> String {
    let mut out = String::from("%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 1000 1000\n");
    out.push_str("/Helvetica findfont 8 scalefont setfont\n");
    out.push_str("/box { 0 0 moveto 10 0 lineto 10 10 lineto 0 10 lineto closepath } def\n");

    for i in 0..n {
        let x = (i * 13) % 990;
        let y = (i * 7) % 990;
        let shape = match i % 4 {
            0 => format!("gsave {x} {y} translate box stroke grestore\n"),
            1 => format!("{} 0 0 setrgbcolor {x} {y} 5 0 360 arc fill\n", (i % 10) as f64 / 10.0),
            2 => format!("{x} {y} moveto 3 4 6 -2 9 1 rcurveto stroke\n"),
            _ => format!("{x} {y} moveto (label {i}) show\n"),
        };
        out.push_str(&shape);
    }
    out.push_str("showpage\n");
    out
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for shapes in [100, 1_000, 10_000] {
        let program = generate_program(shapes);
        group.bench_with_input(BenchmarkId::new("shapes", shapes), &program, |b, program| {
            b.iter(|| tokenize(black_box(program)).len());
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for shapes in [100, 1_000, 10_000] {
        let program = generate_program(shapes);
        group.bench_with_input(BenchmarkId::new("shapes", shapes), &program, |b, program| {
            b.iter(|| convert(black_box(program)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_convert);
criterion_main!(benches);
