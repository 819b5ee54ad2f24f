//! Benchmark: strip + tokenize + parse over a generated document, and the
//! emitter over the parsed declarations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protospec::{emit_declarations, parse, strip_comments, tokenize};

fn document(enums: usize, fields: usize) -> String {
    let mut src = String::new();
    for e in 0..enums {
        src.push_str(&format!("// enum {}\nenum E{}(VarInt) {{\n", e, e));
        for f in 0..fields {
            if f % 7 == 3 {
                src.push_str(&format!("  F{} = {}, // skip\n", f, f * 2));
            } else {
                src.push_str(&format!("  F{},\n", f));
            }
        }
        src.push_str("}\n");
        src.push_str(&format!(
            "type T{} {{ VarInt id, String[64] name, List[List[u8, 16], 8] grid }}\n",
            e
        ));
        src.push_str(&format!(
            "packet P{}(clientbound, Play, {}) {{ VarInt id = 0, bool more, if (more) {{ Nbt tag }} }}\n",
            e, e
        ));
    }
    src
}

fn bench_parse(c: &mut Criterion) {
    let src = document(200, 40);

    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(&strip_comments(black_box(&src))).len())
    });
    c.bench_function("parse", |b| {
        b.iter(|| parse(black_box(&src)).expect("parse").len())
    });

    let declarations = parse(&src).expect("parse");
    c.bench_function("emit", |b| {
        b.iter(|| emit_declarations(black_box(&declarations)).expect("emit").len())
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
