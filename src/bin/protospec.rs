//! Compile a protocol DSL file and print the generated Rust enums.
//!
//! Usage:
//!   protospec FILE
//!
//! Generated code goes to stdout. Read, parse and emit errors go to stderr with the
//! file path as prefix, and nothing is printed to stdout. Exit code 1 on any
//! error or on a wrong argument count.

use anyhow::Context;
use protospec::{emit_declarations, parse};
use std::path::Path;

fn usage(program: &str) {
    println!("Usage: {} <file>", program);
}

fn compile(path: &Path) -> anyhow::Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("{}: read failed", path.display()))?;
    let declarations = parse(&src).with_context(|| format!("{}: parse failed", path.display()))?;
    emit_declarations(&declarations).with_context(|| format!("{}: emit failed", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        usage(args.first().map(String::as_str).unwrap_or("protospec"));
        std::process::exit(1);
    }

    match compile(Path::new(&args[1])) {
        Ok(out) => {
            print!("{}", out);
            Ok(())
        }
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
