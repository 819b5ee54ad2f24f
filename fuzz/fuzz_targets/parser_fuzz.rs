//! Parser fuzz target: feed arbitrary bytes through strip, lex, parse and emit.
//! Nothing may panic; parsing returns Ok(declarations) or Err(ParseError).
//! Emitting fails exactly when some enum fails `check_enum`, and then with
//! that enum's error.
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(declarations) = protospec::parse(s) {
        let first_bad = declarations
            .iter()
            .filter_map(|d| d.as_enum())
            .find_map(|e| protospec::check_enum(e).err());
        match (protospec::emit_declarations(&declarations), first_bad) {
            (Ok(out), None) => assert!(declarations.is_empty() || !out.is_empty()),
            (Err(err), Some(expected)) => {
                assert_eq!(err, expected);
                assert!(!err.to_string().is_empty());
            }
            (result, expected) => panic!("emit {:?} but check_enum {:?}", result, expected),
        }
    }
    let _ = protospec::parse_type(s);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}
