//! # protospec: protocol definition DSL front end
//!
//! Parses a small DSL describing wire-protocol data structures into a typed
//! declaration model, and renders enum declarations as Rust code.
//!
//! ## Pipeline
//!
//! source → [`strip::strip_comments`] → [`lexer::tokenize`] → [`Parser`] →
//! `Vec<`[`Declaration`]`>` → [`emit::emit_declarations`]
//!
//! ## Declarations
//!
//! - **enum**: `enum Name(backing) { A, B = 5, C }` with backing one of
//!   `u8 u16 u32 u64 i8 i16 i32 i64 VarInt VarLong` (case-insensitive).
//!   Unvalued fields take the previous value plus one, starting at 0.
//! - **type**: `type Name { VarInt id, String[16] name }`, a record of typed fields.
//! - **packet**: `packet Name(serverbound, Play, 0x1a) { ... }`, a record with a
//!   direction, a connection state and a numeric id.
//!
//! Fields in `type` and `packet` bodies may carry a default (`u8 flags = 0`) and
//! may sit inside `if (condition) { ... }` blocks.
//!
//! ## Value types
//!
//! - Primitives: `bool`, `u8`..`u64`, `i8`..`i64`, `f32`, `f64`, `VarInt`, `VarLong`
//! - `String` or `String[max]`
//! - `Nbt`
//! - `List[element, max]`, nested at most two levels by default
//!
//! ## Example DSL
//!
//! ```text
//! // connection states
//! enum State(VarInt) {
//!   Handshake,
//!   Status,
//!   Login,
//!   Configuration = 4,
//!   Play,
//! }
//!
//! type Property {
//!   String[64] name,
//!   List[String[32767], 4] values,
//! }
//! ```
//!
//! ## Limitations
//!
//! Comment stripping cuts every line at its first `//`, quoted or not.
//! The emitter refuses enums whose values do not fit their backing type or
//! repeat, see [`EmitError`].

pub mod ast;
pub mod emit;
pub mod lexer;
pub mod parser;
pub mod strip;
pub mod types;

pub use ast::{
    Declaration, Direction, EnumDeclaration, EnumField, Field, FieldValue, IntegerType,
    PacketDeclaration, PrimitiveType, TypeDeclaration, ValueType, DEFAULT_STRING_LENGTH,
};
pub use emit::{check_enum, emit_declarations, emit_enum, emit_packet_summary, EmitError};
pub use lexer::{tokenize, Token};
pub use parser::{FieldSeparator, ParseError, ParseOptions, Parser};
pub use strip::strip_comments;

/// Parse a whole document with default options.
pub fn parse(source: &str) -> Result<Vec<Declaration>, ParseError> {
    Parser::new(source).parse_all()
}

pub fn parse_with_options(
    source: &str,
    options: ParseOptions,
) -> Result<Vec<Declaration>, ParseError> {
    Parser::with_options(source, options).parse_all()
}

/// Parse a standalone value type such as `List[String[10], 5]`.
/// The whole input must be consumed.
pub fn parse_type(source: &str) -> Result<ValueType, ParseError> {
    let mut parser = Parser::new(source);
    let ty = parser.parse_value_type()?;
    match parser.remaining().first() {
        Some(extra) => Err(ParseError::UnexpectedToken {
            expected: "end of type".to_string(),
            found: extra.text.clone(),
            line: extra.line,
            column: extra.column,
        }),
        None => Ok(ty),
    }
}
