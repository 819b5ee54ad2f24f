//! Render parsed declarations as Rust source.
//!
//! Enum members keep declaration order. A member gets an explicit `= value`
//! only when its value differs from the previous member's value plus one
//! (the first member is compared against 0).
//!
//! The parser accepts any i64 value and duplicate values; a Rust `#[repr]`
//! enum does not, so those are rejected here.

use crate::ast::{Declaration, EnumDeclaration, Field, PacketDeclaration, TypeDeclaration};
use std::collections::HashMap;
use std::fmt::Write;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("enum {enum_name}: value {value} of '{field}' does not fit in {backing}")]
    ValueOutOfRange {
        enum_name: String,
        field: String,
        value: i64,
        backing: String,
    },
    #[error("enum {enum_name}: '{field}' repeats value {value} already used by '{first}'")]
    DuplicateValue {
        enum_name: String,
        field: String,
        first: String,
        value: i64,
    },
}

/// Check that every member fits the backing type and no value repeats.
pub fn check_enum(decl: &EnumDeclaration) -> Result<(), EmitError> {
    let range = decl.backing_type.range();
    let mut seen: HashMap<i64, &str> = HashMap::new();
    for field in &decl.fields {
        if !range.contains(&i128::from(field.value)) {
            return Err(EmitError::ValueOutOfRange {
                enum_name: decl.name.clone(),
                field: field.name.clone(),
                value: field.value,
                backing: decl.backing_type.to_string(),
            });
        }
        if let Some(first) = seen.insert(field.value, field.name.as_str()) {
            return Err(EmitError::DuplicateValue {
                enum_name: decl.name.clone(),
                field: field.name.clone(),
                first: first.to_string(),
                value: field.value,
            });
        }
    }
    Ok(())
}

/// Emit a `pub enum` for one declaration. Enums without members get no
/// `#[repr]`, which Rust rejects on zero-variant enums.
pub fn emit_enum(decl: &EnumDeclaration) -> Result<String, EmitError> {
    check_enum(decl)?;

    let mut out = String::new();
    if !decl.fields.is_empty() {
        let _ = writeln!(out, "#[repr({})]", decl.backing_type.rust_repr());
    }
    let _ = writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    let _ = writeln!(out, "pub enum {} {{", decl.name);
    let mut explicit = decl.explicit_fields().peekable();
    for field in &decl.fields {
        if explicit.next_if(|e| std::ptr::eq(*e, field)).is_some() {
            let _ = writeln!(out, "{}{} = {},", INDENT, field.name, field.value);
        } else {
            let _ = writeln!(out, "{}{},", INDENT, field.name);
        }
    }
    out.push_str("}\n");
    Ok(out)
}

/// One field as a comment line. Strings show their effective maximum length.
fn write_field_summary(out: &mut String, field: &Field) {
    let _ = match field.ty.string_max_length() {
        Some(max) => write!(out, "//{}{}: String[{}]", INDENT, field.name, max),
        None => write!(out, "//{}{}: {}", INDENT, field.name, field.ty),
    };
    if let Some(default) = &field.default {
        let _ = write!(out, " = {}", default);
    }
    if let Some(condition) = &field.condition {
        let _ = write!(out, " if {}", condition);
    }
    out.push('\n');
}

/// Summary comment for a `type` declaration; records are not generated.
pub fn emit_type_summary(decl: &TypeDeclaration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// type {}", decl.name);
    for field in &decl.fields {
        write_field_summary(&mut out, field);
    }
    out
}

/// Summary comment for a `packet` declaration.
pub fn emit_packet_summary(decl: &PacketDeclaration) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "// packet {} ({}, {}, 0x{:02x})",
        decl.name, decl.direction, decl.state, decl.id
    );
    for field in &decl.fields {
        write_field_summary(&mut out, field);
    }
    out
}

/// All declarations in order, separated by blank lines. Fails on the first
/// enum that cannot be expressed as a Rust enum.
pub fn emit_declarations(declarations: &[Declaration]) -> Result<String, EmitError> {
    let parts = declarations
        .iter()
        .map(|decl| match decl {
            Declaration::Enum(e) => emit_enum(e),
            Declaration::Type(t) => Ok(emit_type_summary(t)),
            Declaration::Packet(p) => Ok(emit_packet_summary(p)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join("\n"))
}
