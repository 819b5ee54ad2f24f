//! Declaration model produced by the parser and consumed by the emitter.

use std::fmt;
use std::ops::RangeInclusive;

/// Maximum length of a `String` that does not declare one.
pub const DEFAULT_STRING_LENGTH: usize = 32767;

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Enum(EnumDeclaration),
    Type(TypeDeclaration),
    Packet(PacketDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Enum(e) => &e.name,
            Declaration::Type(t) => &t.name,
            Declaration::Packet(p) => &p.name,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDeclaration> {
        match self {
            Declaration::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDeclaration> {
        match self {
            Declaration::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_packet(&self) -> Option<&PacketDeclaration> {
        match self {
            Declaration::Packet(p) => Some(p),
            _ => None,
        }
    }
}

/// Backing integer representation of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegerType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    #[default]
    VarInt,
    VarLong,
}

impl IntegerType {
    pub const ALL: [IntegerType; 10] = [
        IntegerType::U8,
        IntegerType::U16,
        IntegerType::U32,
        IntegerType::U64,
        IntegerType::I8,
        IntegerType::I16,
        IntegerType::I32,
        IntegerType::I64,
        IntegerType::VarInt,
        IntegerType::VarLong,
    ];

    /// Canonical DSL spelling.
    pub fn name(self) -> &'static str {
        match self {
            IntegerType::U8 => "u8",
            IntegerType::U16 => "u16",
            IntegerType::U32 => "u32",
            IntegerType::U64 => "u64",
            IntegerType::I8 => "i8",
            IntegerType::I16 => "i16",
            IntegerType::I32 => "i32",
            IntegerType::I64 => "i64",
            IntegerType::VarInt => "VarInt",
            IntegerType::VarLong => "VarLong",
        }
    }

    /// Case-insensitive lookup against the canonical names.
    pub fn lookup(s: &str) -> Option<IntegerType> {
        IntegerType::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
    }

    /// Values representable on the wire. VarInt and VarLong carry i32 and i64.
    pub fn range(self) -> RangeInclusive<i128> {
        macro_rules! range {
            ($ty:ty) => {
                <$ty>::MIN as i128..=<$ty>::MAX as i128
            };
        }
        match self {
            IntegerType::U8 => range!(u8),
            IntegerType::U16 => range!(u16),
            IntegerType::U32 => range!(u32),
            IntegerType::U64 => range!(u64),
            IntegerType::I8 => range!(i8),
            IntegerType::I16 => range!(i16),
            IntegerType::I32 | IntegerType::VarInt => range!(i32),
            IntegerType::I64 | IntegerType::VarLong => range!(i64),
        }
    }

    /// Rust primitive used for `#[repr(..)]` in generated code.
    pub fn rust_repr(self) -> &'static str {
        match self {
            IntegerType::U8 => "u8",
            IntegerType::U16 => "u16",
            IntegerType::U32 => "u32",
            IntegerType::U64 => "u64",
            IntegerType::I8 => "i8",
            IntegerType::I16 => "i16",
            IntegerType::I32 | IntegerType::VarInt => "i32",
            IntegerType::I64 | IntegerType::VarLong => "i64",
        }
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leaf types of the type grammar. Keywords match case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    VarInt,
    VarLong,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::VarInt => "VarInt",
            PrimitiveType::VarLong => "VarLong",
        }
    }

    pub fn from_keyword(s: &str) -> Option<PrimitiveType> {
        match s {
            "bool" => Some(PrimitiveType::Bool),
            "u8" => Some(PrimitiveType::U8),
            "u16" => Some(PrimitiveType::U16),
            "u32" => Some(PrimitiveType::U32),
            "u64" => Some(PrimitiveType::U64),
            "i8" => Some(PrimitiveType::I8),
            "i16" => Some(PrimitiveType::I16),
            "i32" => Some(PrimitiveType::I32),
            "i64" => Some(PrimitiveType::I64),
            "f32" => Some(PrimitiveType::F32),
            "f64" => Some(PrimitiveType::F64),
            "VarInt" => Some(PrimitiveType::VarInt),
            "VarLong" => Some(PrimitiveType::VarLong),
            _ => None,
        }
    }
}

/// Value type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Primitive(PrimitiveType),
    String { max_length: Option<usize> },
    Nbt,
    List {
        element: Box<ValueType>,
        max_length: usize,
    },
}

impl ValueType {
    /// Declared maximum, or [`DEFAULT_STRING_LENGTH`] for a bare `String`.
    pub fn string_max_length(&self) -> Option<usize> {
        match self {
            ValueType::String { max_length } => Some(max_length.unwrap_or(DEFAULT_STRING_LENGTH)),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Primitive(p) => f.write_str(p.keyword()),
            ValueType::String { max_length: None } => f.write_str("String"),
            ValueType::String {
                max_length: Some(n),
            } => write!(f, "String[{}]", n),
            ValueType::Nbt => f.write_str("Nbt"),
            ValueType::List {
                element,
                max_length,
            } => write!(f, "List[{}, {}]", element, max_length),
        }
    }
}

/// One `name [= value]` entry of an enum, with its value already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumField {
    pub name: String,
    pub value: i64,
}

impl EnumField {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        EnumField {
            name: name.into(),
            value,
        }
    }
}

/// `enum Name(backing) { ... }`. Field order is emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumDeclaration {
    pub name: String,
    pub backing_type: IntegerType,
    pub fields: Vec<EnumField>,
}

impl EnumDeclaration {
    /// Fields whose value differs from the running implicit counter, i.e. the
    /// ones a generator must tag explicitly.
    pub fn explicit_fields(&self) -> impl Iterator<Item = &EnumField> {
        let mut next = Some(0i64);
        self.fields.iter().filter(move |f| {
            let explicit = next != Some(f.value);
            next = f.value.checked_add(1);
            explicit
        })
    }
}

/// Right-hand side of `TYPE name = value`: a literal or a reference to
/// another field or constant. Not evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Integer(i64),
    Identifier(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Identifier(name) => f.write_str(name),
        }
    }
}

/// `TYPE name [= value]` inside a `type` or `packet` body.
///
/// `condition` is the raw text of every enclosing `if (...)` block, joined
/// with ` && `.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub ty: ValueType,
    pub name: String,
    pub default: Option<FieldValue>,
    pub condition: Option<String>,
}

impl Field {
    pub fn new(ty: ValueType, name: impl Into<String>) -> Self {
        Field {
            ty,
            name: name.into(),
            default: None,
            condition: None,
        }
    }
}

/// `type Name { ... }`: a named record of typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Serverbound,
    Clientbound,
}

impl Direction {
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Serverbound => "serverbound",
            Direction::Clientbound => "clientbound",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Direction> {
        match s {
            "serverbound" => Some(Direction::Serverbound),
            "clientbound" => Some(Direction::Clientbound),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `packet Name(direction, State, id) { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketDeclaration {
    pub name: String,
    pub direction: Direction,
    pub state: String,
    pub id: u32,
    pub fields: Vec<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_type_lookup_is_case_insensitive() {
        assert_eq!(IntegerType::lookup("varint"), Some(IntegerType::VarInt));
        assert_eq!(IntegerType::lookup("U16"), Some(IntegerType::U16));
        assert_eq!(IntegerType::lookup("VARLONG"), Some(IntegerType::VarLong));
        assert_eq!(IntegerType::lookup("u12"), None);
        assert_eq!(IntegerType::lookup("f32"), None);
    }

    #[test]
    fn integer_type_default_and_display() {
        assert_eq!(IntegerType::default(), IntegerType::VarInt);
        assert_eq!(EnumDeclaration::default().backing_type, IntegerType::VarInt);
        for ty in IntegerType::ALL {
            assert_eq!(IntegerType::lookup(&ty.to_string()), Some(ty));
        }
    }

    #[test]
    fn integer_type_ranges() {
        assert_eq!(IntegerType::U8.range(), 0..=255);
        assert_eq!(IntegerType::VarInt.range(), IntegerType::I32.range());
        assert!(IntegerType::U64.range().contains(&(u64::MAX as i128)));
        assert_eq!(IntegerType::VarLong.rust_repr(), "i64");
    }

    #[test]
    fn primitive_keywords_are_case_sensitive() {
        assert_eq!(PrimitiveType::from_keyword("bool"), Some(PrimitiveType::Bool));
        assert_eq!(PrimitiveType::from_keyword("Bool"), None);
        assert_eq!(PrimitiveType::from_keyword("varint"), None);
    }

    #[test]
    fn value_type_display_and_string_length() {
        let ty = ValueType::List {
            element: Box::new(ValueType::List {
                element: Box::new(ValueType::String {
                    max_length: Some(10),
                }),
                max_length: 4,
            }),
            max_length: 5,
        };
        assert_eq!(ty.to_string(), "List[List[String[10], 4], 5]");
        assert_eq!(
            ValueType::String { max_length: None }.string_max_length(),
            Some(DEFAULT_STRING_LENGTH)
        );
        assert_eq!(ValueType::Nbt.string_max_length(), None);
    }

    #[test]
    fn direction_keywords() {
        assert_eq!(Direction::from_keyword("serverbound"), Some(Direction::Serverbound));
        assert_eq!(Direction::from_keyword("Clientbound"), None);
        assert_eq!(Direction::Clientbound.to_string(), "clientbound");
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Integer(-3).to_string(), "-3");
        assert_eq!(FieldValue::Identifier("count".to_string()).to_string(), "count");
    }

    #[test]
    fn explicit_fields_follow_implicit_counter() {
        let decl = EnumDeclaration {
            name: "Foo".to_string(),
            backing_type: IntegerType::U8,
            fields: vec![
                EnumField::new("A", 0),
                EnumField::new("B", 5),
                EnumField::new("C", 6),
            ],
        };
        let explicit: Vec<_> = decl.explicit_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(explicit, vec!["B"]);
    }
}
