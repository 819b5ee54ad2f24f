//! Recursive-descent parser over the token buffer.
//!
//! The parser owns an immutable token buffer and a cursor. Each declaration is
//! parsed all-or-nothing: on error the cursor is put back where the declaration
//! started, so a failed parse leaves no half-consumed state behind.
//!
//! The type grammar lives in [`crate::types`] as a further `impl Parser` block.

use crate::ast::*;
use crate::lexer::{tokenize, Token, SPECIAL_SEQUENCES};
use crate::strip::strip_comments;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}, column {column}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    /// Input ended inside a declaration. The position is just past the last token.
    #[error("line {line}, column {column}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: String,
        line: usize,
        column: usize,
    },
    #[error("line {line}, column {column}: invalid {kind} '{token}'")]
    InvalidType {
        kind: &'static str,
        token: String,
        line: usize,
        column: usize,
    },
    #[error("line {line}, column {column}: invalid integer literal '{token}'")]
    InvalidLiteral {
        token: String,
        line: usize,
        column: usize,
    },
    #[error("line {line}, column {column}: implicit value of '{field}' does not fit in i64")]
    ValueOverflow {
        field: String,
        line: usize,
        column: usize,
    },
    #[error("line {line}, column {column}: List nested deeper than {max} levels")]
    NestingTooDeep {
        max: usize,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Source position (line, column) of the offending token.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnexpectedEof { line, column, .. }
            | ParseError::UnexpectedToken { line, column, .. }
            | ParseError::InvalidType { line, column, .. }
            | ParseError::InvalidLiteral { line, column, .. }
            | ParseError::ValueOverflow { line, column, .. }
            | ParseError::NestingTooDeep { line, column, .. } => (*line, *column),
        }
    }

    pub(crate) fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.text.clone(),
            line: found.line,
            column: found.column,
        }
    }

    pub(crate) fn invalid_type(kind: &'static str, token: &Token) -> Self {
        ParseError::InvalidType {
            kind,
            token: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }

    pub(crate) fn invalid_literal(token: &Token) -> Self {
        ParseError::InvalidLiteral {
            token: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

/// How entries inside `{ ... }` are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSeparator {
    /// `A, B = 5, C` (a trailing comma before `}` is accepted).
    #[default]
    Comma,
    /// `A B = 5 C`
    Whitespace,
}

/// Grammar knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub separator: FieldSeparator,
    /// Maximum number of nested `List` layers in a value type.
    pub max_list_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            separator: FieldSeparator::Comma,
            max_list_depth: 2,
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    pub(crate) options: ParseOptions,
}

impl Parser {
    /// Strip comments from `source` and tokenize it.
    pub fn new(source: &str) -> Self {
        Parser::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &str, options: ParseOptions) -> Self {
        Parser::from_tokens(tokenize(&strip_comments(source)), options)
    }

    pub fn from_tokens(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Parser {
            tokens,
            position: 0,
            options,
        }
    }

    /// Index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Tokens not consumed yet.
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    /// Parse every declaration until the tokens run out.
    pub fn parse_all(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();
        while let Some(decl) = self.parse_declaration()? {
            declarations.push(decl);
        }
        Ok(declarations)
    }

    /// Parse the next top-level declaration. `Ok(None)` means the input ended
    /// cleanly between declarations.
    pub fn parse_declaration(&mut self) -> Result<Option<Declaration>, ParseError> {
        let start = self.position;
        let result = match self.peek() {
            None => return Ok(None),
            Some(t) if t.is("enum") => self.parse_enum().map(Declaration::Enum),
            Some(t) if t.is("type") => self.parse_type_declaration().map(Declaration::Type),
            Some(t) if t.is("packet") => self.parse_packet().map(Declaration::Packet),
            Some(t) => Err(ParseError::unexpected("'enum', 'type' or 'packet'", t)),
        };
        if result.is_err() {
            self.position = start;
        }
        result.map(Some)
    }

    /// `enum NAME ( INTTYPE ) { FIELD ... }`
    pub fn parse_enum(&mut self) -> Result<EnumDeclaration, ParseError> {
        self.expect("enum")?;
        let name = self.next_token("enum name")?.text;
        self.expect("(")?;
        let backing_type = self.parse_integer_type()?;
        self.expect(")")?;
        self.expect("{")?;

        let mut fields = Vec::new();
        let mut next: i128 = 0;
        while !self.check("}") {
            let name_token = self.next_token("enum field name or '}'")?;
            let value = if self.check("=") {
                self.advance();
                let literal = self.next_token("enum field value")?;
                parse_integer(&literal.text).ok_or_else(|| ParseError::invalid_literal(&literal))?
            } else {
                i64::try_from(next).map_err(|_| ParseError::ValueOverflow {
                    field: name_token.text.clone(),
                    line: name_token.line,
                    column: name_token.column,
                })?
            };
            fields.push(EnumField::new(name_token.text, value));
            next = i128::from(value) + 1;
            self.field_separator()?;
        }
        self.expect("}")?;

        Ok(EnumDeclaration {
            name,
            backing_type,
            fields,
        })
    }

    /// `type NAME { FIELDS }`
    pub fn parse_type_declaration(&mut self) -> Result<TypeDeclaration, ParseError> {
        self.expect("type")?;
        let name = self.next_token("type name")?.text;
        self.expect("{")?;
        let fields = self.parse_field_list()?;
        self.expect("}")?;

        Ok(TypeDeclaration { name, fields })
    }

    /// `packet NAME ( DIRECTION , STATE , ID ) { FIELDS }`
    pub fn parse_packet(&mut self) -> Result<PacketDeclaration, ParseError> {
        self.expect("packet")?;
        let name = self.next_token("packet name")?.text;
        self.expect("(")?;
        let token = self.next_token("packet direction")?;
        let direction = Direction::from_keyword(&token.text)
            .ok_or_else(|| ParseError::invalid_type("packet direction", &token))?;
        self.expect(",")?;
        let state = self.next_token("packet state")?.text;
        self.expect(",")?;
        let token = self.next_token("packet id")?;
        let id = parse_integer(&token.text)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ParseError::invalid_literal(&token))?;
        self.expect(")")?;
        self.expect("{")?;
        let fields = self.parse_field_list()?;
        self.expect("}")?;

        Ok(PacketDeclaration {
            name,
            direction,
            state,
            id,
            fields,
        })
    }

    /// Fields of a `type` or `packet` body, up to (not including) its `}`.
    fn parse_field_list(&mut self) -> Result<Vec<Field>, ParseError> {
        let mut fields = Vec::new();
        self.parse_fields_into(&mut fields, &mut Vec::new())?;
        Ok(fields)
    }

    fn parse_fields_into(
        &mut self,
        fields: &mut Vec<Field>,
        conditions: &mut Vec<String>,
    ) -> Result<(), ParseError> {
        while !self.check("}") {
            if self.is_at_end() {
                return Err(self.eof("field type or '}'"));
            }

            if self.check("if") {
                self.advance();
                let condition = self.parse_condition()?;
                self.expect("{")?;
                conditions.push(condition);
                self.parse_fields_into(fields, conditions)?;
                conditions.pop();
                self.expect("}")?;
                // A block needs no separator after its `}`, but one is tolerated.
                if self.check(",") {
                    self.advance();
                }
                continue;
            }

            let ty = self.parse_value_type()?;
            let mut field = Field::new(ty, self.next_token("field name")?.text);
            if self.check("=") {
                self.advance();
                field.default = Some(self.parse_field_value()?);
            }
            if !conditions.is_empty() {
                field.condition = Some(conditions.join(" && "));
            }
            fields.push(field);
            self.field_separator()?;
        }
        Ok(())
    }

    /// `( ... )` after `if`, kept as raw token text.
    fn parse_condition(&mut self) -> Result<String, ParseError> {
        self.expect("(")?;
        let mut parts = Vec::new();
        let mut depth = 1usize;
        loop {
            let token = self.next_token("')'")?;
            if token.is("(") {
                depth += 1;
            } else if token.is(")") {
                depth -= 1;
                if depth == 0 {
                    if parts.is_empty() {
                        return Err(ParseError::unexpected("condition", &token));
                    }
                    break;
                }
            }
            parts.push(token.text);
        }
        Ok(parts.join(" "))
    }

    fn parse_field_value(&mut self) -> Result<FieldValue, ParseError> {
        let token = self.next_token("field value")?;
        if let Some(n) = parse_integer(&token.text) {
            return Ok(FieldValue::Integer(n));
        }
        if SPECIAL_SEQUENCES.contains(&token.text.as_str()) {
            return Err(ParseError::unexpected("field value", &token));
        }
        Ok(FieldValue::Identifier(token.text))
    }

    /// One of the ten integer type keywords, matched case-insensitively.
    pub fn parse_integer_type(&mut self) -> Result<IntegerType, ParseError> {
        let token = self.next_token("integer type")?;
        IntegerType::lookup(&token.text).ok_or_else(|| ParseError::invalid_type("integer type", &token))
    }

    // ===== Cursor helpers =====

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn check(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is(text))
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    /// End-of-input error positioned just past the last token.
    pub(crate) fn eof(&self, expected: impl Into<String>) -> ParseError {
        let (line, column) = self
            .tokens
            .last()
            .map_or((1, 1), |t| (t.line, t.column + t.text.chars().count()));
        ParseError::UnexpectedEof {
            expected: expected.into(),
            line,
            column,
        }
    }

    /// Consume and return the next token, whatever it is.
    pub(crate) fn next_token(&mut self, expected: &str) -> Result<Token, ParseError> {
        let token = self.peek().cloned().ok_or_else(|| self.eof(expected))?;
        self.advance();
        Ok(token)
    }

    /// Consume the next token if it is exactly `text`.
    pub(crate) fn expect(&mut self, text: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t.is(text) => {
                self.advance();
                Ok(())
            }
            Some(t) => Err(ParseError::unexpected(format!("'{}'", text), t)),
            None => Err(self.eof(format!("'{}'", text))),
        }
    }

    /// Unsigned integer literal (lengths).
    pub(crate) fn expect_length(&mut self, expected: &str) -> Result<usize, ParseError> {
        let token = self.next_token(expected)?;
        parse_integer(&token.text)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| ParseError::invalid_literal(&token))
    }

    /// The single rule deciding how `{ ... }` entries are delimited.
    fn field_separator(&mut self) -> Result<(), ParseError> {
        match self.options.separator {
            FieldSeparator::Whitespace => Ok(()),
            FieldSeparator::Comma => match self.peek() {
                Some(t) if t.is(",") => {
                    self.advance();
                    Ok(())
                }
                Some(t) if t.is("}") => Ok(()),
                Some(t) => Err(ParseError::unexpected("',' or '}'", t)),
                None => Err(self.eof("',' or '}'")),
            },
        }
    }
}

/// Integer literal with optional sign and `0x`/`0o`/`0b` prefix.
pub fn parse_integer(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") | Some("0O") => (8, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}
