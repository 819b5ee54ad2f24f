//! Type grammar: `primitive | String[N]? | Nbt | List[type, N]`.
//!
//! Alternatives are tried in that order and the first keyword match commits.
//! `List` recurses into the same rule; its depth is capped by
//! [`ParseOptions::max_list_depth`](crate::parser::ParseOptions).

use crate::ast::{PrimitiveType, ValueType};
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse one value type at the cursor.
    pub fn parse_value_type(&mut self) -> Result<ValueType, ParseError> {
        self.parse_value_type_at(0)
    }

    fn parse_value_type_at(&mut self, depth: usize) -> Result<ValueType, ParseError> {
        let token = self.next_token("type")?;

        if let Some(primitive) = PrimitiveType::from_keyword(&token.text) {
            return Ok(ValueType::Primitive(primitive));
        }

        match token.text.as_str() {
            "String" => {
                let mut max_length = None;
                if self.check("[") {
                    self.advance();
                    max_length = Some(self.expect_length("String length")?);
                    self.expect("]")?;
                }
                Ok(ValueType::String { max_length })
            }
            "Nbt" => Ok(ValueType::Nbt),
            "List" => {
                let max = self.options.max_list_depth;
                if depth >= max {
                    return Err(ParseError::NestingTooDeep {
                        max,
                        line: token.line,
                        column: token.column,
                    });
                }
                self.expect("[")?;
                let element = self.parse_value_type_at(depth + 1)?;
                self.expect(",")?;
                let max_length = self.expect_length("List length")?;
                self.expect("]")?;
                Ok(ValueType::List {
                    element: Box::new(element),
                    max_length,
                })
            }
            _ => Err(ParseError::invalid_type("value type", &token)),
        }
    }
}
