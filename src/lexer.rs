//! Tokenizer: splits comment-free source into identifier/literal/symbol tokens.
//!
//! The lexer is total. Malformed input still produces tokens; the parser decides
//! whether they make sense.

use std::fmt;

/// Symbols emitted as their own token. Two-character sequences come first so
/// that `==` is never split into `=` `=`.
///
/// `-` is absent on purpose: `-5` stays one token and is read as a negative
/// literal by the parser. `. ; : + * / % ! & | ^ ~` are absent as well and
/// accumulate like identifier characters.
pub const SPECIAL_SEQUENCES: &[&str] = &[
    "==", "!=", "||", "&&", "**", "(", ")", "{", "}", "[", "]", ",", "=",
];

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// A token and where it starts (1-based line and column, counted in chars).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            text: text.into(),
            line,
            column,
        }
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Pending accumulated characters plus the position of the first one.
struct Pending {
    text: String,
    line: usize,
    column: usize,
}

impl Pending {
    fn flush(&mut self, tokens: &mut Vec<Token>) {
        if !self.text.is_empty() {
            tokens.push(Token::new(
                std::mem::take(&mut self.text),
                self.line,
                self.column,
            ));
        }
    }

    fn push(&mut self, c: char, line: usize, column: usize) {
        if self.text.is_empty() {
            self.line = line;
            self.column = column;
        }
        self.text.push(c);
    }
}

/// Tokenize `input` in a single left-to-right scan.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending = Pending {
        text: String::new(),
        line: 1,
        column: 1,
    };
    let mut line = 1usize;
    let mut column = 1usize;
    let mut i = 0usize;

    while i < input.len() {
        let rest = &input[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if is_whitespace(c) {
            pending.flush(&mut tokens);
            i += c.len_utf8();
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            continue;
        }

        if let Some(seq) = SPECIAL_SEQUENCES.iter().find(|s| rest.starts_with(**s)) {
            pending.flush(&mut tokens);
            tokens.push(Token::new(*seq, line, column));
            i += seq.len();
            column += seq.chars().count();
            continue;
        }

        pending.push(c, line, column);
        i += c.len_utf8();
        column += 1;
    }
    pending.flush(&mut tokens);

    tokens
}

/// Token texts only.
#[cfg(test)]
pub(crate) fn token_texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
