use crate::charset::{IdentifierPolicy, is_whitespace};
use codespan::Span;

/// Forward-only cursor over the bytes of a single line.
pub struct Stream<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Stream<'a> {
    pub fn new(input: &'a str) -> Self {
        Stream { input, position: 0 }
    }

    pub fn pos(&self) -> usize {
        self.position
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.position += 1;
        }
    }

    /// Consumes the longest run of identifier bytes. An empty result leaves
    /// the cursor where it was.
    pub fn identifier(&mut self, policy: IdentifierPolicy) -> Token<'a> {
        let start = self.position;
        while self.peek().is_some_and(|c| policy.is_identifier_char(c)) {
            self.position += 1;
        }

        Token {
            lexeme: &self.input[start..self.position],
            span: Span::new(start, self.position),
        }
    }
}

/// A slice of the line plus its line-relative span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub lexeme: &'a str,
    pub span: Span,
}

impl Token<'_> {
    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }
}
