//! Recursive-descent parser for LDAP-style filters
//!
//! ```text
//! filter  = "(" ( "&" filter+ | "|" filter+ | "!" filter | item ) ")"
//! item    = key "=" value
//! ```
//!
//! Whitespace is allowed between tokens. Inside a value, `\` escapes the next
//! character.

use super::{Filter, FilterSyntaxError};

pub(super) struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(super) fn parse(mut self) -> Result<Filter, FilterSyntaxError> {
        self.skip_whitespace();
        let filter = self.parse_filter()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(filter)
    }

    fn parse_filter(&mut self) -> Result<Filter, FilterSyntaxError> {
        self.expect('(')?;
        self.skip_whitespace();

        let filter = match self.peek() {
            Some('&') => {
                self.advance();
                Filter::And(self.parse_operands()?)
            }
            Some('|') => {
                self.advance();
                Filter::Or(self.parse_operands()?)
            }
            Some('!') => {
                self.advance();
                self.skip_whitespace();
                Filter::Not(Box::new(self.parse_filter()?))
            }
            Some(_) => self.parse_item()?,
            None => return Err(self.error("unexpected end of filter")),
        };

        self.skip_whitespace();
        self.expect(')')?;
        Ok(filter)
    }

    fn parse_operands(&mut self) -> Result<Vec<Filter>, FilterSyntaxError> {
        let mut operands = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() != Some('(') {
                break;
            }
            operands.push(self.parse_filter()?);
        }
        if operands.is_empty() {
            return Err(self.error("expected at least one operand"));
        }
        Ok(operands)
    }

    fn parse_item(&mut self) -> Result<Filter, FilterSyntaxError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '=' | '<' | '>' | '~' | '(' | ')') {
                break;
            }
            self.advance();
        }
        let key = self.input[start..self.pos].trim();
        if key.is_empty() {
            return Err(self.error("missing attribute name"));
        }

        match self.peek() {
            Some('=') => self.advance(),
            Some('<' | '>' | '~') => return Err(self.error("unsupported comparison operator")),
            _ => return Err(self.error("expected '='")),
        }

        let mut value = String::new();
        while let Some(c) = self.peek() {
            match c {
                ')' => break,
                '(' => return Err(self.error("unescaped '(' in value")),
                '\\' => {
                    self.advance();
                    match self.peek() {
                        Some(escaped) => {
                            value.push(escaped);
                            self.advance();
                        }
                        None => return Err(self.error("dangling escape")),
                    }
                }
                _ => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(Filter::Equals {
            key: key.to_string(),
            value,
        })
    }

    fn expect(&mut self, expected: char) -> Result<(), FilterSyntaxError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{expected}'")))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, reason: &str) -> FilterSyntaxError {
        FilterSyntaxError {
            expression: self.input.to_string(),
            position: self.pos,
            reason: reason.to_string(),
        }
    }
}
