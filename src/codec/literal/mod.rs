// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive-descent parser for permissive collection literals.
//!
//! ```text
//! input   := expr_list EOF            bare "a, b" at top level is a tuple
//! expr    := ['+'|'-'] number | string+ | True | False | None | set()
//!          | '[' items ']' | '(' items ')' | '{' items '}' | '{' pairs '}'
//! string  := [rRuU] ('...' | "...")   adjacent strings concatenate
//! number  := 0x[_].. | 0o[_].. | 0b[_].. | digits ['.' digits] [e [+-] digits]
//! ```
//!
//! Newlines are only whitespace inside brackets. Dict keys must be strings and
//! set elements must be hashable (no lists, sets or maps).

use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// Brackets deeper than this are rejected instead of recursing further.
const MAX_DEPTH: usize = 128;

/// Syntax error with the byte offset where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for LiteralError {}

type ParseResult<T> = Result<T, LiteralError>;

/// Parses a complete literal expression.
///
/// # Errors
///
/// Returns a [`LiteralError`] on any syntax error or unsupported construct.
pub fn parse(input: &str) -> ParseResult<Value> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    let value = parser.expr_list()?;
    parser.skip_trailing_ws();
    if parser.pos < input.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    const fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    /// Skips blanks; newlines only count inside brackets.
    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            let skippable = match c {
                ' ' | '\t' | '\x0c' => true,
                '\n' | '\r' => self.depth > 0,
                '\\' if self.rest().starts_with("\\\n") => {
                    self.pos += 1;
                    true
                }
                _ => false,
            };
            if !skippable {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn skip_trailing_ws(&mut self) {
        let trimmed = self.rest().trim_end();
        if trimmed.is_empty() {
            self.pos = self.src.len();
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        Ok(())
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Top level: one expression, or a bare tuple when commas follow.
    fn expr_list(&mut self) -> ParseResult<Value> {
        let first = self.expr()?;
        self.skip_ws();
        if self.peek() != Some(',') {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.eat(',') {
            self.skip_ws();
            if self.rest().trim_end().is_empty() {
                break;
            }
            items.push(self.expr()?);
            self.skip_ws();
        }
        Ok(Value::Tuple(items))
    }

    fn expr(&mut self) -> ParseResult<Value> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('[') => self.list(),
            Some('(') => self.paren(),
            Some('{') => self.brace(),
            Some('\'' | '"') => self.strings(),
            Some('+' | '-') => self.signed_number(),
            Some(c) if c.is_ascii_digit() => self.number(false),
            Some('.') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.number(false)
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.word(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }

    /// Comma-separated items up to `close`, trailing comma allowed.
    ///
    /// Returns the items and whether any comma was seen.
    fn items(&mut self, close: char) -> ParseResult<(Vec<Value>, bool)> {
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Ok((items, saw_comma));
            }
            items.push(self.expr()?);
            self.skip_ws();
            if self.eat(',') {
                saw_comma = true;
                continue;
            }
            self.expect(close)?;
            return Ok((items, saw_comma));
        }
    }

    fn list(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.expect('[')?;
        let (items, _) = self.items(']')?;
        self.leave();
        Ok(Value::List(items))
    }

    fn paren(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.expect('(')?;
        let (mut items, saw_comma) = self.items(')')?;
        self.leave();
        if items.len() == 1 && !saw_comma {
            return Ok(items.remove(0));
        }
        Ok(Value::Tuple(items))
    }

    fn brace(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.expect('{')?;
        self.skip_ws();
        if self.eat('}') {
            self.leave();
            return Ok(Value::Map(BTreeMap::new()));
        }

        let first = self.expr()?;
        self.skip_ws();
        let value = if self.peek() == Some(':') {
            self.dict_rest(first)?
        } else {
            self.set_rest(first)?
        };
        self.leave();
        Ok(value)
    }

    fn dict_rest(&mut self, first_key: Value) -> ParseResult<Value> {
        let mut map = BTreeMap::new();
        let mut key = first_key;
        loop {
            let name = match key {
                Value::Str(name) => name,
                other => {
                    return Err(
                        self.error(format!("dict keys must be strings, not {}", other.kind()))
                    );
                }
            };
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.expr()?;
            map.insert(name, value);

            self.skip_ws();
            if self.eat('}') {
                return Ok(Value::Map(map));
            }
            self.expect(',')?;
            self.skip_ws();
            if self.eat('}') {
                return Ok(Value::Map(map));
            }
            key = self.expr()?;
        }
    }

    fn set_rest(&mut self, first: Value) -> ParseResult<Value> {
        let mut items = vec![first];
        if self.eat(',') {
            let (rest, _) = self.items('}')?;
            items.extend(rest);
        } else {
            self.expect('}')?;
        }

        if let Some(bad) = items.iter().find(|v| !v.is_hashable()) {
            return Err(self.error(format!("unhashable set element: {}", bad.kind())));
        }
        Ok(Value::set(items))
    }

    fn word(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let word = &self.src[start..self.pos];

        if matches!(self.peek(), Some('\'' | '"')) {
            return match word {
                "r" | "R" => self.string_run(true),
                "u" | "U" => self.string_run(false),
                _ => {
                    self.pos = start;
                    Err(self.error(format!("unsupported string prefix '{word}'")))
                }
            };
        }

        match word {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            "set" => self.empty_set_call(start),
            _ => {
                self.pos = start;
                Err(self.error(format!("unknown name '{word}'")))
            }
        }
    }

    /// `set()`, the only spelling of an empty set.
    fn empty_set_call(&mut self, start: usize) -> ParseResult<Value> {
        self.skip_ws();
        if !self.eat('(') {
            self.pos = start;
            return Err(self.error("unknown name 'set'"));
        }
        self.enter()?;
        self.skip_ws();
        self.expect(')')?;
        self.leave();
        Ok(Value::Set(Vec::new()))
    }

    fn strings(&mut self) -> ParseResult<Value> {
        self.string_run(false)
    }

    /// One string (prefix already consumed) plus any adjacent ones.
    fn string_run(&mut self, raw: bool) -> ParseResult<Value> {
        let mut out = self.string_body(raw)?;
        loop {
            let save = self.pos;
            self.skip_ws();
            match self.peek() {
                Some('\'' | '"') => out.push_str(&self.string_body(false)?),
                Some('r' | 'R') if matches!(self.peek_second(), Some('\'' | '"')) => {
                    self.bump();
                    out.push_str(&self.string_body(true)?);
                }
                Some('u' | 'U') if matches!(self.peek_second(), Some('\'' | '"')) => {
                    self.bump();
                    out.push_str(&self.string_body(false)?);
                }
                _ => {
                    self.pos = save;
                    return Ok(Value::Str(out));
                }
            }
        }
    }

    fn string_body(&mut self, raw: bool) -> ParseResult<String> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected string")),
        };

        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error("unterminated string"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\n' | '\r' => return Err(self.error("newline in string")),
                '\\' if raw => {
                    out.push('\\');
                    match self.bump() {
                        Some(next) => out.push(next),
                        None => return Err(self.error("unterminated string")),
                    }
                }
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> ParseResult<()> {
        let Some(c) = self.bump() else {
            return Err(self.error("unterminated string"));
        };
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push(self.code_point(code)?);
            }
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(self.code_point(code)?);
            }
            'u' => {
                let code = self.hex_digits(4)?;
                out.push(self.code_point(code)?);
            }
            'U' => {
                let code = self.hex_digits(8)?;
                out.push(self.code_point(code)?);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_digits(&mut self, count: usize) -> ParseResult<u32> {
        let mut code = 0u32;
        for _ in 0..count {
            let digit = self
                .peek()
                .and_then(|d| d.to_digit(16))
                .ok_or_else(|| self.error(format!("expected {count} hex digits")))?;
            code = code * 16 + digit;
            self.bump();
        }
        Ok(code)
    }

    fn code_point(&self, code: u32) -> ParseResult<char> {
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point {code:#x}")))
    }

    fn signed_number(&mut self) -> ParseResult<Value> {
        let negative = self.bump() == Some('-');
        self.skip_ws();
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.number(negative),
            Some('.') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.number(negative)
            }
            _ => Err(self.error("sign must be followed by a number")),
        }
    }

    fn number(&mut self, negative: bool) -> ParseResult<Value> {
        let start = self.pos;
        let radix = match (self.peek(), self.peek_second()) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let value = if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            // One separator may follow the prefix: 0x_ff
            let digits = digits.strip_prefix('_').unwrap_or(digits);
            let digits = self.strip_underscores(digits, true)?;
            let magnitude = i128::from_str_radix(&digits, radix)
                .map_err(|_| self.error(format!("invalid base-{radix} literal")))?;
            self.int_value(magnitude, negative)?
        } else {
            self.decimal(start, negative)?
        };

        if self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            return Err(self.error("invalid number literal"));
        }
        Ok(value)
    }

    fn decimal(&mut self, start: usize, negative: bool) -> ParseResult<Value> {
        let int_part = self.take_while(|c| c.is_ascii_digit() || c == '_');
        let mut is_float = false;
        let mut text = self.strip_underscores(int_part, true)?;

        if self.eat('.') {
            is_float = true;
            let frac = self.take_while(|c| c.is_ascii_digit() || c == '_');
            text.push('.');
            text.push_str(&self.strip_underscores(frac, true)?);
        }

        if matches!(self.peek(), Some('e' | 'E'))
            && self
                .rest()
                .get(1..)
                .and_then(|r| r.trim_start_matches(['+', '-']).chars().next())
                .is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.bump();
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.bump();
                text.push(sign);
            }
            let exp = self.take_while(|c| c.is_ascii_digit() || c == '_');
            text.push_str(&self.strip_underscores(exp, false)?);
        }

        if is_float {
            let magnitude: f64 = text
                .parse()
                .map_err(|_| self.error("invalid float literal"))?;
            if !magnitude.is_finite() {
                return Err(self.error("float literal out of range"));
            }
            return Ok(Value::Float(if negative { -magnitude } else { magnitude }));
        }

        if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
            self.pos = start;
            return Err(self.error("leading zeros in decimal integer"));
        }
        let magnitude: i128 = text
            .parse()
            .map_err(|_| self.error("integer literal out of range"))?;
        self.int_value(magnitude, negative)
    }

    fn int_value(&self, magnitude: i128, negative: bool) -> ParseResult<Value> {
        let signed = if negative { -magnitude } else { magnitude };
        i64::try_from(signed)
            .map(Value::Int)
            .map_err(|_| self.error("integer literal out of range"))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// Validates `_` separators (only between digits) and removes them.
    fn strip_underscores(&self, digits: &str, allow_empty: bool) -> ParseResult<String> {
        if digits.is_empty() {
            return if allow_empty {
                Ok(String::new())
            } else {
                Err(self.error("missing digits"))
            };
        }
        if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
            return Err(self.error("misplaced '_' in number"));
        }
        Ok(digits.replace('_', ""))
    }
}

#[cfg(test)]
mod tests;
