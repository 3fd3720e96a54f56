//! Single-pass parser for unit expressions.
//!
//! The input is scanned left to right by a small state machine. Unit
//! names are either runs of identifier characters or bracketed
//! (possibly nested) `[...]` forms, and may be followed by an exponent
//! `p` or `p:r`, written with ASCII digits (optionally after `^`) or
//! with superscript digits. HTML markup `<...>` and character
//! references `&...;` are skipped, so that the HTML rendering parses
//! back to the same unit.
//!
//! Every `/` toggles inversion for all factors which follow it. That
//! is, `s/s/s` is `s · s⁻¹ · s`.

use super::UnitFormat;
use super::superscript;
use crate::parsing::source::{SourceOffset, Span};
use crate::units::error::UnitParseError;
use crate::units::unit::Unit;

use std::ops::Range;

/// Characters which separate factors without any other effect.
const SEPARATORS: &[char] = &['·', '⋅', '*', '(', ')'];

/// Characters which may never appear in a unit name.
const RESERVED: &[char] = &['·', '⋅', '*', '/', '^', ':', '(', ')', '[', ']', '<', '>', '&'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Default,
  /// Inside a bracketed name, at the given nesting depth.
  SystemName { depth: usize },
  Name,
  Exponent,
  Markup,
  Escape,
}

/// Whether the character just examined was used up, or must be looked
/// at again in the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
  Consume,
  Reprocess,
}

#[derive(Debug, Clone)]
struct Token {
  /// Position of the first character, counted in characters.
  offset: SourceOffset,
  /// Byte span of the name alone.
  name: Span,
  /// Byte offset one past the last character of the token, exponent
  /// included.
  end: usize,
  /// The exponent text as written, if an exponent was started.
  exponent: Option<String>,
}

#[derive(Debug)]
struct Parser<'a> {
  format: &'a UnitFormat,
  text: &'a str,
  state: State,
  /// The state to return to after markup or an escape sequence.
  resume: State,
  is_inverse: bool,
  token: Option<Token>,
  result: Unit,
}

pub(crate) fn is_exponent_char(c: char) -> bool {
  c.is_ascii_digit() || c == '-' || c == '+' || superscript::is_superscript(c)
}

pub(crate) fn is_identifier_char(c: char) -> bool {
  !(c.is_whitespace() || is_exponent_char(c) || RESERVED.contains(&c))
}

fn is_separator(c: char) -> bool {
  c.is_whitespace() || SEPARATORS.contains(&c)
}

pub(crate) fn parse(format: &UnitFormat, text: &str) -> Result<Unit, UnitParseError> {
  let mut parser = Parser {
    format,
    text,
    state: State::Default,
    resume: State::Default,
    is_inverse: false,
    token: None,
    result: Unit::one(),
  };
  let chars: Vec<(usize, char)> = text.char_indices().collect();
  let mut index = 0;
  while let Some(&(byte, c)) = chars.get(index) {
    if parser.step(SourceOffset(index), byte, c)? == Step::Consume {
      index += 1;
    }
  }
  parser.finish()
}

/// Parses `p` or `p:r`.
fn parse_exponent(exponent: &str) -> Option<(i32, i32)> {
  match exponent.split_once(':') {
    None => Some((exponent.parse().ok()?, 1)),
    Some((pow, root)) => Some((pow.parse().ok()?, root.parse().ok()?)),
  }
}

impl<'a> Parser<'a> {
  fn step(&mut self, offset: SourceOffset, byte: usize, c: char) -> Result<Step, UnitParseError> {
    match self.state {
      State::Default => self.step_default(offset, byte, c),
      State::SystemName { depth } => {
        let depth = match c {
          '[' => depth + 1,
          ']' => depth - 1,
          _ => depth,
        };
        self.extend_name(byte, c);
        self.state = if depth == 0 { State::Default } else { State::SystemName { depth } };
        Ok(Step::Consume)
      }
      State::Name => {
        if is_identifier_char(c) {
          self.extend_name(byte, c);
          Ok(Step::Consume)
        } else {
          self.state = State::Default;
          Ok(Step::Reprocess)
        }
      }
      State::Exponent => {
        match c {
          '<' => self.enter(State::Markup, State::Exponent),
          '&' => self.enter(State::Escape, State::Exponent),
          c if is_exponent_char(c) || c == ':' => {
            if let Some(token) = &mut self.token {
              token.exponent.get_or_insert_with(String::new).push(c);
              token.end = byte + c.len_utf8();
            }
            Ok(Step::Consume)
          }
          _ => {
            self.state = State::Default;
            Ok(Step::Reprocess)
          }
        }
      }
      State::Markup => {
        if c == '>' {
          self.state = self.resume;
        }
        Ok(Step::Consume)
      }
      State::Escape => {
        if c == ';' {
          self.state = self.resume;
        }
        Ok(Step::Consume)
      }
    }
  }

  fn step_default(&mut self, offset: SourceOffset, byte: usize, c: char) -> Result<Step, UnitParseError> {
    let awaiting_exponent = matches!(&self.token, Some(token) if token.exponent.is_none());
    match c {
      '[' => {
        self.complete_token()?;
        self.start_token(offset, byte);
        self.extend_name(byte, c);
        self.state = State::SystemName { depth: 1 };
        Ok(Step::Consume)
      }
      '<' => self.enter(State::Markup, State::Default),
      '&' => self.enter(State::Escape, State::Default),
      '/' => {
        self.complete_token()?;
        self.is_inverse = !self.is_inverse;
        Ok(Step::Consume)
      }
      '^' if awaiting_exponent => {
        if let Some(token) = &mut self.token {
          token.exponent = Some(String::new());
          token.end = byte + c.len_utf8();
        }
        self.state = State::Exponent;
        Ok(Step::Consume)
      }
      c if is_separator(c) => {
        self.complete_token()?;
        Ok(Step::Consume)
      }
      c if is_exponent_char(c) && awaiting_exponent => {
        self.state = State::Exponent;
        Ok(Step::Reprocess)
      }
      // A bare "1" stands for the dimensionless unit, as in "1/s".
      '1' if self.token.is_none() => Ok(Step::Consume),
      c if is_identifier_char(c) => {
        self.complete_token()?;
        self.start_token(offset, byte);
        self.extend_name(byte, c);
        self.state = State::Name;
        Ok(Step::Consume)
      }
      _ => Err(UnitParseError::new(c.to_string(), offset)),
    }
  }

  fn enter(&mut self, state: State, resume: State) -> Result<Step, UnitParseError> {
    self.state = state;
    self.resume = resume;
    Ok(Step::Consume)
  }

  fn start_token(&mut self, offset: SourceOffset, byte: usize) {
    self.token = Some(Token {
      offset,
      name: Span::new(SourceOffset(byte), SourceOffset(byte)),
      end: byte,
      exponent: None,
    });
  }

  fn extend_name(&mut self, byte: usize, c: char) {
    if let Some(token) = &mut self.token {
      token.name.end = SourceOffset(byte + c.len_utf8());
      token.end = token.name.end.0;
    }
  }

  /// Resolves the pending token, if any, and folds it into the result.
  fn complete_token(&mut self) -> Result<(), UnitParseError> {
    let Some(token) = self.token.take() else {
      return Ok(());
    };
    let text = self.text;
    let name = &text[Range::from(token.name)];
    let raw = &text[token.name.start.0..token.end];
    let unit = self.format.unit_for(name)
      .ok_or_else(|| UnitParseError::new(name, token.offset))?;
    let error = || UnitParseError::new(raw, token.offset);
    let (pow, root) = match &token.exponent {
      None => (1, 1),
      Some(exponent) => parse_exponent(&superscript::normalize(exponent)).ok_or_else(error)?,
    };
    let result = unit.checked_pow(pow)
      .and_then(|unit| unit.root(root))
      .and_then(|unit| {
        if self.is_inverse {
          self.result.checked_divide(unit)
        } else {
          self.result.checked_multiply(unit)
        }
      });
    self.result = result.map_err(|_| error())?;
    Ok(())
  }

  fn finish(mut self) -> Result<Unit, UnitParseError> {
    if let (State::SystemName { .. }, Some(token)) = (self.state, &self.token) {
      return Err(UnitParseError::new(&self.text[token.name.start.0..], token.offset));
    }
    self.complete_token()?;
    Ok(self.result)
  }
}
