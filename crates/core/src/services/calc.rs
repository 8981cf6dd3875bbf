//! Restricted arithmetic evaluator for the value-entry field.
//!
//! Input is free text from a form ("1500+200", "25000*32.5"). Anything
//! outside digits, whitespace, decimal points and `+ - * / ( )` is
//! stripped before evaluation, so pasted garbage degrades to whatever
//! numerals survive instead of being rejected outright.

use crate::errors::CoreError;

/// Strip every character outside the allowed arithmetic alphabet, then
/// drop dangling trailing operators left behind by the stripping
/// (e.g. `"1500; rm -rf"` → `"1500"`).
#[must_use]
pub fn sanitize(input: &str) -> String {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/.()".contains(*c))
        .collect();

    let mut cleaned = kept.trim_end().to_string();
    while cleaned.ends_with(['+', '-', '*', '/']) {
        cleaned.pop();
        cleaned.truncate(cleaned.trim_end().len());
    }
    cleaned
}

/// Evaluate a value-entry expression.
///
/// Plain numerals parse directly; anything containing an operator goes
/// through the expression parser. Failure or a non-finite result is an
/// error — callers must not create or update a holding from it.
pub fn evaluate(input: &str) -> Result<f64, CoreError> {
    let cleaned = sanitize(input);
    if cleaned.trim().is_empty() {
        return Err(CoreError::InvalidValue(format!(
            "'{input}' contains no evaluable value"
        )));
    }

    let result = if has_operator(&cleaned) {
        Parser::new(&cleaned).parse()?
    } else {
        cleaned
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidValue(format!("'{input}' is not a number")))?
    };

    if !result.is_finite() {
        return Err(CoreError::InvalidValue(format!(
            "'{input}' does not evaluate to a finite number"
        )));
    }
    Ok(result)
}

/// Live preview for the entry field: the evaluated value when the input
/// contains an operator, `None` for plain numerals or invalid input.
#[must_use]
pub fn preview(input: &str) -> Option<f64> {
    if !has_operator(&sanitize(input)) {
        return None;
    }
    evaluate(input).ok()
}

fn has_operator(expr: &str) -> bool {
    expr.contains(['+', '-', '*', '/'])
}

// ── Expression parser ───────────────────────────────────────────────
//
// Recursive descent over the sanitized text:
//   expr   := term (('+' | '-') term)*
//   term   := unary (('*' | '/') unary)*
//   unary  := '-' unary | primary
//   primary := number | '(' expr ')'

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn new(expr: &'a str) -> Self {
        Self {
            chars: expr.chars().peekable(),
        }
    }

    fn parse(mut self) -> Result<f64, CoreError> {
        let value = self.expr()?;
        self.skip_whitespace();
        if let Some(c) = self.chars.peek() {
            return Err(CoreError::InvalidValue(format!(
                "Unexpected '{c}' in expression"
            )));
        }
        Ok(value)
    }

    fn expr(&mut self) -> Result<f64, CoreError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some('+') => {
                    self.chars.next();
                    value += self.term()?;
                }
                Some('-') => {
                    self.chars.next();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, CoreError> {
        let mut value = self.unary()?;
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some('*') => {
                    self.chars.next();
                    value *= self.unary()?;
                }
                Some('/') => {
                    self.chars.next();
                    value /= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, CoreError> {
        self.skip_whitespace();
        if self.chars.peek() == Some(&'-') {
            self.chars.next();
            return Ok(-self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, CoreError> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some('(') => {
                self.chars.next();
                let value = self.expr()?;
                self.skip_whitespace();
                if self.chars.next() != Some(')') {
                    return Err(CoreError::InvalidValue(
                        "Unbalanced parentheses in expression".into(),
                    ));
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || *c == '.' => self.number(),
            Some(c) => Err(CoreError::InvalidValue(format!(
                "Unexpected '{c}' in expression"
            ))),
            None => Err(CoreError::InvalidValue(
                "Expression ended unexpectedly".into(),
            )),
        }
    }

    fn number(&mut self) -> Result<f64, CoreError> {
        let mut text = String::new();
        while let Some(c) = self.chars.peek() {
            if c.is_ascii_digit() || *c == '.' {
                text.push(*c);
                self.chars.next();
            } else {
                break;
            }
        }
        text.parse::<f64>()
            .map_err(|_| CoreError::InvalidValue(format!("'{text}' is not a number")))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }
}
