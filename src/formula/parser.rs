//! Арифметика над нормализованной строкой: числа, `+ - * / ^`, скобки и унарный минус.
//!
//! Приоритет от низшего к высшему: `+ -`, `* /`, унарный минус, `^`.
//! `+ - * /` левоассоциативны, `^` правоассоциативна, поэтому `-2^2 = -4`,
//! а `2^-1 = 0.5`.

use super::error::{FormulaError, Result};

/// Вычисляет выражение без пробелов и подстановок
pub fn evaluate(input: &str) -> Result<f64> {
    let mut parser = Parser {
        src: input,
        pos: 0,
    };
    let value = parser.expr()?;

    if let Some(b) = parser.peek() {
        return Err(if b == b')' {
            FormulaError::UnbalancedParens
        } else {
            parser.unexpected()
        });
    }

    finite(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Позиция всегда на границе символа: разбор продвигается только по ASCII
    fn unexpected(&self) -> FormulaError {
        match self.src[self.pos..].chars().next() {
            Some(ch) => FormulaError::UnexpectedChar { ch, pos: self.pos },
            None => FormulaError::UnexpectedEnd,
        }
    }

    fn expr(&mut self) -> Result<f64> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    acc *= self.unary()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    acc /= divisor;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> Result<f64> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.power()
    }

    fn power(&mut self) -> Result<f64> {
        let base = self.primary()?;
        if self.peek() == Some(b'^') {
            self.pos += 1;
            let exponent = self.unary()?;
            return finite(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.expr()?;
                match self.peek() {
                    Some(b')') => {
                        self.pos += 1;
                        Ok(value)
                    }
                    None => Err(FormulaError::UnbalancedParens),
                    Some(_) => Err(self.unexpected()),
                }
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            _ => Err(self.unexpected()),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        let mut seen_dot = false;
        let mut seen_digit = false;

        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.pos += 1;
        }

        if !seen_digit {
            self.pos = start;
            return Err(self.unexpected());
        }

        self.src[start..self.pos]
            .parse::<f64>()
            .map_err(|_| FormulaError::UnexpectedChar {
                ch: self.src[start..].chars().next().unwrap_or('.'),
                pos: start,
            })
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::NonFinite)
    }
}
