//! Раскрытие псевдофункции процентного сбора.
//!
//! Поддерживаются две записи с одинаковым смыслом:
//! `fee(percent=5, min_fee=2, max_fee=20)` и шорткод
//! `[fee percent="5" min_fee="2" max_fee="20"]`.

use super::error::{FormulaError, Result};
use super::format_number;

/// Аргументы сбора. Пустое значение и `0` считаются отсутствующими
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FeeArgs {
    pub percent: Option<f64>,
    pub min_fee: Option<f64>,
    pub max_fee: Option<f64>,
}

impl FeeArgs {
    fn from_pairs(pairs: Vec<(&str, &str)>) -> Result<Self> {
        let mut args = Self::default();

        for (name, value) in pairs {
            // Как в шорткодах: только "" и "0" ложны, "0.0" уже задаёт значение
            let value = match value.trim() {
                "" | "0" => None,
                text => Some(
                    text.parse::<f64>()
                        .map_err(|_| FormulaError::InvalidFee(format!("{name}={text}")))?,
                ),
            };

            match name.trim().to_ascii_lowercase().as_str() {
                "percent" => args.percent = value,
                "min_fee" => args.min_fee = value,
                "max_fee" => args.max_fee = value,
                _ => {}
            }
        }

        Ok(args)
    }

    /// Сумма сбора от `cost` с учётом нижней и верхней границы
    pub fn apply(&self, cost: f64) -> f64 {
        let mut fee = self.percent.map_or(0.0, |p| cost * (p / 100.0));

        if let Some(min) = self.min_fee.filter(|min| fee < *min) {
            fee = min;
        }
        if let Some(max) = self.max_fee.filter(|max| fee > *max) {
            fee = max;
        }

        fee
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Syntax {
    Call,
    Shortcode,
}

impl Syntax {
    fn close(self) -> char {
        match self {
            Syntax::Call => ')',
            Syntax::Shortcode => ']',
        }
    }
}

/// Заменяет каждое вхождение сбора его числовым значением
pub fn expand(input: &str, cost: f64) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some((start, body_start, syntax)) = next_occurrence(rest) {
        out.push_str(&rest[..start]);

        let body_len = rest[body_start..].find(syntax.close()).ok_or_else(|| {
            FormulaError::InvalidFee(format!("missing closing {:?}", syntax.close()))
        })?;
        let body = &rest[body_start..body_start + body_len];

        let pairs = match syntax {
            Syntax::Call => call_pairs(body),
            Syntax::Shortcode => shortcode_pairs(body),
        }?;
        let args = FeeArgs::from_pairs(pairs)?;
        out.push_str(&format_number(args.apply(cost)));

        rest = &rest[body_start + body_len + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// `percent=5, min_fee=2`: пары через запятую
fn call_pairs(body: &str) -> Result<Vec<(&str, &str)>> {
    body.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<(&str, &str)> {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                FormulaError::InvalidFee(format!("expected name=value, got {pair:?}"))
            })?;
            Ok((name.trim(), unquote(value)))
        })
        .collect()
}

/// `percent = "5" min_fee=2`: пары через пробел, вокруг `=` допустимы пробелы,
/// значение может быть в кавычках
fn shortcode_pairs(body: &str) -> Result<Vec<(&str, &str)>> {
    let mut pairs = Vec::new();
    let mut rest = body.trim_start();

    while !rest.is_empty() {
        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let (name, tail) = rest.split_at(name_len);

        let tail = tail
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(|| FormulaError::InvalidFee(format!("expected name=value, got {name:?}")))?
            .trim_start();

        let (value, tail) = match tail.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let inner = &tail[1..];
                let end = inner.find(quote).ok_or_else(|| {
                    FormulaError::InvalidFee(format!("unterminated quote in {name}"))
                })?;
                (&inner[..end], &inner[end + 1..])
            }
            _ => tail.split_at(tail.find(char::is_whitespace).unwrap_or(tail.len())),
        };

        pairs.push((name, value));
        rest = tail.trim_start();
    }

    Ok(pairs)
}

/// Позиция начала вхождения, начало списка аргументов и вид записи
fn next_occurrence(s: &str) -> Option<(usize, usize, Syntax)> {
    let mut from = 0;

    while let Some(offset) = s[from..].find("fee") {
        let at = from + offset;
        let after = &s[at + 3..];
        from = at + 3;

        if s[..at].ends_with('[') && after.starts_with(|c: char| c.is_whitespace() || c == ']') {
            return Some((at - 1, at + 3, Syntax::Shortcode));
        }

        let word_start = !s[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let trimmed = after.trim_start();
        if word_start && trimmed.starts_with('(') {
            let body_start = at + 3 + (after.len() - trimmed.len()) + 1;
            return Some((at, body_start, Syntax::Call));
        }
    }

    None
}
