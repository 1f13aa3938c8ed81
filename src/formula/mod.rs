//! Вычисление формулы стоимости доставки.
//!
//! Формула задаётся оператором магазина, например
//! `[cost] * 1.1 + fee(percent=5, min_fee=2, max_fee=20)`.
//! Переменные передаются в каждом вызове через [`Bindings`], поэтому
//! параллельные расчёты не видят значения друг друга.

pub mod error;
pub mod fee;
mod parser;

pub use error::{FormulaError, Result};

/// Символы, обрезаемые в начале выражения. Ведущий `-` сохраняется,
/// чтобы выражение могло начинаться с отрицательного числа
const LEADING_TRIM: &[char] = &['\t', '\n', '\r', '\0', '\x0B', '+', '*', '/'];

/// Символы, обрезаемые в конце выражения
const TRAILING_TRIM: &[char] = &['\t', '\n', '\r', '\0', '\x0B', '+', '-', '*', '/'];

/// Значения `[cost]` и `[qty]` для одного расчёта
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bindings {
    pub cost: f64,
    pub qty: f64,
}

/// Десятичные разделители, которые приводятся к `.`.
/// Запятая распознаётся всегда
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalSeparators(Vec<String>);

impl DecimalSeparators {
    pub fn new<I, S>(separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = separators
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty() && s != ".")
            .collect();
        if !list.iter().any(|s| s == ",") {
            list.push(",".to_string());
        }
        Self(list)
    }

    fn normalize(&self, input: &str) -> String {
        self.0
            .iter()
            .fold(input.to_string(), |acc, sep| acc.replace(sep.as_str(), "."))
    }
}

impl Default for DecimalSeparators {
    fn default() -> Self {
        Self::new([","])
    }
}

/// Вычисляет формулу стоимости. Пустая после нормализации формула даёт 0
pub fn evaluate(expression: &str, bindings: Bindings, separators: &DecimalSeparators) -> Result<f64> {
    let sum = expression
        .replace("[qty]", &format_number(bindings.qty))
        .replace("[cost]", &format_number(bindings.cost));

    let sum = fee::expand(&sum, bindings.cost)?;

    let sum: String = sum.chars().filter(|c| !c.is_whitespace()).collect();
    let sum = separators.normalize(&sum);

    let sum = sum
        .trim_start_matches(LEADING_TRIM)
        .trim_end_matches(TRAILING_TRIM);

    if sum.is_empty() {
        return Ok(0.0);
    }

    parser::evaluate(sum)
}

/// Текстовое представление числа для подстановки в выражение
pub(crate) fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn eval(expression: &str, cost: f64, qty: f64) -> Result<f64> {
        evaluate(expression, Bindings { cost, qty }, &DecimalSeparators::default())
    }

    #[test]
    fn multiplies_cost() {
        let value = eval("[cost]*1.1", 100.0, 1.0).unwrap();
        assert!((value - 110.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_fee_up_to_min_fee() {
        assert_eq!(eval("fee(percent=10,min_fee=20)", 100.0, 1.0).unwrap(), 20.0);
    }

    #[test]
    fn clamps_fee_down_to_max_fee() {
        assert_eq!(eval("fee(percent=10,max_fee=5)", 100.0, 1.0).unwrap(), 5.0);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("+")]
    #[case("*/-")]
    fn empty_expression_is_zero(#[case] expression: &str) {
        assert_eq!(eval(expression, 0.0, 0.0).unwrap(), 0.0);
    }

    #[rstest]
    #[case("[cost] * 1.1 + fee(percent=5, min_fee=2, max_fee=20)", 200.0, 1.0, 230.0)]
    #[case("10 + [qty] * 2", 0.0, 3.0, 16.0)]
    #[case("[cost] + [fee percent=\"10\" max_fee=\"4\"]", 50.0, 1.0, 54.0)]
    #[case("2,5 * [qty]", 0.0, 2.0, 5.0)]
    #[case("-5 + [cost]", 10.0, 0.0, 5.0)]
    #[case("+[cost]*2-", 10.0, 0.0, 20.0)]
    #[case("*[cost]/", 10.0, 0.0, 10.0)]
    #[case("[cost]", -3.0, 0.0, -3.0)]
    fn evaluates_operator_formulas(
        #[case] expression: &str,
        #[case] cost: f64,
        #[case] qty: f64,
        #[case] expected: f64,
    ) {
        let value = eval(expression, cost, qty).unwrap();
        assert!((value - expected).abs() < 1e-9, "{expression} = {value}");
    }

    #[test]
    fn normalizes_configured_decimal_separator() {
        let separators = DecimalSeparators::new(["·"]);
        let bindings = Bindings { cost: 0.0, qty: 0.0 };
        assert_eq!(evaluate("1·5*2", bindings, &separators).unwrap(), 3.0);
        assert_eq!(evaluate("1,5*2", bindings, &separators).unwrap(), 3.0);
    }

    #[rstest]
    #[case("[cost]/0")]
    #[case("([cost]")]
    #[case("[cost]*abc")]
    #[case("[weight]")]
    fn rejects_invalid_expressions(#[case] expression: &str) {
        assert!(eval(expression, 10.0, 1.0).is_err());
    }

    #[test]
    fn reports_non_ascii_character_in_error() {
        assert_eq!(
            eval("[cost]×2", 10.0, 1.0).unwrap_err(),
            FormulaError::UnexpectedChar { ch: '×', pos: 2 }
        );
    }

    #[test]
    fn concurrent_evaluations_keep_their_own_bindings() {
        let handles: Vec<_> = (1..=16)
            .map(|i| {
                std::thread::spawn(move || {
                    let cost = f64::from(i) * 100.0;
                    let value = eval("fee(percent=10)", cost, 1.0).unwrap();
                    (cost, value)
                })
            })
            .collect();

        for handle in handles {
            let (cost, value) = handle.join().unwrap();
            assert!((value - cost / 10.0).abs() < 1e-9);
        }
    }
}
