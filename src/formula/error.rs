use std::result::Result as StdResult;
use thiserror::Error;

pub type Result<T> = StdResult<T, FormulaError>;

/// Ошибка разбора или вычисления формулы стоимости
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("invalid fee argument: {0}")]
    InvalidFee(String),
}
