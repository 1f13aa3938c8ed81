use crate::flixlog::FlixlogError;
use crate::formula::FormulaError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as StdIoError;
use std::result::Result as StdResult;
use thiserror::Error as ThisError;
use toml::de::Error as TomlDeError;

pub type Result<T> = StdResult<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("StdIoError: {0:?}")]
    StdIo(#[from] StdIoError),

    #[error("FlixlogError: {0}")]
    Flixlog(#[from] FlixlogError),

    #[error("InvalidExpressionError: {0}")]
    Formula(#[from] FormulaError),

    #[error("TomlDeError: {0}")]
    TomlDe(#[from] TomlDeError),

    #[error("SerdeJsonError: {0}")]
    SerdeJson(#[from] SerdeJsonError),

    #[error("{0}")]
    Custom(String),
}
