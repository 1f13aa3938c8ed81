//! Клиент сервиса расчёта стоимости перевозки Flixlog.

pub mod client;
pub mod error;
pub mod models;
pub mod request;

pub use client::{Client, ClientBuilder, QuoteSource};
pub use error::{FlixlogError, Result};
