//! Расчёт стоимости доставки через сервис Flixlog.
//!
//! Корзина превращается в запрос расчёта, ответ сервиса в варианты доставки,
//! а необязательная формула оператора пересчитывает стоимость каждого варианта.

pub mod config;
pub mod error;
pub mod flixlog;
pub mod formula;
pub mod package;
pub mod shipping;
pub mod util;

pub use error::{Error, Result};
pub use package::{LineItem, Package};
pub use shipping::{MethodSettings, RateOption, ShippingMethod};
