//! Способ доставки для оформления заказа.

pub mod method;
pub mod rate;

pub use method::{METHOD_ID, MethodSettings, ShippingMethod};
pub use rate::{RateMetadata, RateOption};
