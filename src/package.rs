//! Корзина покупателя, переданная на расчёт доставки.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::util::lenient_f64;

/// Содержимое корзины и адрес доставки
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    #[serde(rename = "destinationPostcode")]
    pub destination_postcode: String,

    pub items: Vec<LineItem>,
}

/// Позиция корзины. Размеры в сантиметрах, вес в килограммах
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default, rename = "heightCm", deserialize_with = "lenient_f64")]
    pub height_cm: f64,

    #[serde(default, rename = "widthCm", deserialize_with = "lenient_f64")]
    pub width_cm: f64,

    #[serde(default, rename = "lengthCm", deserialize_with = "lenient_f64")]
    pub length_cm: f64,

    #[serde(default, rename = "weightKg", deserialize_with = "lenient_f64")]
    pub weight_kg: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,

    #[serde(default, rename = "unitPrice", deserialize_with = "lenient_f64")]
    pub unit_price: f64,

    #[serde(default, rename = "shippingClass")]
    pub shipping_class: String,

    #[serde(default = "default_requires_shipping", rename = "requiresShipping")]
    pub requires_shipping: bool,
}

fn default_requires_shipping() -> bool {
    true
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            sku: None,
            height_cm: 0.,
            width_cm: 0.,
            length_cm: 0.,
            weight_kg: 0.,
            quantity: 0.,
            unit_price: 0.,
            shipping_class: String::new(),
            requires_shipping: true,
        }
    }
}

impl Package {
    /// Позиции, требующие физической доставки, в порядке корзины
    pub fn shippable_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.requires_shipping)
    }
}

/// Общее количество физических товаров. Позиции с неположительным
/// количеством не учитываются, сумма ограничена `u64::MAX`
pub fn total_shippable_quantity(package: &Package) -> u64 {
    package
        .shippable_items()
        .filter(|item| item.quantity.is_finite() && item.quantity > 0.)
        .map(|item| item.quantity.trunc() as u64)
        .fold(0u64, u64::saturating_add)
}

/// Группировка физических товаров по классу доставки.
/// Пустая строка означает класс по умолчанию
pub fn group_by_shipping_class(package: &Package) -> HashMap<String, Vec<&LineItem>> {
    let mut classes: HashMap<String, Vec<&LineItem>> = HashMap::new();

    for item in package.shippable_items() {
        classes
            .entry(item.shipping_class.clone())
            .or_default()
            .push(item);
    }

    classes
}
