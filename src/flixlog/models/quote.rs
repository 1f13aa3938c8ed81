use serde::{Deserialize, Serialize};

/// Тело запроса расчёта стоимости
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "from")]
    pub origin_postcode: String,

    #[serde(rename = "to")]
    pub destination_postcode: String,

    pub parcels: Vec<Parcel>,
}

/// Одно место отправления. Размеры в метрах, вес в килограммах
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub reference: String,

    #[serde(rename = "height")]
    pub height_m: f64,

    #[serde(rename = "weight")]
    pub weight_kg: f64,

    pub quantity: f64,

    #[serde(rename = "width")]
    pub width_m: f64,

    #[serde(rename = "length")]
    pub length_m: f64,

    pub cargo_value: f64,
}
