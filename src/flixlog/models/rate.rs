use serde::{Deserialize, Serialize};

use crate::util::{lenient_f64, number_or_numeric_string};

/// Тариф перевозчика из ответа сервиса
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedRate {
    pub carrier_canonical_name: String,

    pub region: String,

    #[serde(deserialize_with = "number_or_numeric_string")]
    pub estimated_cost: f64,

    #[serde(default)]
    pub delivery_days: i64,

    #[serde(default)]
    pub expedition_time: serde_json::Value,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub cubed_weight: f64,
}
