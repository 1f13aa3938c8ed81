use serde::{Deserialize, Serialize};

use crate::flixlog::models::QuotedRate;

pub const LABEL_PREFIX: &str = "Flixlog";

/// Вариант доставки для корзины
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOption {
    pub id: String,
    pub label: String,
    pub cost: f64,
    pub metadata: RateMetadata,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateMetadata {
    pub carrier: String,
    pub delivery_days: i64,
    pub expedition_time: serde_json::Value,
    pub region: String,
    pub cubed_weight: String,
}

impl From<QuotedRate> for RateOption {
    fn from(rate: QuotedRate) -> Self {
        let carrier = rate.carrier_canonical_name.to_uppercase();

        Self {
            id: format!("{}:{}", rate.carrier_canonical_name, rate.region),
            label: format!("{LABEL_PREFIX} - {carrier}"),
            cost: rate.estimated_cost,
            metadata: RateMetadata {
                carrier,
                delivery_days: rate.delivery_days,
                expedition_time: rate.expedition_time,
                region: rate.region,
                cubed_weight: format!("{}kg", rate.cubed_weight),
            },
        }
    }
}

/// Варианты доставки из тарифов. Повторный id заменяет предыдущий вариант на его месте
pub fn to_options(rates: Vec<QuotedRate>) -> Vec<RateOption> {
    let mut options: Vec<RateOption> = Vec::with_capacity(rates.len());

    for option in rates.into_iter().map(RateOption::from) {
        match options.iter_mut().find(|o| o.id == option.id) {
            Some(existing) => *existing = option,
            None => options.push(option),
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rate(carrier: &str, region: &str, cost: f64) -> QuotedRate {
        QuotedRate {
            carrier_canonical_name: carrier.into(),
            region: region.into(),
            estimated_cost: cost,
            delivery_days: 3,
            expedition_time: json!(1),
            cubed_weight: 5.,
        }
    }

    #[test]
    fn maps_quoted_rate() {
        let option = RateOption::from(rate("abc", "SE", 42.));

        assert_eq!(option.id, "abc:SE");
        assert_eq!(option.label, "Flixlog - ABC");
        assert_eq!(option.cost, 42.);
        assert_eq!(
            option.metadata,
            RateMetadata {
                carrier: "ABC".into(),
                delivery_days: 3,
                expedition_time: json!(1),
                region: "SE".into(),
                cubed_weight: "5kg".into(),
            }
        );
    }

    #[test]
    fn fractional_cubed_weight_keeps_decimals() {
        let mut quoted = rate("jadlog", "S", 10.);
        quoted.cubed_weight = 2.35;
        assert_eq!(RateOption::from(quoted).metadata.cubed_weight, "2.35kg");
    }

    #[test]
    fn later_duplicate_replaces_earlier_in_place() {
        let options = to_options(vec![
            rate("abc", "SE", 42.),
            rate("xyz", "SE", 30.),
            rate("abc", "SE", 40.),
            rate("abc", "NE", 50.),
        ]);

        let summary: Vec<_> = options.iter().map(|o| (o.id.as_str(), o.cost)).collect();
        assert_eq!(summary, [("abc:SE", 40.), ("xyz:SE", 30.), ("abc:NE", 50.)]);
    }
}
