use serde::{Deserialize, Deserializer};

/// Оставляет в почтовом индексе только цифры ("12345-678" -> "12345678")
pub fn normalize_postcode(postcode: &str) -> String {
    postcode.chars().filter(char::is_ascii_digit).collect()
}

/// Приводит отрицательные и нечисловые значения к нулю
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0. {
        value
    } else {
        0.
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Число из JSON-числа или строки. `null`, пустые и нечисловые строки дают 0
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(s)) => s.trim().parse().unwrap_or(0.),
        None => 0.,
    })
}

/// Число из JSON-числа или строки. Нечисловая строка считается ошибкой формата
pub fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
    }
}
