use crate::{error::Result, flixlog::client::DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::OnceLock};

pub const CONFIG_PATH: &str = "Config.toml";

/// Название способа доставки при оформлении заказа по умолчанию
pub const DEFAULT_TITLE: &str = "Flixlog";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Создаёт файл конфигурации по умолчанию, если его нет.
/// Возвращает `true`, если файл был создан
pub fn init_if_not() -> Result<bool> {
    if fs::metadata(CONFIG_PATH).is_ok() {
        return Ok(false);
    }
    fs::write(CONFIG_PATH, DEFAULT_CONFIG_STR.as_bytes())?;
    Ok(true)
}

/// Чтение и разбор конфигурации
pub fn load(path: impl AsRef<Path>) -> Result<Config> {
    let buf = fs::read_to_string(path)?;
    Ok(toml::from_str::<Config>(&buf)?)
}

/// Конфигурация из `Config.toml`, загружается один раз
pub fn get() -> Result<&'static Config> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let cfg = load(CONFIG_PATH)?;
    Ok(CONFIG.get_or_init(|| cfg))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub launch_options: LaunchOptions,
    pub shipping: Shipping,
    #[serde(default)]
    pub flixlog: Flixlog,
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchOptions {
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipping {
    #[serde(default = "default_title")]
    pub title: String,
    pub origin_postcode: String,
    pub access_token: String,
    #[serde(default)]
    pub cost_formula: String,
}

impl Default for Shipping {
    fn default() -> Self {
        Self {
            title: default_title(),
            origin_postcode: String::new(),
            access_token: String::new(),
            cost_formula: String::new(),
        }
    }
}

impl Shipping {
    /// Формула стоимости, если она задана
    pub fn cost_formula(&self) -> Option<String> {
        let formula = self.cost_formula.trim();
        (!formula.is_empty()).then(|| formula.to_string())
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flixlog {
    pub endpoint: String,
    pub timeout_millis: u64,
}

impl Default for Flixlog {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_millis: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub decimal_separators: Vec<String>,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            decimal_separators: vec![",".to_string()],
        }
    }
}

const DEFAULT_CONFIG_STR: &str = r##"
# Параметры запуска
[launch_options]
verbose = false # Вывод запроса и полученных тарифов в консоль (true/false)

# Параметры способа доставки
[shipping]
title = "Flixlog" # Название способа доставки при оформлении заказа
origin_postcode = "" # Индекс склада отправления
access_token = "" # Токен доступа, выданный Flixlog
cost_formula = "" # Формула стоимости, например "[cost] * 1.1 + fee(percent=5, min_fee=2, max_fee=20)"

# Параметры сервиса Flixlog
[flixlog]
endpoint = "https://freight.flixlog.com/channel-quote/woocommerce" # Адрес расчёта стоимости
timeout_millis = 8000 # Таймаут запроса в миллисекундах

# Региональные настройки
[locale]
decimal_separators = [","] # Десятичные разделители, приводимые к точке в формуле
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::MethodSettings;
    use std::time::Duration;

    #[test]
    fn default_config_parses() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_STR).unwrap();

        assert!(!cfg.launch_options.verbose);
        assert_eq!(cfg.shipping.title, DEFAULT_TITLE);
        assert_eq!(cfg.shipping.cost_formula(), None);
        assert_eq!(cfg.flixlog.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.flixlog.timeout_millis, 8000);
        assert_eq!(cfg.locale.decimal_separators, [","]);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [shipping]
            origin_postcode = "12345-678"
            access_token = "secret"
            cost_formula = " [cost] * 2 "
            "#,
        )
        .unwrap();

        let settings = MethodSettings::from(&cfg);
        assert_eq!(settings.title, "Flixlog");
        assert_eq!(settings.origin_postcode, "12345-678");
        assert_eq!(settings.access_token, "secret");
        assert_eq!(settings.cost_formula.as_deref(), Some("[cost] * 2"));
        assert_eq!(settings.timeout, Duration::from_millis(8000));
    }

    #[test]
    fn missing_shipping_section_is_an_error() {
        assert!(toml::from_str::<Config>("[launch_options]\nverbose = true\n").is_err());
    }
}
