use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::{Config, DEFAULT_TITLE},
    error::Result,
    flixlog::{Client, ClientBuilder, QuoteSource, client::DEFAULT_TIMEOUT, request},
    formula::{self, Bindings, DecimalSeparators},
    package::{Package, total_shippable_quantity},
    shipping::rate::{self, RateOption},
};

pub const METHOD_ID: &str = "flixlog_shipping_method";

/// Параметры способа доставки, неизменные между расчётами
#[derive(Debug, Clone)]
pub struct MethodSettings {
    pub title: String,
    pub origin_postcode: String,
    pub access_token: String,
    pub cost_formula: Option<String>,
    pub decimal_separators: DecimalSeparators,
    pub timeout: Duration,
}

impl Default for MethodSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            origin_postcode: String::new(),
            access_token: String::new(),
            cost_formula: None,
            decimal_separators: DecimalSeparators::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl From<&Config> for MethodSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            title: cfg.shipping.title.clone(),
            origin_postcode: cfg.shipping.origin_postcode.clone(),
            access_token: cfg.shipping.access_token.clone(),
            cost_formula: cfg.shipping.cost_formula(),
            decimal_separators: DecimalSeparators::new(cfg.locale.decimal_separators.iter().cloned()),
            timeout: Duration::from_millis(cfg.flixlog.timeout_millis),
        }
    }
}

/// Способ доставки Flixlog: запрос тарифов и варианты доставки для корзины
pub struct ShippingMethod<Q = Client> {
    source: Q,
    settings: MethodSettings,
}

impl ShippingMethod<Client> {
    /// Способ доставки с HTTP-клиентом по конфигурации
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let client = ClientBuilder::new()
            .endpoint(&cfg.flixlog.endpoint)
            .timeout(Duration::from_millis(cfg.flixlog.timeout_millis))
            .build()?;
        Ok(Self::new(client, MethodSettings::from(cfg)))
    }
}

impl<Q: QuoteSource> ShippingMethod<Q> {
    pub fn new(source: Q, settings: MethodSettings) -> Self {
        Self { source, settings }
    }

    pub fn id(&self) -> &'static str {
        METHOD_ID
    }

    pub fn title(&self) -> &str {
        &self.settings.title
    }

    pub fn settings(&self) -> &MethodSettings {
        &self.settings
    }

    /// Расчёт с типизированной ошибкой. Пропуск из-за индекса даёт пустой список
    pub async fn try_calculate(&self, package: &Package) -> Result<Vec<RateOption>> {
        let Some(request) = request::build(
            package,
            &self.settings.origin_postcode,
            &package.destination_postcode,
        ) else {
            return Ok(Vec::new());
        };

        let rates = self
            .source
            .quote(&request, &self.settings.access_token)
            .await?;
        let mut options = rate::to_options(rates);

        if let Some(cost_formula) = &self.settings.cost_formula {
            let qty = total_shippable_quantity(package) as f64;
            for option in &mut options {
                let bindings = Bindings {
                    cost: option.cost,
                    qty,
                };
                option.cost =
                    formula::evaluate(cost_formula, bindings, &self.settings.decimal_separators)?;
            }
        }

        debug!(options = options.len(), "Расчёт доставки завершён");
        Ok(options)
    }

    /// Расчёт, который никогда не ломает оформление заказа:
    /// любая ошибка или превышение таймаута дают пустой список
    pub async fn calculate(&self, package: &Package) -> Vec<RateOption> {
        match tokio::time::timeout(self.settings.timeout, self.try_calculate(package)).await {
            Ok(Ok(options)) => options,
            Ok(Err(e)) => {
                warn!(error = %e, "Расчёт доставки не выполнен");
                Vec::new()
            }
            Err(_) => {
                warn!(timeout = ?self.settings.timeout, "Превышено время ожидания расчёта доставки");
                Vec::new()
            }
        }
    }

    /// Расчёт до завершения `cancel`. При отмене запрос прерывается
    /// и возвращается пустой список
    pub async fn calculate_until<F>(&self, package: &Package, cancel: F) -> Vec<RateOption>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            options = self.calculate(package) => options,
            _ = cancel => {
                debug!("Расчёт доставки отменён");
                Vec::new()
            }
        }
    }
}
