use async_trait::async_trait;
use reqwest::{RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::flixlog::models::{QuoteRequest, QuotedRate};

use super::error::{FlixlogError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://freight.flixlog.com/channel-quote/woocommerce";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Источник тарифов по запросу расчёта
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, request: &QuoteRequest, access_token: &str) -> Result<Vec<QuotedRate>>;
}

/// HTTP-клиент сервиса Flixlog
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
}

pub struct ClientBuilder {
    endpoint: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn build(self) -> Result<Client> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(Client {
            http,
            endpoint: self.endpoint,
        })
    }
}

impl Client {
    /// Клиент с адресом и таймаутом по умолчанию
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Отправка HTTP-запроса и десериализация ответа
    async fn send_request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FlixlogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Запрос тарифов. Один POST без повторов
    pub async fn quote(&self, request: &QuoteRequest, access_token: &str) -> Result<Vec<QuotedRate>> {
        debug!(
            from = %request.origin_postcode,
            to = %request.destination_postcode,
            parcels = request.parcels.len(),
            "Запрос тарифов Flixlog"
        );

        let builder = self
            .http
            .post(&self.endpoint)
            .query(&[("token", access_token)])
            .header(AUTHORIZATION, format!("Token {access_token}"))
            .json(request);

        self.send_request(builder).await
    }
}

#[async_trait]
impl QuoteSource for Client {
    async fn quote(&self, request: &QuoteRequest, access_token: &str) -> Result<Vec<QuotedRate>> {
        Client::quote(self, request, access_token).await
    }
}
