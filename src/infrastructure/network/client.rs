use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::error::DirectoryError;
use crate::domain::model::{CashGame, Tournament};
use crate::domain::traits::VenueSource;
use crate::infrastructure::config::Endpoints;

/// Remote directory client. One instance per app, pooled connections.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The casino API takes form-encoded POSTs and answers with XML.
    async fn casino_api(&self, form: &[(&str, &str)]) -> Result<String, DirectoryError> {
        let response = self
            .http
            .post(&self.endpoints.casino_api_url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn json_listing<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Vec<T>, DirectoryError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;
        parse_json_array(&text, what)
    }
}

/// Validate the payload shape (root must be an array), then deserialize
/// record by record: a single bad record is dropped with a warning instead
/// of failing the whole collection.
fn parse_json_array<T: DeserializeOwned>(text: &str, what: &str) -> Result<Vec<T>, DirectoryError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|_| DirectoryError::InvalidFormat(format!("{what} payload is not valid JSON")))?;
    let items = value.as_array().ok_or_else(|| {
        DirectoryError::InvalidFormat(format!("{what} payload root is not an array"))
    })?;
    Ok(items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, what, "dropping malformed record");
                None
            }
        })
        .collect())
}

#[async_trait]
impl VenueSource for ApiClient {
    async fn venues_by_country(&self, country: &str) -> Result<String, DirectoryError> {
        self.casino_api(&[("country", country)]).await
    }

    async fn venue_detail(&self, id: &str) -> Result<String, DirectoryError> {
        self.casino_api(&[("id", id)]).await
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>, DirectoryError> {
        self.json_listing(&self.endpoints.events_url, "tournament")
            .await
    }

    async fn cash_games(&self) -> Result<Vec<CashGame>, DirectoryError> {
        self.json_listing(&self.endpoints.cash_games_url, "cash game")
            .await
    }
}
