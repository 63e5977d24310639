//! # HTTP Fare Source
//!
//! Connector for a JSON fare endpoint.
//!
//! Sends `GET {base_url}/fares` with the query as URL parameters:
//!
//! ```text
//! ?origin=LHR&destination=JFK&date=2024-12-01&adults=1&children=0&infants=0&cabin=economy
//! ```
//!
//! and expects
//!
//! ```json
//! { "currency": "USD", "fares": [ { "price": "189.00", "flight": "BA 117" } ] }
//! ```
//!
//! An empty `fares` array is reported as [`SourceError::NoFares`].

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::{Currency, Price, SourceId};
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{FareQuery, SourceConnector};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wire format of one fare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareRecord {
    /// Total fare for the party.
    pub price: Decimal,
    /// Optional carrier/flight label.
    #[serde(default, alias = "flight_number")]
    pub flight: Option<String>,
}

/// Wire format of a fare search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareResponse {
    /// Currency of every fare in the response.
    pub currency: String,
    /// Fares found, in any order.
    #[serde(default)]
    pub fares: Vec<FareRecord>,
}

/// Connector backed by an HTTP JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpFareSource {
    source_id: SourceId,
    endpoint: String,
    client: HttpClient,
}

impl HttpFareSource {
    /// Creates a connector for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidRequest` if `base_url` is blank and
    /// `SourceError::Internal` if the HTTP client cannot be built.
    pub fn new(source_id: SourceId, base_url: &str, timeout_ms: u64) -> SourceResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(SourceError::invalid_request(format!(
                "source {source_id} has no base URL"
            )));
        }
        Ok(Self {
            source_id,
            endpoint: format!("{base}/fares"),
            client: HttpClient::new(timeout_ms)?,
        })
    }

    /// Returns the fares endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn to_quotes(&self, query: &FareQuery, response: FareResponse) -> SourceResult<Vec<Quote>> {
        if response.fares.is_empty() {
            return Err(SourceError::no_fares(format!("no fares for {query}")));
        }
        let currency = Currency::new(&response.currency)
            .map_err(|e| SourceError::protocol(e.to_string()))?;

        response
            .fares
            .into_iter()
            .map(|fare| {
                let price =
                    Price::from_decimal(fare.price).map_err(|e| SourceError::protocol(e.to_string()))?;
                let quote = Quote::new(
                    query.date(),
                    self.source_id.clone(),
                    query.cabin_class(),
                    price,
                    currency.clone(),
                );
                Ok(match fare.flight {
                    Some(label) => quote.with_label(label),
                    None => quote,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SourceConnector for HttpFareSource {
    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    fn timeout_ms(&self) -> u64 {
        self.client.timeout_ms()
    }

    async fn search(&self, query: &FareQuery) -> SourceResult<Vec<Quote>> {
        let params = [
            ("origin", query.route().origin().to_string()),
            ("destination", query.route().destination().to_string()),
            ("date", query.date().format("%Y-%m-%d").to_string()),
            ("adults", query.passengers().adult_count().to_string()),
            ("children", query.passengers().child_count().to_string()),
            ("infants", query.passengers().infant_count().to_string()),
            ("cabin", query.cabin_class().to_string()),
        ];

        let response: FareResponse = self.client.get_with_params(&self.endpoint, &params).await?;
        tracing::debug!(
            source = %self.source_id,
            date = %query.date(),
            fares = response.fares.len(),
            "received fares"
        );
        self.to_quotes(query, response)
    }
}
