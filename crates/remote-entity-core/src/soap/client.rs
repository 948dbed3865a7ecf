//! Async client for the SOAP todo endpoint.
//!
//! Mutations never touch a local list. Each successful write is followed by
//! a `getAll` re-fetch, awaited before the call returns, and the fresh list
//! is what the caller renders.

use anyhow::Result;
use reqwest::{header, Client};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::Todo;

use super::envelope::{Operation, CONTENT_TYPE};
use super::error::{Activity, SoapError};
use super::parse::{first_element_text, parse_todos};

/// Client for the todo endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct TodoClient {
    client: Client,
    endpoint: String,
}

impl TodoClient {
    /// Create a client with no request timeout of its own
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::build(endpoint, Client::builder())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Self::build(&config.soap_url, builder)
    }

    fn build(endpoint: &str, builder: reqwest::ClientBuilder) -> Result<Self> {
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    /// POST one envelope and return the response body. Any response counts;
    /// only a missing one is an error.
    async fn call(&self, operation: Operation<'_>, activity: Activity) -> Result<String, SoapError> {
        let network = |source: reqwest::Error| {
            warn!(operation = operation.name(), error = %source, "SOAP call failed");
            SoapError::Network { activity, source }
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(operation.envelope())
            .send()
            .await
            .map_err(&network)?;

        let status = response.status();
        let body = response.text().await.map_err(&network)?;
        debug!(operation = operation.name(), %status, bytes = body.len(), "SOAP response received");

        if let Some(fault) = first_element_text(&body, "faultstring") {
            warn!(operation = operation.name(), fault = %fault, "Server returned a SOAP fault");
        }
        Ok(body)
    }

    /// Fetch the full list
    pub async fn get_all(&self) -> Result<Vec<Todo>, SoapError> {
        let body = self.call(Operation::GetAll, Activity::Loading).await?;
        Ok(parse_todos(&body))
    }

    /// Fetch one item; `None` when the server returns no well-formed item
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Todo>, SoapError> {
        let body = self.call(Operation::GetById { id }, Activity::Loading).await?;
        Ok(parse_todos(&body).into_iter().next())
    }

    /// Create an item, then return the re-fetched list
    pub async fn add(&self, title: &str, completed: bool) -> Result<Vec<Todo>, SoapError> {
        let title = validate_title(title)?;
        self.mutate(Operation::Add { title, completed }, Activity::Saving)
            .await
    }

    /// Replace an item's title and flag, then return the re-fetched list
    pub async fn update(&self, id: i64, title: &str, completed: bool) -> Result<Vec<Todo>, SoapError> {
        let title = validate_title(title)?;
        self.mutate(Operation::Update { id, title, completed }, Activity::Saving)
            .await
    }

    /// Remove an item, then return the re-fetched list
    pub async fn delete(&self, id: i64) -> Result<Vec<Todo>, SoapError> {
        self.mutate(Operation::Delete { id }, Activity::Deleting).await
    }

    async fn mutate(&self, operation: Operation<'_>, activity: Activity) -> Result<Vec<Todo>, SoapError> {
        let body = self.call(operation, activity).await?;
        let ack = first_element_text(&body, "return").unwrap_or_default();
        info!(operation = operation.name(), ack = %ack, "Todo mutation sent");

        self.get_all().await
    }
}

/// Titles are trimmed and must not be empty
fn validate_title(title: &str) -> Result<&str, SoapError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SoapError::Validation("Title cannot be empty".to_string()));
    }
    Ok(title)
}
