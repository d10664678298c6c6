//! REST collaborator for the `/companies` resource.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::model::Company;

/// Persistence operations the shell needs from the backend
#[async_trait]
pub trait CompanyApi: Send + Sync {
    /// `GET /companies`
    async fn list(&self) -> Result<Vec<Company>, ApiError>;

    /// `POST /companies` with the body stripped of `id`.
    ///
    /// Returns the stored record when the backend echoes it.
    async fn create(&self, company: &Company) -> Result<Option<Company>, ApiError>;

    /// `PUT /companies/{id}` with the full body
    async fn update(&self, company: &Company) -> Result<Option<Company>, ApiError>;

    /// `DELETE /companies/{id}`
    async fn delete(&self, id: u64) -> Result<(), ApiError>;
}

/// [`CompanyApi`] over HTTP using reqwest
#[derive(Debug, Clone)]
pub struct HttpCompanyApi {
    client: Client,
    base_url: String,
}

impl HttpCompanyApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::request(base_url.clone(), e))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/companies", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/companies/{}", self.base_url, id)
    }
}

/// Map non-success statuses to [`ApiError::Status`] and return the body text
async fn read_body(method: &'static str, url: &str, response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::request(url, e))?;

    if status.is_success() {
        Ok(body)
    } else {
        warn!(method, url, status = status.as_u16(), "request failed");
        Err(ApiError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

/// Parse an optional echoed record; empty or foreign bodies are ignored
fn parse_echo<T: DeserializeOwned>(body: &str) -> Option<T> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

#[async_trait]
impl CompanyApi for HttpCompanyApi {
    async fn list(&self) -> Result<Vec<Company>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "listing companies");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e))?;

        let text = read_body("GET", &url, response).await?;
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { url, source })
    }

    async fn create(&self, company: &Company) -> Result<Option<Company>, ApiError> {
        let url = self.collection_url();
        let body = Company {
            id: None,
            ..company.clone()
        };
        debug!(%url, name = %body.name, "creating company");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e))?;

        let text = read_body("POST", &url, response).await?;
        Ok(parse_echo(&text))
    }

    async fn update(&self, company: &Company) -> Result<Option<Company>, ApiError> {
        let id = company.id.ok_or_else(|| ApiError::MissingId {
            name: company.name.clone(),
        })?;
        let url = self.item_url(id);
        debug!(%url, name = %company.name, "updating company");

        let response = self
            .client
            .put(&url)
            .json(company)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e))?;

        let text = read_body("PUT", &url, response).await?;
        Ok(parse_echo(&text))
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!(%url, "deleting company");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e))?;

        read_body("DELETE", &url, response).await?;
        Ok(())
    }
}
