//! Postal-code → address resolution against a ViaCEP-style service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::Address;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("address lookup request failed")]
    Request(#[from] reqwest::Error),
    #[error("address lookup returned HTTP {0}")]
    Status(StatusCode),
    #[error("failed to deserialize address lookup response")]
    Malformed(#[from] serde_json::Error),
    #[error("postal code {0} not found")]
    NotFound(String),
}

#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Resolve an 8-digit postal code. The caller checks the length.
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError>;
}

/// Shape of the lookup service document. Only the fields we keep are read,
/// and all of them must be present.
#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    cep: String,
    logradouro: String,
    bairro: String,
    localidade: String,
    uf: String,
}

/// The service answers unknown codes with `{"erro": true}` and HTTP 200.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ViaCepResponse {
    NotFound {
        #[allow(dead_code)]
        erro: serde_json::Value,
    },
    Found(ViaCepAddress),
}

impl From<ViaCepAddress> for Address {
    fn from(response: ViaCepAddress) -> Self {
        Address {
            postal_code: response.cep,
            state: response.uf,
            city: response.localidade,
            district: response.bairro,
            street: response.logradouro,
        }
    }
}

#[derive(Clone)]
pub struct ViaCepGateway {
    client: Client,
    base_url: String,
    format: String,
}

impl ViaCepGateway {
    pub fn new(base_url: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            format: format.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.cep_api_url, &config.cep_response_format)
    }

    fn url(&self, postal_code: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            postal_code,
            self.format
        )
    }
}

#[async_trait]
impl AddressLookup for ViaCepGateway {
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        let url = self.url(postal_code);
        debug!("Requesting: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let body = response.text().await?;
        match serde_json::from_str::<ViaCepResponse>(&body)? {
            ViaCepResponse::NotFound { .. } => Err(LookupError::NotFound(postal_code.to_string())),
            ViaCepResponse::Found(found) => {
                let address = Address::from(found);
                debug!("converted response to address: {:?}", address);
                Ok(address)
            }
        }
    }
}
