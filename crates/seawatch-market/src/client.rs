//! HTTP client for the marketplace API.
//!
//! One operation per intent. Every request carries the profile's credential
//! header and the fixed client timeout; a non-2xx response surfaces as an
//! error with the upstream status and body, never retried.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use seawatch_chat::Intent;

use crate::error::MarketError;
use crate::profile::MarketProfile;

/// Parameters for an asset search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub collection_slug: Option<String>,
    pub chain: String,
    pub limit: u32,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, chain: impl Into<String>, limit: u32) -> Self {
        Self {
            query: query.into(),
            collection_slug: None,
            chain: chain.into(),
            limit,
        }
    }

    /// Wire query parameters, in a fixed order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("chain", self.chain.clone()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ref slug) = self.collection_slug {
            params.push(("collection", slug.clone()));
        }
        params
    }
}

/// Marketplace API client over one backend profile.
pub struct MarketClient {
    http: reqwest::Client,
    profile: MarketProfile,
}

impl MarketClient {
    /// Build a client with the profile's credential and a fixed timeout.
    pub fn new(profile: MarketProfile, timeout_secs: u64) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, profile })
    }

    pub fn profile(&self) -> &MarketProfile {
        &self.profile
    }

    /// GET `{base}/collection/{slug}`.
    pub async fn collection_info(&self, slug: &str) -> Result<Value, MarketError> {
        self.get_json(self.profile.collection_url(slug), &[]).await
    }

    /// GET the profile's search route with query parameters.
    pub async fn search(&self, query: &SearchQuery) -> Result<Value, MarketError> {
        self.get_json(self.profile.search_url(), &query.params())
            .await
    }

    /// GET `{base}/wallet/{address}`.
    pub async fn wallet(&self, address: &str) -> Result<Value, MarketError> {
        self.get_json(self.profile.wallet_url(address), &[]).await
    }

    /// GET `{base}/trending`.
    pub async fn trending(&self) -> Result<Value, MarketError> {
        self.get_json(self.profile.trending_url(), &[]).await
    }

    /// Dispatch one classified intent to its marketplace operation.
    ///
    /// `Unknown` never reaches the network; callers render the help message
    /// instead, so it yields `Null` here.
    pub async fn fetch(&self, intent: &Intent) -> Result<Value, MarketError> {
        match intent {
            Intent::CollectionInfo { slug } => self.collection_info(slug).await,
            Intent::Search {
                terms,
                collection_slug,
                chain,
                limit,
            } => {
                let mut query = SearchQuery::new(terms.clone(), chain.clone(), *limit);
                query.collection_slug = collection_slug.clone();
                self.search(&query).await
            }
            Intent::WalletLookup { address } => self.wallet(address).await,
            Intent::Trending => self.trending().await,
            Intent::Unknown => Ok(Value::Null),
        }
    }

    async fn get_json(
        &self,
        url: String,
        params: &[(&'static str, String)],
    ) -> Result<Value, MarketError> {
        debug!(url = %url, "Marketplace request");

        let mut req = self.http.get(&url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let resp = self.profile.apply_auth(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MarketError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}
