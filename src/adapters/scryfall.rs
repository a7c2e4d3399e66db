//! HTTP client for a Scryfall-compatible card catalog.

use crate::domain::model::{CatalogErrorBody, SearchPage, SetList, SourceSet};
use crate::domain::ports::CardCatalog;
use crate::utils::error::{Result, SweepError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";
pub const DEFAULT_USER_AGENT: &str = concat!("card-sweep/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl ScryfallClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        tracing::debug!("Catalog response status: {}", response.status());
        Ok(response)
    }
}

#[async_trait]
impl CardCatalog for ScryfallClient {
    async fn fetch_page(&self, url: &str) -> Result<SearchPage> {
        let response = self.get(url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = upstream_error(status, &body);
            // 查無卡片時上游回 404 not_found，視為空的最後一頁
            if let SweepError::UpstreamError { status: 404, ref code, .. } = error {
                if code == "not_found" {
                    tracing::debug!("No cards match {}, treating as empty page", url);
                    return Ok(SearchPage::empty());
                }
            }
            return Err(error);
        }

        let page: SearchPage = decode(&body)?;
        if page.has_more && page.next_page.is_none() {
            return Err(SweepError::MissingContinuation {
                url: url.to_string(),
            });
        }
        Ok(page)
    }

    async fn fetch_sets(&self) -> Result<Vec<SourceSet>> {
        let url = format!("{}/sets", self.base_url);
        let response = self.get(&url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        let sets: SetList = decode(&body)?;
        Ok(sets.data)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

fn upstream_error(status: StatusCode, body: &str) -> SweepError {
    match serde_json::from_str::<CatalogErrorBody>(body) {
        // 狀態碼以實際 HTTP 回應為準，body 只提供 code/details
        Ok(err) => SweepError::UpstreamError {
            status: status.as_u16(),
            code: err.code,
            details: err.details,
        },
        Err(_) => SweepError::UpstreamError {
            status: status.as_u16(),
            code: format!("http_{}", status.as_u16()),
            details: body.chars().take(200).collect(),
        },
    }
}
