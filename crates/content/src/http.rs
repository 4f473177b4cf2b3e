use std::time::Duration;

use agrolead_shared::Result;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::{ContentQuery, ContentSource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpContentConfig {
    pub base_url: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<Value>,
}

/// Queries the CMS HTTP API.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: reqwest::Client,
    config: HttpContentConfig,
}

impl HttpContentSource {
    pub fn new(config: HttpContentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { client, config })
    }

    /// `{base_url}/v{api_version}/data/query/{dataset}?query=..&$name=<json>`
    pub fn query_url(&self, query: &ContentQuery) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let version = self.config.api_version.trim_start_matches('v');
        let raw = format!("{base}/v{version}/data/query/{}", self.config.dataset);
        let mut url = Url::parse(&raw).map_err(anyhow::Error::from)?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.query);
            for (name, value) in &query.params {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpContentSource {
    #[tracing::instrument(skip_all, fields(dataset = %self.config.dataset))]
    async fn fetch(&self, query: &ContentQuery) -> Result<Option<Value>> {
        let url = self.query_url(query)?;
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            agrolead_shared::bail!("content query failed with status {status}");
        }

        let body: QueryResponse = response.json().await?;
        Ok(body.result.filter(|v| !v.is_null()))
    }
}
