use crate::dates::normalize;
use crate::errors::ApiError;
use crate::models::{KeywordStat, Paper, SubscribeRequest};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PapersQuery {
    pub limit: u32,
    pub breakthrough_only: bool,
    pub target_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostResponse {
    pub ok: bool,
    pub status: u16,
    pub json: Value,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base: base.into(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base, path);
        debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Non-success statuses are returned, not raised; the caller decides
    /// what they mean.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<PostResponse, ApiError> {
        let url = format!("{}{}", self.base, path);
        debug!("POST {url}");
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok(PostResponse {
            ok: status.is_success(),
            status: status.as_u16(),
            json,
        })
    }

    pub async fn papers(&self, query: &PapersQuery) -> Result<Vec<Paper>, ApiError> {
        self.get_json(&papers_query(query)).await
    }

    pub async fn calendar(&self) -> Result<Vec<Option<String>>, ApiError> {
        self.get_json("/papers/calendar").await
    }

    pub async fn keyword_stats(&self) -> Result<Vec<KeywordStat>, ApiError> {
        self.get_json("/keywords/stats").await
    }

    pub async fn subscribe(&self, email: &str) -> Result<PostResponse, ApiError> {
        self.post_json("/subscribers", &SubscribeRequest { email })
            .await
    }
}

/// Builds `/papers?...` with parameters in a fixed order: limit,
/// breakthrough_only, target_date.
pub fn papers_query(query: &PapersQuery) -> String {
    let mut path = format!("/papers?limit={}", query.limit);
    if query.breakthrough_only {
        path.push_str("&breakthrough_only=true");
    }
    if let Some(date) = normalize(query.target_date.as_deref()) {
        path.push_str("&target_date=");
        path.push_str(&urlencoding::encode(&date));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn papers_query_always_has_limit() {
        let path = papers_query(&PapersQuery {
            limit: 12,
            ..Default::default()
        });
        assert_eq!(path, "/papers?limit=12");
    }

    #[test]
    fn papers_query_keeps_parameter_order() {
        let path = papers_query(&PapersQuery {
            limit: 6,
            breakthrough_only: true,
            target_date: Some("2024-05-01T08:00:00Z".into()),
        });
        assert_eq!(
            path,
            "/papers?limit=6&breakthrough_only=true&target_date=2024-05-01"
        );
    }

    #[test]
    fn papers_query_skips_blank_date() {
        let path = papers_query(&PapersQuery {
            limit: 12,
            breakthrough_only: false,
            target_date: Some("  ".into()),
        });
        assert_eq!(path, "/papers?limit=12");
    }
}
