//! Homework status API client.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::PollError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Anything that can produce a raw status snapshot for a cursor.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch statuses changed since `cursor`. `None` means "now".
    async fn fetch(&self, cursor: Option<i64>) -> Result<Value, PollError>;
}

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, cursor: Option<i64>) -> Result<Value, PollError> {
        let from_date = cursor.unwrap_or_else(|| chrono::Utc::now().timestamp());
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("from_date", from_date)])
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .send()
            .await
            .map_err(|e| PollError::EndpointUnreachable {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(PollError::EndpointHttp {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                from_date,
            });
        }

        resp.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                PollError::ResponseShape(format!("body is not valid JSON: {}", e))
            } else {
                PollError::EndpointUnreachable {
                    endpoint: self.endpoint.clone(),
                    reason: e.to_string(),
                }
            }
        })
    }
}
