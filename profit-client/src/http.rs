//! HTTP client for the ProfitApp backend API

use crate::{
    Ack, ClientConfig, ClientError, ClientResult, ExportFormat, Grouping, NewRecord, RangeSummary,
    RecordRow, RecordsResponse, Summary,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for making requests against a ProfitApp server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Make a GET request with query parameters
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Map a non-2xx response into an error, extracting the backend's
    /// message when the body carries one
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        let message = extract_error(&text);
        tracing::debug!("request failed with status {status}: {message}");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(Into::into)
    }

    /// Unwrap a write acknowledgement into success or a backend error
    fn check_ack(ack: Ack) -> ClientResult<()> {
        if ack.success {
            Ok(())
        } else {
            Err(ClientError::Backend(
                ack.error.unwrap_or_else(|| "request failed".to_string()),
            ))
        }
    }

    // ========== Summary API ==========

    /// Fetch today's metrics plus all-time totals
    pub async fn summary(&self) -> ClientResult<Summary> {
        self.get("api/summary", &[]).await
    }

    /// Fetch aggregated metrics for a date range
    pub async fn summary_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        group: Grouping,
    ) -> ClientResult<RangeSummary> {
        let mut query = vec![("group", group.as_str().to_string())];
        if let Some(start) = start {
            query.push(("start", start.to_string()));
        }
        if let Some(end) = end {
            query.push(("end", end.to_string()));
        }
        self.get("api/summary_range", &query).await
    }

    // ========== Records API ==========

    /// Fetch the most recent records, newest first
    pub async fn records(&self, limit: u32, days: Option<u32>) -> ClientResult<Vec<RecordRow>> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(days) = days {
            query.push(("days", days.to_string()));
        }
        let response: RecordsResponse = self.get("api/records", &query).await?;
        Ok(response.records)
    }

    /// Fetch raw records for a date range, newest first
    pub async fn records_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ClientResult<Vec<RecordRow>> {
        let mut query = Vec::new();
        if let Some(start) = start {
            query.push(("start", start.to_string()));
        }
        if let Some(end) = end {
            query.push(("end", end.to_string()));
        }
        let response: RecordsResponse = self.get("api/records_range", &query).await?;
        Ok(response.records)
    }

    /// Create a new record
    pub async fn add_record(&self, record: &NewRecord) -> ClientResult<()> {
        let ack: Ack = self.post("api/add_record", record).await?;
        Self::check_ack(ack)
    }

    // ========== Account API ==========

    /// Change a user's plan
    pub async fn change_plan(&self, user_id: i64, plan: &str) -> ClientResult<()> {
        let body = serde_json::json!({ "user_id": user_id, "plan": plan });
        let ack: Ack = self.post("api/change_plan", &body).await?;
        Self::check_ack(ack)
    }

    /// Persist the display language server-side. Fire-and-forget: the
    /// response body (a redirect back to the referrer) is ignored.
    pub async fn set_language(&self, lang: &str) -> ClientResult<()> {
        let response = self
            .client
            .get(self.url("set_lang"))
            .query(&[("lang", lang)])
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    // ========== Export API ==========

    /// Download an export file, returning its raw bytes
    pub async fn export(&self, format: ExportFormat, days: Option<u32>) -> ClientResult<Vec<u8>> {
        let mut query = Vec::new();
        if let Some(days) = days {
            query.push(("days", days.to_string()));
        }
        let response = self
            .client
            .get(self.url(format.path()))
            .query(&query)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Pull the `error` field out of a JSON error body, falling back to the
/// raw text when the body is not the documented `{error: ...}` shape.
fn extract_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_error_prefers_json_error_field() {
        assert_eq!(extract_error(r#"{"error": "Invalid date format"}"#), "Invalid date format");
        assert_eq!(extract_error("plain body"), "plain body");
        assert_eq!(extract_error(r#"{"detail": "x"}"#), r#"{"detail": "x"}"#);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = ClientConfig::new("http://localhost:5000/").build_http_client();
        assert_eq!(client.url("api/summary"), "http://localhost:5000/api/summary");
    }
}
