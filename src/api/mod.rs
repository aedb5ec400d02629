//! Typed clients for the external HTTP services the terminal talks to.
//!
//! Every service the original wired up ad hoc goes through one request
//! helper here, so the command layer only ever sees `Error::Api` /
//! `Error::Rpc` and one response struct per endpoint.

pub mod markets;
pub mod relayer;
pub mod rpc;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{olog_trace, Error, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP plumbing: one `reqwest::Client`, uniform error mapping.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
    ) -> Result<T> {
        olog_trace!("GET {} ({})", url, service);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| api_error(service, e))?;
        decode(service, response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        body: &B,
    ) -> Result<T> {
        olog_trace!("POST {} ({})", url, service);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| api_error(service, e))?;
        decode(service, response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn decode<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            service,
            message: format!("HTTP {} {}", status.as_u16(), truncate(&body, 120)),
        });
    }
    response.json::<T>().await.map_err(|e| api_error(service, e))
}

fn api_error(service: &'static str, e: reqwest::Error) -> Error {
    Error::Api {
        service,
        message: e.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Error bodies can be HTML or localized text; cut on a char boundary.
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
