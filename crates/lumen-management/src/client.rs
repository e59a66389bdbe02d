// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Management API request execution.

use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ManagementError;
use crate::log_streams::LogStreamManager;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Lumen Management API.
///
/// Holds the HTTP client, API root, and access token shared by all resource
/// managers. The client is stateless beyond its configuration and can be used
/// from multiple tasks concurrently.
#[derive(Debug, Clone)]
pub struct Management {
	http_client: Client,
	base_url: String,
	token: String,
}

/// Structured error body returned by the Management API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	message: Option<String>,
	error: Option<String>,
}

impl Management {
	/// Creates a new Management API client.
	///
	/// `base_url` is the tenant's API root, e.g.
	/// `https://tenant.lumen.dev/api/v2`. `token` is a Management API access
	/// token sent as a bearer credential on every request.
	pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
		let http_client = lumen_common_http::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");

		Self {
			http_client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			token: token.into(),
		}
	}

	/// Access to log stream operations.
	pub fn log_streams(&self) -> LogStreamManager<'_> {
		LogStreamManager::new(self)
	}

	/// Builds a request URI by joining path segments onto the API root.
	fn uri(&self, segments: &[&str]) -> String {
		let mut uri = self.base_url.clone();
		for segment in segments {
			uri.push('/');
			uri.push_str(segment);
		}
		uri
	}

	/// Executes a request against the Management API.
	///
	/// All resource operations funnel through here: the URI is built from
	/// `segments`, the bearer token is attached, and an optional JSON body is
	/// serialized. Non-2xx responses are mapped to structured errors; a 2xx
	/// response is handed back untouched.
	pub(crate) async fn execute<B>(
		&self,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
	) -> Result<Response, ManagementError>
	where
		B: Serialize + ?Sized,
	{
		let uri = self.uri(segments);
		debug!(method = %method, uri = %uri, "Sending management API request");

		let mut request = self
			.http_client
			.request(method, &uri)
			.bearer_auth(&self.token);

		if let Some(body) = body {
			let payload = serde_json::to_vec(body).map_err(ManagementError::Serialization)?;
			request = request
				.header(reqwest::header::CONTENT_TYPE, "application/json")
				.body(payload);
		}

		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				error!("Request timed out");
				return ManagementError::Timeout;
			}
			error!(error = %e, "Network error during management API request");
			ManagementError::Network(e)
		})?;

		let status = response.status();
		debug!(status = %status, "Received management API response");

		if status.is_success() {
			return Ok(response);
		}

		let status_code = status.as_u16();
		let body_text = response.text().await.unwrap_or_default();

		if status_code == 401 || status_code == 403 {
			error!(status = status_code, "Unauthorized management API request");
			return Err(ManagementError::Unauthorized);
		}

		if status_code == 429 {
			error!(status = status_code, "Rate limit exceeded");
			return Err(ManagementError::RateLimited);
		}

		let message = serde_json::from_str::<ApiErrorBody>(&body_text)
			.ok()
			.and_then(|b| b.message.or(b.error))
			.unwrap_or(body_text);
		error!(status = status_code, message = %message, "Management API error");
		Err(ManagementError::api(status_code, message))
	}

	/// Executes a request and deserializes the JSON response body.
	pub(crate) async fn request_json<B, T>(
		&self,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
	) -> Result<T, ManagementError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let response = self.execute(method, segments, body).await?;
		let body_text = response.text().await.map_err(ManagementError::Network)?;
		serde_json::from_str(&body_text).map_err(|e| {
			error!(error = %e, "Failed to parse management API response");
			ManagementError::Deserialization(e)
		})
	}

	/// Executes a request, discarding any response body beyond the status.
	pub(crate) async fn request_empty<B>(
		&self,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
	) -> Result<(), ManagementError>
	where
		B: Serialize + ?Sized,
	{
		self.execute(method, segments, body).await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_uri_joins_segments() {
		let management = Management::new("https://tenant.lumen.dev/api/v2", "token");
		assert_eq!(
			management.uri(&["log-streams", "ls_123"]),
			"https://tenant.lumen.dev/api/v2/log-streams/ls_123"
		);
	}

	#[test]
	fn test_base_url_trailing_slash_trimmed() {
		let management = Management::new("https://tenant.lumen.dev/api/v2/", "token");
		assert_eq!(
			management.uri(&["log-streams"]),
			"https://tenant.lumen.dev/api/v2/log-streams"
		);
	}
}
