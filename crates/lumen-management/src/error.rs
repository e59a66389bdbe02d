// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Management API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Management API.
#[derive(Debug, Error)]
pub enum ManagementError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Invalid or expired access token, or insufficient scopes.
	#[error("Unauthorized or insufficient scopes")]
	Unauthorized,

	/// Rate limit exceeded.
	#[error("Rate limit exceeded")]
	RateLimited,

	/// The Management API returned an error status.
	#[error("Management API error: {status} - {message}")]
	Api { status: u16, message: String },

	/// A request payload could not be serialized to JSON.
	#[error("Failed to serialize request body: {0}")]
	Serialization(#[source] serde_json::Error),

	/// A response body could not be deserialized.
	#[error("Failed to deserialize response body: {0}")]
	Deserialization(#[source] serde_json::Error),
}

impl ManagementError {
	/// Create an API error from status code and message.
	pub fn api(status: u16, message: impl Into<String>) -> Self {
		Self::Api {
			status,
			message: message.into(),
		}
	}
}
