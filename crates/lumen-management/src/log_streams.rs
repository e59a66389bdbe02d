// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Log stream resource types and operations.
//!
//! A log stream exports tenant log events to an external analysis service.
//! The wire envelope is shared across all destinations: the `type` field
//! selects which concrete shape the `sink` payload carries, so the record
//! needs a custom codec that dispatches on the discriminator when decoding
//! and serializes the sink fragment independently when encoding.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::client::Management;
use crate::error::ManagementError;

/// Log stream type discriminator for Amazon EventBridge.
pub const LOG_STREAM_TYPE_AMAZON_EVENT_BRIDGE: &str = "eventbridge";
/// Log stream type discriminator for Azure Event Grid.
pub const LOG_STREAM_TYPE_AZURE_EVENT_GRID: &str = "eventgrid";
/// Log stream type discriminator for custom webhooks.
pub const LOG_STREAM_TYPE_HTTP: &str = "http";
/// Log stream type discriminator for Datadog.
pub const LOG_STREAM_TYPE_DATADOG: &str = "datadog";
/// Log stream type discriminator for Splunk.
pub const LOG_STREAM_TYPE_SPLUNK: &str = "splunk";
/// Log stream type discriminator for Sumo Logic.
pub const LOG_STREAM_TYPE_SUMO: &str = "sumo";

/// A log stream resource.
///
/// Every scalar field is optional; unset fields are omitted from the wire
/// form entirely rather than serialized as null or an empty string. The
/// `type` value is not restricted to the known discriminators: the service
/// may introduce new destinations, and records carrying them must still
/// round-trip (see [`LogStreamSink::Opaque`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogStream {
	/// The log stream's identifier, assigned by the service.
	pub id: Option<String>,

	/// The name of the log stream.
	pub name: Option<String>,

	/// The destination type discriminator (wire name `type`).
	pub stream_type: Option<String>,

	/// The status of the log stream: "active", "paused", or "suspended".
	pub status: Option<String>,

	/// Destination-specific configuration, shaped by `stream_type`.
	pub sink: Option<LogStreamSink>,
}

/// Destination-specific sink configuration.
///
/// One variant per known destination type, plus [`LogStreamSink::Opaque`] for
/// sinks whose discriminator is absent or not (yet) known to this client. The
/// opaque form preserves the raw object so unknown destinations survive a
/// decode/encode cycle without data loss.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogStreamSink {
	/// Export to Amazon EventBridge.
	AmazonEventBridge(AmazonEventBridgeSink),
	/// Export to Azure Event Grid.
	AzureEventGrid(AzureEventGridSink),
	/// Export to a custom webhook.
	Http(HttpSink),
	/// Export to Datadog.
	Datadog(DatadogSink),
	/// Export to Splunk.
	Splunk(SplunkSink),
	/// Export to Sumo Logic.
	Sumo(SumoSink),
	/// Sink of an unrecognized destination type, kept as raw JSON.
	Opaque(Map<String, Value>),
}

impl LogStreamSink {
	/// Decodes a raw sink fragment into the shape selected by the
	/// discriminator. Unrecognized discriminators fall back to the opaque
	/// form rather than failing.
	fn decode(stream_type: &str, raw: Value) -> Result<Self, serde_json::Error> {
		Ok(match stream_type {
			LOG_STREAM_TYPE_AMAZON_EVENT_BRIDGE => {
				Self::AmazonEventBridge(serde_json::from_value(raw)?)
			}
			LOG_STREAM_TYPE_AZURE_EVENT_GRID => Self::AzureEventGrid(serde_json::from_value(raw)?),
			LOG_STREAM_TYPE_HTTP => Self::Http(serde_json::from_value(raw)?),
			LOG_STREAM_TYPE_DATADOG => Self::Datadog(serde_json::from_value(raw)?),
			LOG_STREAM_TYPE_SPLUNK => Self::Splunk(serde_json::from_value(raw)?),
			LOG_STREAM_TYPE_SUMO => Self::Sumo(serde_json::from_value(raw)?),
			_ => Self::Opaque(serde_json::from_value(raw)?),
		})
	}
}

/// Sink configuration for Amazon EventBridge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmazonEventBridgeSink {
	/// AWS account id.
	#[serde(rename = "awsAccountId", skip_serializing_if = "Option::is_none")]
	pub account_id: Option<String>,

	/// AWS region.
	#[serde(rename = "awsRegion", skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,

	/// AWS partner event source, assigned by the service.
	#[serde(
		rename = "awsPartnerEventSource",
		skip_serializing_if = "Option::is_none"
	)]
	pub partner_event_source: Option<String>,
}

/// Sink configuration for Azure Event Grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AzureEventGridSink {
	/// Azure subscription id.
	#[serde(
		rename = "azureSubscriptionId",
		skip_serializing_if = "Option::is_none"
	)]
	pub subscription_id: Option<String>,

	/// Azure resource group.
	#[serde(rename = "azureResourceGroup", skip_serializing_if = "Option::is_none")]
	pub resource_group: Option<String>,

	/// Azure region.
	#[serde(rename = "azureRegion", skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,

	/// Azure partner topic, assigned by the service.
	#[serde(rename = "azurePartnerTopic", skip_serializing_if = "Option::is_none")]
	pub partner_topic: Option<String>,
}

/// Sink configuration for custom webhooks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HttpSink {
	/// Content format of the delivered payload, e.g. "JSONLINES".
	#[serde(rename = "httpContentFormat", skip_serializing_if = "Option::is_none")]
	pub content_format: Option<String>,

	/// Content type of the delivered payload, e.g. "application/json".
	#[serde(rename = "httpContentType", skip_serializing_if = "Option::is_none")]
	pub content_type: Option<String>,

	/// Endpoint URL events are delivered to.
	#[serde(rename = "httpEndpoint", skip_serializing_if = "Option::is_none")]
	pub endpoint: Option<String>,

	/// Authorization header value sent with each delivery.
	#[serde(rename = "httpAuthorization", skip_serializing_if = "Option::is_none")]
	pub authorization: Option<String>,

	/// Custom headers sent with each delivery, in order.
	#[serde(rename = "httpCustomHeaders", skip_serializing_if = "Option::is_none")]
	pub custom_headers: Option<Vec<HttpSinkHeader>>,
}

/// A custom header sent with webhook deliveries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HttpSinkHeader {
	/// The header name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub header: Option<String>,

	/// The header value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

/// Sink configuration for Datadog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatadogSink {
	/// Datadog region.
	#[serde(rename = "datadogRegion", skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,

	/// Datadog API key.
	#[serde(rename = "datadogApiKey", skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
}

/// Sink configuration for Splunk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplunkSink {
	/// Splunk domain.
	#[serde(rename = "splunkDomain", skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,

	/// Splunk event collector token.
	#[serde(rename = "splunkToken", skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,

	/// Splunk port, transmitted as a string.
	#[serde(rename = "splunkPort", skip_serializing_if = "Option::is_none")]
	pub port: Option<String>,

	/// Whether to verify TLS when delivering events.
	#[serde(rename = "splunkSecure", skip_serializing_if = "Option::is_none")]
	pub secure: Option<bool>,
}

/// Sink configuration for Sumo Logic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SumoSink {
	/// Sumo Logic source address.
	#[serde(rename = "sumoSourceAddress", skip_serializing_if = "Option::is_none")]
	pub source_address: Option<String>,
}

/// Wire envelope shared by the encode and decode paths. The sink travels as
/// a raw JSON value so its shape can be resolved against the discriminator.
#[derive(Debug, Serialize, Deserialize)]
struct WireLogStream {
	#[serde(skip_serializing_if = "Option::is_none")]
	id: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	name: Option<String>,

	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	stream_type: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	status: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	sink: Option<Value>,
}

impl Serialize for LogStream {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let sink = match &self.sink {
			Some(sink) => {
				Some(serde_json::to_value(sink).map_err(serde::ser::Error::custom)?)
			}
			None => None,
		};

		WireLogStream {
			id: self.id.clone(),
			name: self.name.clone(),
			stream_type: self.stream_type.clone(),
			status: self.status.clone(),
			sink,
		}
		.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for LogStream {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let wire = WireLogStream::deserialize(deserializer)?;

		// A null or missing sink leaves the field unset. When present, the
		// discriminator selects the shape; absent or unrecognized
		// discriminators keep the sink as a raw object.
		let sink = match wire.sink {
			None => None,
			Some(raw) => {
				let decoded = match wire.stream_type.as_deref() {
					Some(stream_type) => LogStreamSink::decode(stream_type, raw),
					None => serde_json::from_value(raw).map(LogStreamSink::Opaque),
				}
				.map_err(serde::de::Error::custom)?;
				Some(decoded)
			}
		};

		Ok(LogStream {
			id: wire.id,
			name: wire.name,
			stream_type: wire.stream_type,
			status: wire.status,
			sink,
		})
	}
}

/// Manages log stream resources on the Management API.
#[derive(Debug)]
pub struct LogStreamManager<'a> {
	management: &'a Management,
}

impl<'a> LogStreamManager<'a> {
	pub(crate) fn new(management: &'a Management) -> Self {
		Self { management }
	}

	/// Creates a log stream.
	#[instrument(skip(self, log_stream))]
	pub async fn create(&self, log_stream: &LogStream) -> Result<(), ManagementError> {
		self.management
			.request_empty(Method::POST, &["log-streams"], Some(log_stream))
			.await
	}

	/// Retrieves a log stream by its identifier.
	#[instrument(skip(self))]
	pub async fn read(&self, id: &str) -> Result<LogStream, ManagementError> {
		self.management
			.request_json(Method::GET, &["log-streams", id], None::<&()>)
			.await
	}

	/// Lists all log streams.
	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<LogStream>, ManagementError> {
		self.management
			.request_json(Method::GET, &["log-streams"], None::<&()>)
			.await
	}

	/// Updates a log stream.
	///
	/// The service accepts updates to name, status, and sink. For log
	/// streams of type eventbridge and eventgrid the service rejects sink
	/// updates; that restriction is enforced server-side, not here.
	#[instrument(skip(self, log_stream))]
	pub async fn update(&self, id: &str, log_stream: &LogStream) -> Result<(), ManagementError> {
		self.management
			.request_empty(Method::PATCH, &["log-streams", id], Some(log_stream))
			.await
	}

	/// Deletes a log stream.
	#[instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<(), ManagementError> {
		self.management
			.request_empty(Method::DELETE, &["log-streams", id], None::<&()>)
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn decode_datadog_selects_typed_variant() {
		let raw = json!({
			"id": "ls_123",
			"name": "dd",
			"type": "datadog",
			"status": "active",
			"sink": {"datadogRegion": "us1", "datadogApiKey": "k"}
		});

		let stream: LogStream = serde_json::from_value(raw).unwrap();
		assert_eq!(stream.id.as_deref(), Some("ls_123"));
		assert_eq!(stream.stream_type.as_deref(), Some("datadog"));
		match stream.sink {
			Some(LogStreamSink::Datadog(sink)) => {
				assert_eq!(sink.region.as_deref(), Some("us1"));
				assert_eq!(sink.api_key.as_deref(), Some("k"));
			}
			other => panic!("expected datadog sink, got {other:?}"),
		}
	}

	#[test]
	fn decode_unknown_type_falls_back_to_opaque() {
		let sink = json!({"custom": "x", "nested": {"a": 1}});
		let raw = json!({"type": "unknown-future-type", "sink": sink.clone()});

		let stream: LogStream = serde_json::from_value(raw.clone()).unwrap();
		assert_eq!(stream.stream_type.as_deref(), Some("unknown-future-type"));
		match &stream.sink {
			Some(LogStreamSink::Opaque(map)) => {
				assert_eq!(Value::Object(map.clone()), sink);
			}
			other => panic!("expected opaque sink, got {other:?}"),
		}
		assert_eq!(serde_json::to_value(&stream).unwrap(), raw);
	}

	#[test]
	fn decode_missing_type_keeps_sink_opaque() {
		let raw = json!({"name": "typeless", "sink": {"splunkDomain": "example.com"}});

		let stream: LogStream = serde_json::from_value(raw).unwrap();
		assert!(stream.stream_type.is_none());
		match stream.sink {
			Some(LogStreamSink::Opaque(map)) => {
				assert_eq!(map.get("splunkDomain"), Some(&json!("example.com")));
			}
			other => panic!("expected opaque sink, got {other:?}"),
		}
	}

	#[test]
	fn decode_null_sink_leaves_sink_unset() {
		let raw = json!({"type": "datadog", "sink": null});
		let stream: LogStream = serde_json::from_value(raw).unwrap();
		assert!(stream.sink.is_none());
	}

	#[test]
	fn decode_rejects_mistyped_scalar() {
		let raw = json!({"status": 7});
		let result: Result<LogStream, _> = serde_json::from_value(raw);
		assert!(result.is_err());
	}

	#[test]
	fn decode_rejects_mistyped_variant_field() {
		let raw = json!({"type": "splunk", "sink": {"splunkSecure": "yes"}});
		let result: Result<LogStream, _> = serde_json::from_value(raw);
		assert!(result.is_err());
	}

	#[test]
	fn encode_omits_unset_fields_and_sink() {
		let stream = LogStream {
			name: Some("bare".to_string()),
			..Default::default()
		};

		let encoded = serde_json::to_value(&stream).unwrap();
		assert_eq!(encoded, json!({"name": "bare"}));
	}

	#[test]
	fn encode_attaches_sink_under_sink_key() {
		let stream = LogStream {
			name: Some("dd".to_string()),
			stream_type: Some(LOG_STREAM_TYPE_DATADOG.to_string()),
			sink: Some(LogStreamSink::Datadog(DatadogSink {
				region: Some("eu".to_string()),
				api_key: Some("secret".to_string()),
			})),
			..Default::default()
		};

		let encoded = serde_json::to_value(&stream).unwrap();
		assert_eq!(
			encoded,
			json!({
				"name": "dd",
				"type": "datadog",
				"sink": {"datadogRegion": "eu", "datadogApiKey": "secret"}
			})
		);
	}

	#[test]
	fn http_custom_headers_preserve_content_and_order() {
		let raw = json!({
			"type": "http",
			"sink": {
				"httpEndpoint": "https://hooks.example.com/logs",
				"httpCustomHeaders": [
					{"header": "X-A", "value": "1"},
					{"header": "X-B", "value": "2"},
					{"header": "X-C", "value": "3"}
				]
			}
		});

		let stream: LogStream = serde_json::from_value(raw.clone()).unwrap();
		let headers = match &stream.sink {
			Some(LogStreamSink::Http(sink)) => sink.custom_headers.as_ref().unwrap(),
			other => panic!("expected http sink, got {other:?}"),
		};
		assert_eq!(headers.len(), 3);
		assert_eq!(headers[0].header.as_deref(), Some("X-A"));
		assert_eq!(headers[1].value.as_deref(), Some("2"));
		assert_eq!(headers[2].header.as_deref(), Some("X-C"));

		let encoded = serde_json::to_value(&stream).unwrap();
		assert_eq!(encoded, raw);
	}

	#[test]
	fn end_to_end_http_decode_and_reencode() {
		let raw = json!({
			"type": "http",
			"sink": {
				"httpEndpoint": "https://x",
				"httpCustomHeaders": [{"header": "X-A", "value": "1"}]
			}
		});

		let stream: LogStream = serde_json::from_value(raw.clone()).unwrap();
		match &stream.sink {
			Some(LogStreamSink::Http(sink)) => {
				assert_eq!(sink.endpoint.as_deref(), Some("https://x"));
				let headers = sink.custom_headers.as_ref().unwrap();
				assert_eq!(headers.len(), 1);
				assert_eq!(headers[0].header.as_deref(), Some("X-A"));
				assert_eq!(headers[0].value.as_deref(), Some("1"));
			}
			other => panic!("expected http sink, got {other:?}"),
		}

		assert_eq!(serde_json::to_value(&stream).unwrap(), raw);
	}

	#[test]
	fn wire_round_trip_for_every_known_variant() {
		let samples = vec![
			json!({
				"type": "eventbridge",
				"sink": {
					"awsAccountId": "999999999999",
					"awsRegion": "us-west-2",
					"awsPartnerEventSource": "aws.partner/example"
				}
			}),
			json!({
				"type": "eventgrid",
				"sink": {
					"azureSubscriptionId": "sub-1",
					"azureResourceGroup": "rg-1",
					"azureRegion": "westeurope",
					"azurePartnerTopic": "topic-1"
				}
			}),
			json!({
				"type": "http",
				"sink": {
					"httpContentFormat": "JSONLINES",
					"httpContentType": "application/json",
					"httpEndpoint": "https://hooks.example.com/logs",
					"httpAuthorization": "Bearer hook-token"
				}
			}),
			json!({
				"type": "datadog",
				"sink": {"datadogRegion": "us1", "datadogApiKey": "k"}
			}),
			json!({
				"type": "splunk",
				"sink": {
					"splunkDomain": "example.splunkcloud.com",
					"splunkToken": "t",
					"splunkPort": "8088",
					"splunkSecure": true
				}
			}),
			json!({
				"type": "sumo",
				"sink": {"sumoSourceAddress": "https://collectors.sumologic.com/x"}
			}),
		];

		for sample in samples {
			let stream: LogStream = serde_json::from_value(sample.clone()).unwrap();
			assert!(
				!matches!(stream.sink, Some(LogStreamSink::Opaque(_))),
				"known discriminator decoded as opaque: {sample}"
			);
			assert_eq!(serde_json::to_value(&stream).unwrap(), sample);
		}
	}

	#[test]
	fn unknown_variant_fields_are_ignored() {
		let raw = json!({
			"type": "sumo",
			"sink": {"sumoSourceAddress": "addr", "newField": "ignored"}
		});

		let stream: LogStream = serde_json::from_value(raw).unwrap();
		match stream.sink {
			Some(LogStreamSink::Sumo(sink)) => {
				assert_eq!(sink.source_address.as_deref(), Some("addr"));
			}
			other => panic!("expected sumo sink, got {other:?}"),
		}
	}
}
