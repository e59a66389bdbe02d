// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Lumen Management API client.
//!
//! This crate provides a typed Rust client for the Lumen tenant Management
//! REST API, encapsulating request execution, error mapping, and the wire
//! representation of managed resources. It currently covers the log streams
//! resource collection.
//!
//! ```rust,no_run
//! use lumen_management::Management;
//!
//! # async fn run() -> Result<(), lumen_management::ManagementError> {
//! let management = Management::new("https://tenant.lumen.dev/api/v2", "mgmt-token");
//! let streams = management.log_streams().list().await?;
//! for stream in streams {
//!     println!("{:?} {:?}", stream.name, stream.stream_type);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod log_streams;

pub use client::Management;
pub use error::ManagementError;
pub use log_streams::{
	AmazonEventBridgeSink, AzureEventGridSink, DatadogSink, HttpSink, HttpSinkHeader, LogStream,
	LogStreamManager, LogStreamSink, SplunkSink, SumoSink,
};
