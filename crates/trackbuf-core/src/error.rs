// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the trackbuf SDK.
//!
//! These are internal signals only: the public buffering API degrades
//! silently and never surfaces them to callers.

use thiserror::Error;

/// Failures that can occur while buffering events.
#[derive(Debug, Error)]
pub enum BufferError {
	/// A cookie value could not be decoded as an event queue.
	#[error("cookie value is not a valid event queue: {0}")]
	ParseFailure(String),

	/// The analytics provider is absent or not yet initialized.
	#[error("analytics provider is absent or uninitialized")]
	ProviderUnavailable,
}

/// Result type alias for buffering operations.
pub type Result<T> = std::result::Result<T, BufferError>;
