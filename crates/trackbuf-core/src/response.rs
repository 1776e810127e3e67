// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Observed analytics provider network responses.
//!
//! The SDK records these to decide whether a page view has already been
//! confirmed by the provider during the current page lifetime.

use serde::{Deserialize, Serialize};

/// The payload portion of a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
	/// The event type the provider recorded, e.g. `"page"` or `"track"`.
	#[serde(rename = "type")]
	pub kind: String,
	/// The anonymous identity the provider associated with the event.
	#[serde(rename = "anonymousId", default)]
	pub anonymous_id: String,
}

/// A network response observed from the analytics provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResponse {
	pub url: String,
	pub method: String,
	pub status: u16,
	#[serde(default)]
	pub headers: String,
	#[serde(default)]
	pub data: String,
	pub payload: ResponsePayload,
}

impl TrackResponse {
	/// Returns true if this response confirms a recorded page view:
	/// a `"page"` payload carrying a non-empty anonymous id.
	pub fn is_page_view(&self) -> bool {
		self.payload.kind == "page" && !self.payload.anonymous_id.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn response(kind: &str, anonymous_id: &str) -> TrackResponse {
		TrackResponse {
			url: "https://analytics.example.com/v1/t".to_string(),
			method: "POST".to_string(),
			status: 200,
			headers: String::new(),
			data: String::new(),
			payload: ResponsePayload {
				kind: kind.to_string(),
				anonymous_id: anonymous_id.to_string(),
			},
		}
	}

	#[test]
	fn page_response_with_identity_is_page_view() {
		assert!(response("page", "abc").is_page_view());
	}

	#[test]
	fn page_response_without_identity_is_not_page_view() {
		assert!(!response("page", "").is_page_view());
	}

	#[test]
	fn track_response_is_not_page_view() {
		assert!(!response("track", "abc").is_page_view());
	}

	#[test]
	fn payload_decodes_provider_field_names() {
		let payload: ResponsePayload =
			serde_json::from_str(r#"{"type":"page","anonymousId":"abc"}"#).unwrap();
		assert_eq!(payload.kind, "page");
		assert_eq!(payload.anonymous_id, "abc");
	}

	#[test]
	fn payload_tolerates_missing_anonymous_id() {
		let payload: ResponsePayload = serde_json::from_str(r#"{"type":"page"}"#).unwrap();
		assert!(payload.anonymous_id.is_empty());
	}
}
