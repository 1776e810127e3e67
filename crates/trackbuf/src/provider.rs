// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The external analytics provider seam.
//!
//! The provider is an unreliable, possibly-absent capability: the buffer
//! never assumes it is present and treats "absent" and "not ready"
//! identically.

use async_trait::async_trait;
use trackbuf_core::Properties;

/// The live analytics provider the buffer forwards to when ready.
///
/// Implementations must not panic when the underlying SDK is absent;
/// report `false` from [`is_ready`](AnalyticsProvider::is_ready) instead.
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
	/// Returns whether the provider is initialized with an active
	/// tracking instance.
	async fn is_ready(&self) -> bool;

	/// Forwards a named event with its properties to the provider.
	async fn track_event(&self, name: &str, properties: &Properties);

	/// Asks the provider to record a page view for the given URL.
	async fn page_view(&self, url: &str);
}

/// A provider that is never ready and discards all calls.
///
/// Used when no analytics integration is configured; every event routed
/// through a buffer holding this provider lands on the caching path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvider;

#[async_trait]
impl AnalyticsProvider for NoopProvider {
	async fn is_ready(&self) -> bool {
		false
	}

	async fn track_event(&self, _name: &str, _properties: &Properties) {}

	async fn page_view(&self, _url: &str) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn noop_provider_is_never_ready() {
		let provider = NoopProvider;
		assert!(!provider.is_ready().await);
	}

	#[tokio::test]
	async fn noop_provider_discards_calls() {
		let provider = NoopProvider;
		provider.track_event("click", &Properties::new()).await;
		provider.page_view("https://app.deriv.com/").await;
	}
}
