// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Buffer configuration.

use std::time::Duration;

/// Maps a hostname fragment to the cookie domain written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRule {
	/// Substring matched against the current hostname.
	pub host_fragment: String,
	/// Cookie domain written when the fragment matches.
	pub domain: String,
}

impl DomainRule {
	/// Creates a rule mapping a hostname fragment to a cookie domain.
	pub fn new(host_fragment: impl Into<String>, domain: impl Into<String>) -> Self {
		Self {
			host_fragment: host_fragment.into(),
			domain: domain.into(),
		}
	}
}

/// Configuration for an [`EventBuffer`](crate::EventBuffer).
///
/// The domain table is deployment data, not logic: defaults reproduce the
/// production table but hosts override per environment, either directly
/// or via [`BufferConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BufferConfig {
	/// Interval between provider readiness checks in the page view monitor.
	pub poll_interval: Duration,
	/// Maximum time the page view monitor keeps polling before giving up.
	pub poll_timeout: Duration,
	/// Hostname-fragment to cookie-domain mappings, first match wins.
	pub domain_rules: Vec<DomainRule>,
	/// Cookie domain written when no rule matches.
	pub fallback_domain: String,
}

impl Default for BufferConfig {
	fn default() -> Self {
		Self {
			poll_interval: Duration::from_secs(1),
			poll_timeout: Duration::from_secs(60),
			domain_rules: vec![
				DomainRule::new("deriv.com", ".deriv.com"),
				DomainRule::new("binary.sx", ".binary.sx"),
				DomainRule::new("localhost", "localhost:8443"),
			],
			fallback_domain: String::new(),
		}
	}
}

impl BufferConfig {
	/// Builds the default configuration with environment overrides:
	///
	/// - `TRACKBUF_COOKIE_DOMAIN` replaces the fallback domain.
	/// - `TRACKBUF_POLL_INTERVAL_MS` / `TRACKBUF_POLL_TIMEOUT_MS` set the
	///   monitor timings in milliseconds.
	///
	/// Unset or unparseable variables leave the defaults in place.
	pub fn from_env() -> Self {
		let mut config = Self::default();

		if let Ok(domain) = std::env::var("TRACKBUF_COOKIE_DOMAIN") {
			config.fallback_domain = domain;
		}
		if let Some(interval) = duration_ms_env("TRACKBUF_POLL_INTERVAL_MS") {
			config.poll_interval = interval;
		}
		if let Some(timeout) = duration_ms_env("TRACKBUF_POLL_TIMEOUT_MS") {
			config.poll_timeout = timeout;
		}

		config
	}

	/// Returns the cookie domain to write for the given hostname: the
	/// first rule whose fragment the hostname contains, else the fallback.
	pub fn domain_for(&self, hostname: &str) -> &str {
		self
			.domain_rules
			.iter()
			.find(|rule| hostname.contains(&rule.host_fragment))
			.map(|rule| rule.domain.as_str())
			.unwrap_or(&self.fallback_domain)
	}
}

fn duration_ms_env(name: &str) -> Option<Duration> {
	std::env::var(name)
		.ok()
		.and_then(|raw| raw.parse::<u64>().ok())
		.map(Duration::from_millis)
}
