// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Injectable cookie storage.
//!
//! The buffer never touches a browser global directly; hosts provide a
//! [`CookieStore`] backed by whatever cookie jar their platform exposes.
//! [`MemoryCookieStore`] ships for tests and headless hosts.

use std::collections::HashMap;
use std::sync::Mutex;

/// Attributes applied when writing a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
	pub path: String,
	pub domain: String,
}

impl CookieAttributes {
	/// Creates attributes with `path=/` and the given domain.
	pub fn for_domain(domain: impl Into<String>) -> Self {
		Self {
			path: "/".to_string(),
			domain: domain.into(),
		}
	}
}

/// Read/write access to named cookies.
///
/// Writes are last-write-wins; there is no compare-and-swap on the value.
pub trait CookieStore: Send + Sync {
	/// Returns the current value of the named cookie, if set.
	fn get(&self, name: &str) -> Option<String>;

	/// Writes the named cookie with the given attributes.
	fn set(&self, name: &str, value: &str, attributes: &CookieAttributes);
}

/// An in-memory cookie store.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
	inner: Mutex<HashMap<String, String>>,
}

impl MemoryCookieStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}
}

impl CookieStore for MemoryCookieStore {
	fn get(&self, name: &str) -> Option<String> {
		self
			.inner
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.get(name)
			.cloned()
	}

	fn set(&self, name: &str, value: &str, _attributes: &CookieAttributes) {
		self
			.inner
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.insert(name.to_string(), value.to_string());
	}
}
