// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The page navigation context seam.

/// Access to the current page's URL parts.
///
/// Hosts wire this to their navigation state; the buffer reads it when
/// selecting a cookie domain, building synthetic page-view events, and
/// evaluating page-load rules.
pub trait PageContext: Send + Sync {
	/// The full current URL.
	fn href(&self) -> String;

	/// The current hostname.
	fn hostname(&self) -> String;

	/// The current path, including the leading slash.
	fn pathname(&self) -> String;
}

/// A fixed page context.
#[derive(Debug, Clone, Default)]
pub struct StaticPageContext {
	href: String,
	hostname: String,
	pathname: String,
}

impl StaticPageContext {
	/// Creates a context with the given URL parts.
	pub fn new(
		href: impl Into<String>,
		hostname: impl Into<String>,
		pathname: impl Into<String>,
	) -> Self {
		Self {
			href: href.into(),
			hostname: hostname.into(),
			pathname: pathname.into(),
		}
	}
}

impl PageContext for StaticPageContext {
	fn href(&self) -> String {
		self.href.clone()
	}

	fn hostname(&self) -> String {
		self.hostname.clone()
	}

	fn pathname(&self) -> String {
		self.pathname.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn static_context_returns_parts() {
		let page = StaticPageContext::new("https://app.deriv.com/cashier", "app.deriv.com", "/cashier");
		assert_eq!(page.href(), "https://app.deriv.com/cashier");
		assert_eq!(page.hostname(), "app.deriv.com");
		assert_eq!(page.pathname(), "/cashier");
	}
}
