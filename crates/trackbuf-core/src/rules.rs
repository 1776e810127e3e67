// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Declarative page-load dispatch rules.

use std::fmt;

use crate::event::{Event, EventFactory};

/// Describes when, based on the current URL path, an event should fire.
///
/// Dispatch semantics, evaluated against the path with its leading slash
/// stripped:
/// - `pages` non-empty: dispatch iff the path is listed.
/// - `pages` empty, `excluded_pages` non-empty: dispatch iff the path is
///   not listed.
/// - both empty: always dispatch.
pub struct PageLoadRule {
	pub pages: Vec<String>,
	pub excluded_pages: Vec<String>,
	pub event: Option<Event>,
	pub callback: Option<EventFactory>,
}

impl PageLoadRule {
	/// Creates a rule that always dispatches the given event.
	pub fn always(event: Event) -> Self {
		Self {
			pages: Vec::new(),
			excluded_pages: Vec::new(),
			event: Some(event),
			callback: None,
		}
	}

	/// Creates a rule that dispatches only on the listed pages.
	pub fn for_pages<I, S>(pages: I, event: Event) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			pages: pages.into_iter().map(Into::into).collect(),
			excluded_pages: Vec::new(),
			event: Some(event),
			callback: None,
		}
	}

	/// Creates a rule that dispatches everywhere except the listed pages.
	pub fn excluding_pages<I, S>(excluded: I, event: Event) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			pages: Vec::new(),
			excluded_pages: excluded.into_iter().map(Into::into).collect(),
			event: Some(event),
			callback: None,
		}
	}

	/// Attaches a callback that produces the event at dispatch time.
	pub fn with_callback(mut self, callback: impl Fn() -> Event + Send + Sync + 'static) -> Self {
		self.callback = Some(Box::new(callback));
		self
	}

	/// Returns true if the rule should dispatch for the given path
	/// (leading slash already stripped).
	pub fn matches(&self, path: &str) -> bool {
		if !self.pages.is_empty() {
			self.pages.iter().any(|p| p == path)
		} else if !self.excluded_pages.is_empty() {
			!self.excluded_pages.iter().any(|p| p == path)
		} else {
			true
		}
	}

	/// Resolves the event to dispatch: the callback wins over the static
	/// event. Returns `None` when the rule carries neither.
	pub fn resolve(&self) -> Option<Event> {
		match &self.callback {
			Some(factory) => Some(factory()),
			None => self.event.clone(),
		}
	}
}

impl fmt::Debug for PageLoadRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PageLoadRule")
			.field("pages", &self.pages)
			.field("excluded_pages", &self.excluded_pages)
			.field("event", &self.event)
			.field("callback", &self.callback.as_ref().map(|_| "<factory>"))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn listed_page_dispatches() {
		let rule = PageLoadRule::for_pages(["cashier"], Event::new("open"));
		assert!(rule.matches("cashier"));
		assert!(!rule.matches("reports"));
	}

	#[test]
	fn excluded_page_does_not_dispatch() {
		let rule = PageLoadRule::excluding_pages(["cashier"], Event::new("open"));
		assert!(!rule.matches("cashier"));
		assert!(rule.matches("reports"));
	}

	#[test]
	fn empty_rule_always_dispatches() {
		let rule = PageLoadRule::always(Event::new("open"));
		assert!(rule.matches("cashier"));
		assert!(rule.matches(""));
	}

	#[test]
	fn pages_take_precedence_over_exclusions() {
		// When both lists are set, only the allow list is consulted.
		let rule = PageLoadRule {
			pages: vec!["cashier".to_string()],
			excluded_pages: vec!["cashier".to_string()],
			event: Some(Event::new("open")),
			callback: None,
		};
		assert!(rule.matches("cashier"));
	}

	#[test]
	fn resolve_prefers_callback() {
		let rule =
			PageLoadRule::always(Event::new("static")).with_callback(|| Event::new("lazy"));
		assert_eq!(rule.resolve().unwrap().name, "lazy");
	}

	#[test]
	fn resolve_without_event_or_callback_is_none() {
		let rule = PageLoadRule {
			pages: Vec::new(),
			excluded_pages: Vec::new(),
			event: None,
			callback: None,
		};
		assert!(rule.resolve().is_none());
	}

	proptest! {
		#[test]
		fn allow_list_matches_exactly_its_members(
			pages in proptest::collection::vec("[a-z]{1,10}", 1..8),
			probe in "[a-z]{1,10}",
		) {
			let rule = PageLoadRule::for_pages(pages.clone(), Event::new("open"));
			prop_assert_eq!(rule.matches(&probe), pages.contains(&probe));
		}

		#[test]
		fn exclusion_list_is_complement(
			excluded in proptest::collection::vec("[a-z]{1,10}", 1..8),
			probe in "[a-z]{1,10}",
		) {
			let rule = PageLoadRule::excluding_pages(excluded.clone(), Event::new("open"));
			prop_assert_eq!(rule.matches(&probe), !excluded.contains(&probe));
		}
	}
}
