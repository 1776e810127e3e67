// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event and queue item types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Cookie name for the general cached event queue.
pub const EVENTS_QUEUE: &str = "cached_analytics_events";

/// Cookie name for the cached page view queue.
pub const PAGE_VIEWS_QUEUE: &str = "cached_analytics_page_views";

/// Cookie name holding client information, including an optional email.
pub const CLIENT_INFO_COOKIE: &str = "client_information";

/// Flat string-valued properties attached to an event.
///
/// Serializes as a plain JSON object, matching the wire shape the cached
/// queues are stored in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: BTreeMap<String, String>,
}

impl Properties {
	/// Creates an empty set of properties.
	pub fn new() -> Self {
		Self {
			inner: BTreeMap::new(),
		}
	}

	/// Inserts a key-value pair (builder pattern).
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Sets a key-value pair in place.
	pub fn set<K, V>(&mut self, key: K, value: V)
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.inner.insert(key.into(), value.into());
	}

	/// Removes a key, returning its value if it was present.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.inner.remove(key)
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.inner.get(key).map(String::as_str)
	}

	/// Returns true if the key is present.
	pub fn contains(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Merges another set of properties into this one.
	///
	/// On key collision the value from `other` wins.
	pub fn merge(mut self, other: Properties) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Returns true if there are no properties.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of properties.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Iterates over key-value pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K, V> FromIterator<(K, V)> for Properties
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// A named analytics event with flat string properties.
///
/// `cache` forces the event onto the caching path regardless of provider
/// readiness. It defaults to false and is omitted from the wire format
/// when unset, matching the stored queue shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	pub name: String,
	#[serde(default)]
	pub properties: Properties,
	#[serde(default, skip_serializing_if = "is_false")]
	pub cache: bool,
}

fn is_false(value: &bool) -> bool {
	!*value
}

impl Event {
	/// Creates an event with the given name and no properties.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			properties: Properties::new(),
			cache: false,
		}
	}

	/// Adds a single property (builder pattern).
	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.properties.set(key, value);
		self
	}

	/// Replaces the full property set (builder pattern).
	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	/// Marks the event as cache-forced (builder pattern).
	pub fn cached(mut self) -> Self {
		self.cache = true;
		self
	}
}

/// Produces an event lazily at dispatch time.
pub type EventFactory = Box<dyn Fn() -> Event + Send + Sync>;

/// An event pending dispatch, optionally produced lazily via a callback
/// and optionally forced onto the cache path.
pub struct QueueItem {
	pub event: Event,
	pub cache: bool,
	pub callback: Option<EventFactory>,
}

impl QueueItem {
	/// Creates a queue item wrapping a static event.
	pub fn new(event: Event) -> Self {
		Self {
			event,
			cache: false,
			callback: None,
		}
	}

	/// Forces the item onto the cache path (builder pattern).
	pub fn cached(mut self) -> Self {
		self.cache = true;
		self
	}

	/// Attaches a callback that produces the event at dispatch time.
	pub fn with_callback(mut self, callback: impl Fn() -> Event + Send + Sync + 'static) -> Self {
		self.callback = Some(Box::new(callback));
		self
	}

	/// Resolves the event to dispatch: the callback wins over the static
	/// event when both are present.
	pub fn resolve(&self) -> Event {
		match &self.callback {
			Some(factory) => factory(),
			None => self.event.clone(),
		}
	}
}

impl fmt::Debug for QueueItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QueueItem")
			.field("event", &self.event)
			.field("cache", &self.cache)
			.field("callback", &self.callback.as_ref().map(|_| "<factory>"))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn properties_insert_and_get() {
		let props = Properties::new().insert("method", "crypto");
		assert_eq!(props.get("method"), Some("crypto"));
		assert_eq!(props.len(), 1);
	}

	#[test]
	fn properties_remove_returns_value() {
		let mut props = Properties::new().insert("email", "user@example.com");
		assert_eq!(props.remove("email"), Some("user@example.com".to_string()));
		assert!(!props.contains("email"));
		assert_eq!(props.remove("email"), None);
	}

	#[test]
	fn properties_merge_other_wins() {
		let a = Properties::new().insert("k", "old").insert("a", "1");
		let b = Properties::new().insert("k", "new");
		let merged = a.merge(b);
		assert_eq!(merged.get("k"), Some("new"));
		assert_eq!(merged.get("a"), Some("1"));
	}

	#[test]
	fn event_serializes_without_cache_flag_by_default() {
		let event = Event::new("click").with_property("url", "/cashier");
		let json = serde_json::to_string(&event).unwrap();
		assert!(!json.contains("cache"));
		assert!(json.contains(r#""name":"click""#));
	}

	#[test]
	fn event_serializes_cache_flag_when_set() {
		let event = Event::new("click").cached();
		let json = serde_json::to_string(&event).unwrap();
		assert!(json.contains(r#""cache":true"#));
	}

	#[test]
	fn event_deserializes_with_missing_fields() {
		let event: Event = serde_json::from_str(r#"{"name":"click"}"#).unwrap();
		assert_eq!(event.name, "click");
		assert!(event.properties.is_empty());
		assert!(!event.cache);
	}

	#[test]
	fn queue_item_resolve_prefers_callback() {
		let item = QueueItem::new(Event::new("static")).with_callback(|| Event::new("lazy"));
		assert_eq!(item.resolve().name, "lazy");
	}

	#[test]
	fn queue_item_resolve_falls_back_to_static_event() {
		let item = QueueItem::new(Event::new("static"));
		assert_eq!(item.resolve().name, "static");
	}

	proptest! {
		#[test]
		fn properties_len_matches_unique_keys(keys in proptest::collection::vec("[a-z]{1,10}", 0..20)) {
			let unique: std::collections::HashSet<_> = keys.iter().cloned().collect();
			let mut props = Properties::new();
			for key in &keys {
				props.set(key.clone(), "value");
			}
			prop_assert_eq!(props.len(), unique.len());
		}

		#[test]
		fn event_roundtrips_through_json(
			name in "[a-z_]{1,30}",
			key in "[a-z_]{1,15}",
			value in "[a-zA-Z0-9 ]{0,30}",
			cache in proptest::bool::ANY,
		) {
			let mut event = Event::new(name).with_property(key, value);
			event.cache = cache;

			let json = serde_json::to_string(&event).unwrap();
			let back: Event = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(back, event);
		}
	}
}
