// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The event buffer client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use trackbuf_core::{
	BufferError, Event, PageLoadRule, QueueItem, TrackResponse, CLIENT_INFO_COOKIE, EVENTS_QUEUE,
	PAGE_VIEWS_QUEUE,
};

use crate::config::BufferConfig;
use crate::cookie::{CookieAttributes, CookieStore, MemoryCookieStore};
use crate::monitor::PageViewMonitor;
use crate::page::{PageContext, StaticPageContext};
use crate::provider::{AnalyticsProvider, NoopProvider};

/// Shape of the `client_information` cookie, reduced to the field the
/// buffer reads.
#[derive(Debug, Deserialize)]
struct ClientInformation {
	#[serde(default)]
	email: Option<String>,
}

/// Buffers analytics events, forwarding them live when the provider is
/// ready and appending them to cookie-backed FIFO queues otherwise.
///
/// Constructed via [`EventBuffer::builder`] with injected collaborators.
/// No operation returns an error or panics: parse failures fall open to
/// an empty queue and provider absence falls closed to the caching path.
pub struct EventBuffer {
	cookies: Arc<dyn CookieStore>,
	provider: Arc<dyn AnalyticsProvider>,
	page: Arc<dyn PageContext>,
	config: BufferConfig,
	responses: Mutex<Vec<TrackResponse>>,
	unload_armed: AtomicBool,
	unload_fired: AtomicBool,
}

impl EventBuffer {
	/// Creates a builder with in-memory/no-op defaults.
	pub fn builder() -> EventBufferBuilder {
		EventBufferBuilder::new()
	}

	/// Returns the buffer configuration.
	pub fn config(&self) -> &BufferConfig {
		&self.config
	}

	pub(crate) fn page(&self) -> &dyn PageContext {
		self.page.as_ref()
	}

	pub(crate) fn provider(&self) -> &dyn AnalyticsProvider {
		self.provider.as_ref()
	}

	/// Returns whether the provider is initialized with an active
	/// tracking instance. Fails closed to `false`; never panics.
	pub async fn is_ready(&self) -> bool {
		self.provider.is_ready().await
	}

	/// Reads the client information cookie and, if it carries a non-empty
	/// email, transiently attaches it to the event's properties; the email
	/// is then stripped before the event is returned. The delivered event
	/// never carries an `email` property, regardless of source.
	//
	// The attach-then-strip round trip is intentional and must stay until
	// downstream consumers confirm whether email forwarding was ever meant
	// to happen.
	pub fn process_event(&self, mut event: Event) -> Event {
		if let Some(raw) = self.cookies.get(CLIENT_INFO_COOKIE) {
			match serde_json::from_str::<ClientInformation>(&raw) {
				Ok(info) => {
					if let Some(email) = info.email.filter(|email| !email.is_empty()) {
						event.properties.set("email", email);
					}
				}
				Err(err) => {
					warn!(cookie = CLIENT_INFO_COOKIE, error = %err, "ignoring malformed client information cookie");
				}
			}
		}
		event.properties.remove("email");
		event
	}

	/// Routes an event: live to the provider when it is ready and `cache`
	/// is false, otherwise onto the cached event queue.
	pub async fn track(&self, event: Event, cache: bool) {
		let event = self.process_event(event);

		if cache {
			debug!(name = %event.name, "event forced onto cache path");
			self.set(event);
			return;
		}

		match self.forward_live(&event).await {
			Ok(()) => {
				debug!(name = %event.name, "event forwarded to live provider");
			}
			Err(BufferError::ProviderUnavailable) => {
				debug!(name = %event.name, "provider not ready, caching event");
				self.set(event);
			}
			Err(err) => {
				warn!(name = %event.name, error = %err, "caching event after forward failure");
				self.set(event);
			}
		}
	}

	async fn forward_live(&self, event: &Event) -> trackbuf_core::Result<()> {
		if !self.provider.is_ready().await {
			return Err(BufferError::ProviderUnavailable);
		}
		self
			.provider
			.track_event(&event.name, &event.properties)
			.await;
		Ok(())
	}

	/// Appends an event to the cached event queue.
	pub fn set(&self, event: Event) {
		self.push(EVENTS_QUEUE, event);
	}

	/// Appends an event to the named cookie queue: reads the existing
	/// queue (absent or malformed counts as empty), appends, and writes
	/// the re-serialized queue back with `path=/` and the domain selected
	/// for the current hostname. Last write wins on the cookie value.
	pub fn push(&self, cookie_name: &str, event: Event) {
		let mut queue = self.parse_cookies(cookie_name).unwrap_or_default();
		queue.push(event);

		match serde_json::to_string(&queue) {
			Ok(encoded) => {
				let domain = self.config.domain_for(&self.page.hostname()).to_string();
				self
					.cookies
					.set(cookie_name, &encoded, &CookieAttributes::for_domain(domain));
				debug!(cookie = cookie_name, len = queue.len(), "event queue written");
			}
			Err(err) => {
				warn!(cookie = cookie_name, error = %err, "failed to encode event queue");
			}
		}
	}

	/// Reads and decodes the named cookie queue. Returns `None` when the
	/// cookie is absent or its value is malformed; never raises.
	pub fn parse_cookies(&self, cookie_name: &str) -> Option<Vec<Event>> {
		let raw = self.cookies.get(cookie_name)?;
		match decode_queue(&raw) {
			Ok(events) => Some(events),
			Err(err) => {
				warn!(cookie = cookie_name, error = %err, "discarding malformed event queue");
				None
			}
		}
	}

	/// Records an observed provider network response.
	pub async fn record_response(&self, response: TrackResponse) {
		self.responses.lock().await.push(response);
	}

	/// Returns true if any recorded response confirmed a page view.
	pub async fn is_page_view_sent(&self) -> bool {
		self
			.responses
			.lock()
			.await
			.iter()
			.any(TrackResponse::is_page_view)
	}

	/// Arms the page-unload fallback. Idempotent: repeated calls are
	/// no-ops.
	pub fn track_page_unload(&self) {
		if self.unload_armed.swap(true, Ordering::SeqCst) {
			return;
		}
		debug!("page unload fallback armed");
	}

	/// Invoked by the host on the page-unload signal. If armed and no
	/// page view was confirmed sent, queues a synthetic page-view event
	/// (current URL as name and as a `url` property). Fires at most once
	/// per page lifetime.
	pub async fn handle_page_unload(&self) {
		if !self.unload_armed.load(Ordering::SeqCst) {
			return;
		}
		if self.unload_fired.swap(true, Ordering::SeqCst) {
			return;
		}
		if self.is_page_view_sent().await {
			return;
		}

		let href = self.page.href();
		debug!(url = %href, "queueing synthetic page view on unload");
		let event = Event::new(&href).with_property("url", href.as_str());
		self.push(PAGE_VIEWS_QUEUE, event);
	}

	/// Arms the unload fallback and spawns the page view monitor, which
	/// polls provider readiness and emits the page view until the
	/// provider confirms it or the configured timeout elapses.
	pub fn page_view(self: Arc<Self>) -> Arc<PageViewMonitor> {
		self.track_page_unload();
		let monitor = Arc::new(PageViewMonitor::new(self));
		let task = Arc::clone(&monitor);
		tokio::spawn(async move { task.run().await });
		monitor
	}

	/// Routes each item's resolved event through [`track`](Self::track).
	/// Returns the buffer for chaining.
	pub async fn load_event(&self, items: Vec<QueueItem>) -> &Self {
		for item in items {
			let cache = item.cache;
			let event = item.resolve();
			self.track(event, cache).await;
		}
		self
	}

	/// Evaluates page-load rules against the current path (leading slash
	/// stripped) and routes matching events through
	/// [`load_event`](Self::load_event). Returns the buffer for chaining.
	pub async fn page_load_event(&self, rules: Vec<PageLoadRule>) -> &Self {
		let pathname = self.page.pathname();
		let path = pathname.strip_prefix('/').unwrap_or(&pathname);

		for rule in rules {
			if !rule.matches(path) {
				continue;
			}
			match rule.resolve() {
				Some(event) => {
					self.load_event(vec![QueueItem::new(event)]).await;
				}
				None => {
					warn!(path, "page load rule matched but carries no event");
				}
			}
		}
		self
	}
}

fn decode_queue(raw: &str) -> trackbuf_core::Result<Vec<Event>> {
	serde_json::from_str(raw).map_err(|err| BufferError::ParseFailure(err.to_string()))
}

/// Builder for constructing an [`EventBuffer`].
///
/// Collaborators default to an in-memory cookie store, a never-ready
/// no-op provider, and an empty page context, so tests and degraded
/// hosts can build a working buffer without wiring.
pub struct EventBufferBuilder {
	cookies: Arc<dyn CookieStore>,
	provider: Arc<dyn AnalyticsProvider>,
	page: Arc<dyn PageContext>,
	config: BufferConfig,
}

impl EventBufferBuilder {
	/// Creates a builder with default collaborators.
	pub fn new() -> Self {
		Self {
			cookies: Arc::new(MemoryCookieStore::new()),
			provider: Arc::new(NoopProvider),
			page: Arc::new(StaticPageContext::default()),
			config: BufferConfig::default(),
		}
	}

	/// Sets the cookie store.
	pub fn cookie_store(mut self, cookies: impl CookieStore + 'static) -> Self {
		self.cookies = Arc::new(cookies);
		self
	}

	/// Sets a shared cookie store.
	pub fn shared_cookie_store(mut self, cookies: Arc<dyn CookieStore>) -> Self {
		self.cookies = cookies;
		self
	}

	/// Sets the analytics provider.
	pub fn provider(mut self, provider: impl AnalyticsProvider + 'static) -> Self {
		self.provider = Arc::new(provider);
		self
	}

	/// Sets a shared analytics provider.
	pub fn shared_provider(mut self, provider: Arc<dyn AnalyticsProvider>) -> Self {
		self.provider = provider;
		self
	}

	/// Sets the page context.
	pub fn page_context(mut self, page: impl PageContext + 'static) -> Self {
		self.page = Arc::new(page);
		self
	}

	/// Sets the configuration.
	pub fn config(mut self, config: BufferConfig) -> Self {
		self.config = config;
		self
	}

	/// Builds the buffer.
	pub fn build(self) -> EventBuffer {
		EventBuffer {
			cookies: self.cookies,
			provider: self.provider,
			page: self.page,
			config: self.config,
			responses: Mutex::new(Vec::new()),
			unload_armed: AtomicBool::new(false),
			unload_fired: AtomicBool::new(false),
		}
	}
}

impl Default for EventBufferBuilder {
	fn default() -> Self {
		Self::new()
	}
}
