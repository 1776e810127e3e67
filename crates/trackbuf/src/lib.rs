// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side analytics event buffering SDK.
//!
//! This crate decides, per outgoing analytics event, whether the external
//! provider is ready to accept it live; if not, the event is appended to a
//! cookie-backed FIFO queue for later replay. It also guarantees
//! page-view-once-per-load semantics with a page-unload fallback.
//!
//! Analytics must never break the host application: every operation
//! degrades silently. Cookie parse failures fall open to an empty queue
//! and an absent or uninitialized provider falls closed to the caching
//! path.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trackbuf::{BufferConfig, Event, EventBuffer, MemoryCookieStore, StaticPageContext};
//!
//! let buffer = Arc::new(
//!     EventBuffer::builder()
//!         .cookie_store(MemoryCookieStore::new())
//!         .provider(my_provider)
//!         .page_context(StaticPageContext::new(
//!             "https://app.deriv.com/cashier",
//!             "app.deriv.com",
//!             "/cashier",
//!         ))
//!         .config(BufferConfig::from_env())
//!         .build(),
//! );
//!
//! // Forwards live when the provider is ready, caches otherwise.
//! buffer.track(Event::new("ce_cashier_deposit"), false).await;
//!
//! // Poll until the provider confirms a page view, bounded in time.
//! let monitor = Arc::clone(&buffer).page_view();
//! ```

mod buffer;
mod config;
mod cookie;
mod monitor;
mod page;
mod provider;

pub use buffer::{EventBuffer, EventBufferBuilder};
pub use config::{BufferConfig, DomainRule};
pub use cookie::{CookieAttributes, CookieStore, MemoryCookieStore};
pub use monitor::PageViewMonitor;
pub use page::{PageContext, StaticPageContext};
pub use provider::{AnalyticsProvider, NoopProvider};

// Re-export core types for convenience
pub use trackbuf_core::{
	BufferError, Event, EventFactory, PageLoadRule, Properties, QueueItem, ResponsePayload,
	Result, TrackResponse, CLIENT_INFO_COOKIE, EVENTS_QUEUE, PAGE_VIEWS_QUEUE,
};
