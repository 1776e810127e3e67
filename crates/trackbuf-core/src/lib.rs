// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the trackbuf analytics buffering SDK.
//!
//! This crate provides the passive data shapes shared by the SDK client
//! (`trackbuf`) and host applications: named events with flat string
//! properties, lazily-resolved queue items, page-load dispatch rules, and
//! the observed shape of provider network responses.
//!
//! # Example
//!
//! ```
//! use trackbuf_core::{Event, PageLoadRule};
//!
//! let event = Event::new("ce_cashier_deposit")
//!     .with_property("method", "crypto");
//!
//! let rule = PageLoadRule::for_pages(["cashier"], event);
//! assert!(rule.matches("cashier"));
//! assert!(!rule.matches("reports"));
//! ```

pub mod error;
pub mod event;
pub mod response;
pub mod rules;

pub use error::{BufferError, Result};
pub use event::{
	Event, EventFactory, Properties, QueueItem, CLIENT_INFO_COOKIE, EVENTS_QUEUE, PAGE_VIEWS_QUEUE,
};
pub use response::{ResponsePayload, TrackResponse};
pub use rules::PageLoadRule;
