// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded polling for provider readiness and page view confirmation.
//!
//! Provider readiness is not observable via a callback on the external
//! SDK surface, so the monitor polls: each tick it re-emits the page view
//! while the provider is ready, until a recorded response confirms the
//! page view, the configured timeout elapses, or the monitor is stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::buffer::EventBuffer;

/// A cancellable polling task driving the page view for one page load.
pub struct PageViewMonitor {
	buffer: Arc<EventBuffer>,
	stopped: AtomicBool,
	stop_notify: Notify,
}

impl PageViewMonitor {
	/// Creates a monitor over the given buffer.
	pub fn new(buffer: Arc<EventBuffer>) -> Self {
		Self {
			buffer,
			stopped: AtomicBool::new(false),
			stop_notify: Notify::new(),
		}
	}

	/// Requests the monitor to stop.
	pub fn stop(&self) {
		self.stopped.store(true, Ordering::SeqCst);
		self.stop_notify.notify_one();
	}

	/// Returns true once the monitor has stopped.
	pub fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::SeqCst)
	}

	/// Runs the polling loop to completion.
	pub async fn run(&self) {
		let interval = self.buffer.config().poll_interval;
		let deadline = Instant::now() + self.buffer.config().poll_timeout;

		info!(
			interval_ms = interval.as_millis() as u64,
			timeout_ms = self.buffer.config().poll_timeout.as_millis() as u64,
			"starting page view monitor"
		);

		loop {
			if self.stopped.load(Ordering::SeqCst) {
				break;
			}

			tokio::select! {
				_ = tokio::time::sleep(interval) => {
					if self.buffer.is_page_view_sent().await {
						debug!("page view confirmed by provider");
						break;
					}
					if Instant::now() >= deadline {
						warn!("page view monitor timed out before the provider confirmed a page view");
						break;
					}
					if self.buffer.is_ready().await {
						let href = self.buffer.page().href();
						debug!(url = %href, "provider ready, emitting page view");
						self.buffer.provider().page_view(&href).await;
					}
				}
				_ = self.stop_notify.notified() => {
					debug!("page view monitor stop requested");
					break;
				}
			}
		}

		self.stopped.store(true, Ordering::SeqCst);
		info!("page view monitor stopped");
	}
}
