//! # Order Tracking
//!
//! Polls the order API for the status of a placed order until it reaches a
//! terminal state.
//!
//! ## Tracker Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Tracker                                    │
//! │                                                                         │
//! │  OrderTracker::new() ──► (tracker, handle)                              │
//! │         │                     │                                         │
//! │  tokio::spawn(tracker.run())  │  handle.current() / handle.changed()   │
//! │         │                     │  handle.shutdown()                      │
//! │         ▼                     │                                         │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ loop select! {                               │                      │
//! │  │   interval.tick() ──► fetch_status(order_id) │                      │
//! │  │       ├── Err ──► warn!, keep polling        │                      │
//! │  │       ├── changed ──► publish on watch       │                      │
//! │  │       └── terminal ──► Finished(status)      │                      │
//! │  │   shutdown_rx.recv() ──► Shutdown            │                      │
//! │  │ }                                            │                      │
//! │  └──────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │  poll_limit reached ──► PollLimitReached { last }   (0 = no limit)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Leaving the tracking page drops the handle or calls `shutdown()`; either
//! way the loop stops at its next wake-up.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::checkout::OrderStatus;
use crate::error::TrackingError;
use crate::state::TrackingSettings;

/// Tokio intervals must be non-zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Where the tracker reads order status from.
pub trait OrderStatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<OrderStatus, TrackingError>> + Send;
}

/// Why the tracker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingOutcome {
    /// The order reached COMPLETED or CANCELLED.
    Finished(OrderStatus),

    /// The handle asked the tracker to stop, or every handle was dropped.
    Shutdown,

    /// Gave up after the configured number of polls.
    PollLimitReached { last: Option<OrderStatus> },
}

/// Polls one order's status.
pub struct OrderTracker<S> {
    source: Arc<S>,
    order_id: String,
    poll_interval: Duration,
    poll_limit: u32,
    status_tx: watch::Sender<Option<OrderStatus>>,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for observing and stopping an order tracker.
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    order_id: String,
    shutdown_tx: mpsc::Sender<()>,
    status_rx: watch::Receiver<Option<OrderStatus>>,
}

impl TrackerHandle {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Last status seen, `None` before the first successful poll.
    pub fn current(&self) -> Option<OrderStatus> {
        *self.status_rx.borrow()
    }

    /// Waits for the next status change.
    ///
    /// Returns `None` once the tracker has stopped.
    pub async fn changed(&mut self) -> Option<OrderStatus> {
        self.status_rx.changed().await.ok()?;
        *self.status_rx.borrow_and_update()
    }

    /// Stops the tracker. Returns `false` if it had already stopped.
    pub async fn shutdown(&self) -> bool {
        self.shutdown_tx.send(()).await.is_ok()
    }
}

impl<S: OrderStatusSource> OrderTracker<S> {
    /// Creates a tracker and its handle.
    pub fn new(
        source: Arc<S>,
        order_id: impl Into<String>,
        poll_interval: Duration,
        poll_limit: u32,
    ) -> (Self, TrackerHandle) {
        let order_id = order_id.into();
        let (status_tx, status_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let tracker = OrderTracker {
            source,
            order_id: order_id.clone(),
            poll_interval,
            poll_limit,
            status_tx,
            shutdown_rx,
        };

        let handle = TrackerHandle {
            order_id,
            shutdown_tx,
            status_rx,
        };

        (tracker, handle)
    }

    /// Creates a tracker using the configured interval and poll limit.
    pub fn from_settings(
        source: Arc<S>,
        order_id: impl Into<String>,
        settings: &TrackingSettings,
    ) -> (Self, TrackerHandle) {
        Self::new(source, order_id, settings.poll_interval(), settings.poll_limit)
    }

    /// Runs the polling loop.
    ///
    /// This should be spawned as a background task. The first poll happens
    /// immediately.
    pub async fn run(mut self) -> TrackingOutcome {
        info!(order_id = %self.order_id, "Order tracker starting");

        let mut interval = tokio::time::interval(self.poll_interval.max(MIN_POLL_INTERVAL));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut polls: u32 = 0;

        let outcome = loop {
            tokio::select! {
                _ = interval.tick() => {
                    polls = polls.saturating_add(1);

                    if let Some(status) = self.poll().await {
                        if status.is_terminal() {
                            break TrackingOutcome::Finished(status);
                        }
                    }

                    if self.poll_limit > 0 && polls >= self.poll_limit {
                        let last = *self.status_tx.borrow();
                        warn!(order_id = %self.order_id, polls, "Poll limit reached");
                        break TrackingOutcome::PollLimitReached { last };
                    }
                }

                _ = self.shutdown_rx.recv() => {
                    info!(order_id = %self.order_id, "Order tracker shutting down");
                    break TrackingOutcome::Shutdown;
                }
            }
        };

        info!(order_id = %self.order_id, ?outcome, "Order tracker stopped");
        outcome
    }

    /// Fetches the status once and publishes it if it changed.
    async fn poll(&mut self) -> Option<OrderStatus> {
        let status = match self.source.fetch_status(&self.order_id).await {
            Ok(status) => status,
            Err(e) => {
                warn!(order_id = %self.order_id, error = %e, "Failed to fetch order status");
                return None;
            }
        };

        let changed = self.status_tx.send_if_modified(|current| {
            if *current == Some(status) {
                false
            } else {
                *current = Some(status);
                true
            }
        });

        if changed {
            info!(order_id = %self.order_id, status = ?status, "Order status changed");
        } else {
            debug!(order_id = %self.order_id, status = ?status, "Order status unchanged");
        }

        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted answers, then repeats the last one.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<OrderStatus, TrackingError>>>,
        last: Mutex<Option<OrderStatus>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<OrderStatus, TrackingError>>) -> Arc<Self> {
            Arc::new(ScriptedSource {
                script: Mutex::new(script.into()),
                last: Mutex::new(None),
            })
        }
    }

    impl OrderStatusSource for ScriptedSource {
        async fn fetch_status(&self, order_id: &str) -> Result<OrderStatus, TrackingError> {
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Ok(status)) => {
                    *self.last.lock().unwrap() = Some(status);
                    Ok(status)
                }
                Some(Err(e)) => Err(e),
                None => self
                    .last
                    .lock()
                    .unwrap()
                    .ok_or_else(|| TrackingError::OrderNotFound(order_id.to_string())),
            }
        }
    }

    const TICK: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn test_tracker_finishes_on_completed() {
        let source = ScriptedSource::new(vec![
            Ok(OrderStatus::Received),
            Ok(OrderStatus::Preparing),
            Ok(OrderStatus::OutForDelivery),
            Ok(OrderStatus::Completed),
        ]);
        let (tracker, handle) = OrderTracker::new(source, "order-1", TICK, 0);

        let outcome = tracker.run().await;

        assert_eq!(outcome, TrackingOutcome::Finished(OrderStatus::Completed));
        assert_eq!(handle.current(), Some(OrderStatus::Completed));
    }

    #[tokio::test]
    async fn test_tracker_survives_fetch_errors() {
        let source = ScriptedSource::new(vec![
            Err(TrackingError::Unavailable("timeout".to_string())),
            Ok(OrderStatus::Preparing),
            Err(TrackingError::Unavailable("502".to_string())),
            Ok(OrderStatus::Cancelled),
        ]);
        let (tracker, handle) = OrderTracker::new(source, "order-2", TICK, 0);

        let outcome = tracker.run().await;

        assert_eq!(outcome, TrackingOutcome::Finished(OrderStatus::Cancelled));
        assert_eq!(handle.current(), Some(OrderStatus::Cancelled));
    }

    #[tokio::test]
    async fn test_tracker_poll_limit() {
        let source = ScriptedSource::new(vec![Ok(OrderStatus::Preparing)]);
        let (tracker, _handle) = OrderTracker::new(source, "order-3", TICK, 3);

        let outcome = tracker.run().await;

        assert_eq!(
            outcome,
            TrackingOutcome::PollLimitReached {
                last: Some(OrderStatus::Preparing)
            }
        );
    }

    #[tokio::test]
    async fn test_tracker_shutdown() {
        let source = ScriptedSource::new(vec![Ok(OrderStatus::Received)]);
        let (tracker, handle) =
            OrderTracker::new(source, "order-4", Duration::from_secs(3600), 0);

        let task = tokio::spawn(tracker.run());
        assert!(handle.shutdown().await);

        assert_eq!(task.await.unwrap(), TrackingOutcome::Shutdown);
        assert!(!handle.shutdown().await);
    }

    #[tokio::test]
    async fn test_handle_sees_changes() {
        let source = ScriptedSource::new(vec![
            Ok(OrderStatus::Received),
            Ok(OrderStatus::Received),
            Ok(OrderStatus::Preparing),
            Ok(OrderStatus::Completed),
        ]);
        let (tracker, mut handle) = OrderTracker::new(source, "order-5", TICK, 0);
        assert_eq!(handle.current(), None);

        let task = tokio::spawn(tracker.run());

        let mut seen = Vec::new();
        while let Some(status) = handle.changed().await {
            seen.push(status);
        }

        assert_eq!(task.await.unwrap(), TrackingOutcome::Finished(OrderStatus::Completed));
        assert_eq!(seen.last(), Some(&OrderStatus::Completed));
        assert!(!seen.is_empty());
    }
}
