//! # Domain Events
//!
//! The engine announces what happened to orders and trackers through a [`NotificationSink`].
//! Emitting is fire-and-forget: a sink must not block and cannot fail the operation that
//! produced the event. Delivery to customers is someone else's job.

use crate::model::{OrderId, TrackerId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackingEvent {
    OrderConfirmed {
        order_id: OrderId,
        order_number: String,
        user_id: UserId,
        estimated_completion_at: Option<DateTime<Utc>>,
    },
    ItemReady {
        order_id: OrderId,
        tracker_id: TrackerId,
        item_name: String,
    },
    ItemCollected {
        order_id: OrderId,
        tracker_id: TrackerId,
        item_name: String,
    },
}

impl TrackingEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            TrackingEvent::OrderConfirmed { order_id, .. }
            | TrackingEvent::ItemReady { order_id, .. }
            | TrackingEvent::ItemCollected { order_id, .. } => *order_id,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn emit(&self, event: TrackingEvent);
}

/// Forwards events to an unbounded channel; the receiver belongs to the delivery layer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<TrackingEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TrackingEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationSink for ChannelSink {
    fn emit(&self, event: TrackingEvent) {
        if let Err(mpsc::error::SendError(event)) = self.sender.send(event) {
            debug!(order_id = %event.order_id(), "No event listener, dropping event");
        }
    }
}

/// Writes each event to the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn emit(&self, event: TrackingEvent) {
        match &event {
            TrackingEvent::OrderConfirmed {
                order_id,
                order_number,
                estimated_completion_at,
                ..
            } => info!(%order_id, %order_number, ?estimated_completion_at, "Order confirmed"),
            TrackingEvent::ItemReady {
                order_id,
                tracker_id,
                item_name,
            } => info!(%order_id, %tracker_id, %item_name, "Item ready"),
            TrackingEvent::ItemCollected {
                order_id,
                tracker_id,
                item_name,
            } => info!(%order_id, %tracker_id, %item_name, "Item collected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_delivers_in_order() {
        let (sink, mut events) = ChannelSink::new();
        sink.emit(TrackingEvent::ItemReady {
            order_id: OrderId(1),
            tracker_id: TrackerId(3),
            item_name: "Laksa".into(),
        });
        sink.emit(TrackingEvent::ItemCollected {
            order_id: OrderId(1),
            tracker_id: TrackerId(3),
            item_name: "Laksa".into(),
        });

        assert!(matches!(events.try_recv(), Ok(TrackingEvent::ItemReady { .. })));
        assert!(matches!(events.try_recv(), Ok(TrackingEvent::ItemCollected { .. })));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_emit_without_listener_is_silent() {
        let (sink, events) = ChannelSink::new();
        drop(events);
        sink.emit(TrackingEvent::ItemReady {
            order_id: OrderId(2),
            tracker_id: TrackerId(1),
            item_name: "Satay".into(),
        });
    }
}
