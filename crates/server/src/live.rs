// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live court updates for venue displays.
//!
//! Events are notifications only. Displays read authoritative numbers and
//! queue state over HTTP; no commands are accepted over the socket.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Events buffered per subscriber before the oldest are dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// A change on a court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Match numbers were generated for a court.
    NumbersGenerated {
        /// The court.
        court_id: i64,
        /// Overall range, `first-last`.
        range: String,
        /// Matches numbered.
        total_matches: u32,
        /// The day tag.
        day: u32,
    },
    /// A court's match numbers were cleared.
    NumbersReset {
        /// The court.
        court_id: i64,
        /// Whether the queue was zeroed as well.
        queue_zeroed: bool,
    },
    /// A court's queue moved.
    QueueStateChanged {
        /// The court.
        court_id: i64,
        /// Currently fighting.
        bertanding: u32,
        /// Preparing.
        persiapan: u32,
        /// Warming up.
        pemanasan: u32,
    },
    /// Sent once when a display connects.
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Fans events out to every connected display.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades the connection and streams live events to it.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Display connected to live stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Display fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from display, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Display sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!("Display disconnected from live stream");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        broadcaster.broadcast(&LiveEvent::NumbersReset {
            court_id: 1,
            queue_zeroed: true,
        });
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_every_display_receives_event() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::QueueStateChanged {
            court_id: 4,
            bertanding: 7,
            persiapan: 8,
            pemanasan: 9,
        });

        for rx in [&mut rx1, &mut rx2] {
            assert!(matches!(
                rx.try_recv(),
                Ok(LiveEvent::QueueStateChanged { bertanding: 7, .. })
            ));
        }
    }

    #[test]
    fn test_event_wire_format() {
        let event = LiveEvent::NumbersGenerated {
            court_id: 2,
            range: String::from("1-12"),
            total_matches: 12,
            day: 2,
        };

        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "numbers_generated");
        assert_eq!(json["range"], "1-12");
        assert_eq!(serde_json::from_value::<LiveEvent>(json).unwrap(), event);
    }
}
