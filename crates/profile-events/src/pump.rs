//! Channel-to-bus forwarding
//!
//! The host delivers broadcasts on its own notification thread; it pushes
//! them into a tokio channel and an [`EventPump`] republishes them on the bus.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::bus::EventBus;
use crate::event::TopologyEvent;

/// Counters reported when a pump stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub received: u64,
    pub delivered: u64,
    pub malformed: u64,
}

pub struct EventPump {
    bus: EventBus,
    stats: PumpStats,
}

impl EventPump {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            stats: PumpStats::default(),
        }
    }

    /// Forward typed events until the sender side closes
    pub async fn run(mut self, mut rx: mpsc::Receiver<TopologyEvent>) -> PumpStats {
        info!("Topology event pump started");
        while let Some(event) = rx.recv().await {
            self.forward(&event);
        }
        info!(
            received = self.stats.received,
            delivered = self.stats.delivered,
            "Topology event pump stopped"
        );
        self.stats
    }

    /// Forward raw JSON broadcasts, skipping any that fail to parse
    pub async fn run_raw(mut self, mut rx: mpsc::Receiver<String>) -> PumpStats {
        info!("Raw broadcast pump started");
        while let Some(text) = rx.recv().await {
            match TopologyEvent::parse(&text) {
                Ok(event) => self.forward(&event),
                Err(e) => {
                    warn!(error = %e, "Dropping malformed broadcast");
                    self.stats.malformed += 1;
                }
            }
        }
        info!(
            received = self.stats.received,
            delivered = self.stats.delivered,
            malformed = self.stats.malformed,
            "Raw broadcast pump stopped"
        );
        self.stats
    }

    fn forward(&mut self, event: &TopologyEvent) {
        self.stats.received += 1;
        let delivered = self.bus.publish(event);
        if delivered == 0 {
            debug!(session = event.session, "No handlers for topology event");
        }
        self.stats.delivered += delivered as u64;
    }
}
