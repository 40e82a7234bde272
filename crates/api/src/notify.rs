//! Change notifications.
//!
//! Every successful mutation publishes a [`DataChanged`] event. Server-Sent
//! Events clients and the reminder task subscribe; a subscriber that falls
//! behind loses old events and simply re-queries.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Coach,
    PrivateTrainingMember,
    AnnualCardMember,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataChanged {
    pub entity: EntityKind,
}

#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<DataChanged>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl ChangeNotifier {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes to every current subscriber. Having none is not an error.
    pub fn publish(&self, entity: EntityKind) {
        let receivers = self.tx.send(DataChanged { entity }).unwrap_or(0);
        tracing::debug!("Data changed: {:?} ({} subscriber(s))", entity, receivers);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.tx.subscribe()
    }
}
