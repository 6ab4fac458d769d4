//! Liveness heartbeat records. Unrelated to invoicing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// A recorded heartbeat from a named client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: RecordId,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            client_name,
            timestamp: now,
        }
    }
}
