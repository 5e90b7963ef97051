//! Change Log Adapters
//!
//! Implements the `ChangeSink` port.

use crate::events::ChangeRecord;
use crate::ports::ChangeSink;
use parking_lot::RwLock;
use tracing::trace;

/// In-memory, append-only change log.
///
/// Suitable for audit export and tests; a node would forward records to
/// the event bus instead.
#[derive(Default)]
pub struct InMemoryChangeLog {
    records: RwLock<Vec<ChangeRecord>>,
}

impl InMemoryChangeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in order.
    pub fn records(&self) -> Vec<ChangeRecord> {
        self.records.read().clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<ChangeRecord> {
        self.records.read().last().cloned()
    }

    /// Export the log as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.records.read())
    }
}

impl ChangeSink for InMemoryChangeLog {
    fn record(&self, record: ChangeRecord) {
        trace!("[qc-18] Change #{} recorded", record.sequence);
        self.records.write().push(record);
    }
}

/// Sink that discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpChangeSink;

impl ChangeSink for NoOpChangeSink {
    fn record(&self, _record: ChangeRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use crate::events::PermissioningEvent;

    fn record(sequence: u64) -> ChangeRecord {
        ChangeRecord {
            sequence,
            event: PermissioningEvent::AdminAdded {
                caller: Address::repeat_byte(1),
                admin: Address::repeat_byte(sequence as u8),
            },
        }
    }

    #[test]
    fn test_log_appends_in_order() {
        let log = InMemoryChangeLog::new();
        assert!(log.is_empty());

        log.record(record(1));
        log.record(record(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].sequence, 1);
        assert_eq!(log.last().unwrap().sequence, 2);
    }

    #[test]
    fn test_log_json_export() {
        let log = InMemoryChangeLog::new();
        log.record(record(1));

        let json = log.to_json().unwrap();
        let parsed: Vec<ChangeRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log.records());
        assert!(json.contains("admin_added"));
    }
}
