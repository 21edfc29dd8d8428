use crate::domain::model::SumEvent;
use crate::domain::ports::EventSink;
use std::sync::{Arc, Mutex};

/// Writes every event to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: SumEvent) {
        match event {
            SumEvent::SumCalled { rows } => tracing::info!("Sum called on {} rows", rows),
            SumEvent::Rejected => tracing::warn!("Rejected: cannot sum an empty matrix"),
            SumEvent::RowsSpawned { count } => tracing::debug!("Spawned {} row tasks", count),
            SumEvent::RowValueAdded { row, value } => tracing::debug!("Row {}: adding {}", row, value),
            SumEvent::RowCompleted { row, sum } => tracing::info!("Row {}: computed sum = {}", row, sum),
            SumEvent::Deferred => tracing::debug!("Aggregation deferred by one turn"),
            SumEvent::Joining => tracing::debug!("Joining row tasks"),
            SumEvent::TotalComputed { total } => tracing::info!("Total sum computed: {}", total),
        }
    }
}

/// Keeps events in memory in emission order. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SumEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SumEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: SumEvent) {
        TracingSink.emit(event.clone());
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
