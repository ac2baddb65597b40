/// Bounded in-memory store for the live room sensor history
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::Arc;
use time::OffsetDateTime;

use crate::models::Reading;

/// Immutable view of the history at the time it was taken
pub type Snapshot = Arc<[Reading]>;

/// Owns the reading history. It is the only writer; everything else works on
/// snapshots.
#[derive(Debug)]
pub struct ReadingStore {
    history: VecDeque<Reading>,
    capacity: usize,
    connected: bool,
    last_update: Option<OffsetDateTime>,
    revision: u64,
}

impl ReadingStore {
    pub fn new(capacity: usize) -> Self {
        ReadingStore {
            history: VecDeque::new(),
            capacity,
            connected: false,
            last_update: None,
            revision: 0,
        }
    }

    /// Append a reading stamped with the current time
    pub fn append(&mut self, reading: Reading) {
        self.append_at(reading, OffsetDateTime::now_utc());
    }

    /// Append a reading, evicting the oldest entries past capacity.
    ///
    /// No validation happens here; invalid readings are kept and filtered
    /// downstream.
    pub fn append_at(&mut self, reading: Reading, received_at: OffsetDateTime) {
        self.history.push_back(reading);

        let mut evicted = 0;
        while self.history.len() > self.capacity {
            self.history.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            debug!("Evicted {} reading(s), history at capacity {}", evicted, self.capacity);
        }

        self.connected = true;
        self.last_update = Some(received_at);
        self.revision += 1;
    }

    /// The source reported no data. Existing history stays visible.
    pub fn mark_disconnected(&mut self) {
        if self.connected {
            warn!("Reading source disconnected, keeping {} stale reading(s)", self.history.len());
        }
        self.connected = false;
    }

    /// Most recently appended reading
    pub fn current(&self) -> Option<&Reading> {
        self.history.back()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.history.iter().cloned().collect()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn last_update(&self) -> Option<OffsetDateTime> {
        self.last_update
    }

    /// Incremented on every append; views computed at an older revision are stale
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
