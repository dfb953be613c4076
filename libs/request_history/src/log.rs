use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use parking_lot::RwLock;

use crate::models::{HistoryRecord, Route};

/// Largest number of records a single read may ask for.
pub const MAX_RECENT: usize = 20;

/// Number of records kept before the oldest ones are evicted.
pub const DEFAULT_RETENTION: usize = 1000;

/// Shared, time-ordered log of served requests.
///
/// Cloning yields another handle to the same log. Appends and clears take
/// the write lock, reads take the read lock, so a reader never observes a
/// half-applied append or clear.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    inner: Arc<RwLock<VecDeque<HistoryRecord>>>,
    retention: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Retention never drops below [`MAX_RECENT`] so that every valid read
    /// can be served in full.
    pub fn with_retention(retention: usize) -> Self {
        let retention = retention.max(MAX_RECENT);
        HistoryLog {
            inner: Arc::new(RwLock::new(VecDeque::with_capacity(
                retention.min(DEFAULT_RETENTION),
            ))),
            retention,
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Append a record stamped with the local wall clock.
    pub fn record(&self, method: &str, route: Route) {
        self.record_at(method, route, Local::now().naive_local());
    }

    pub fn record_at(&self, method: &str, route: Route, at: NaiveDateTime) {
        let record = HistoryRecord::new(method, route, at);
        let mut log = self.inner.write();
        self.push(&mut log, record);
    }

    /// The last `count` records, most recent first.
    pub fn recent(&self, count: usize) -> Vec<HistoryRecord> {
        let log = self.inner.read();
        Self::newest(&log, count)
    }

    /// Append a record and read the last `count` records under one lock, so
    /// the returned slice always includes the record just appended.
    pub fn record_then_recent(
        &self,
        method: &str,
        route: Route,
        at: NaiveDateTime,
        count: usize,
    ) -> Vec<HistoryRecord> {
        let record = HistoryRecord::new(method, route, at);
        let mut log = self.inner.write();
        self.push(&mut log, record);
        Self::newest(&log, count)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Length of the log, or `None` if the read lock is not immediately
    /// available. Never blocks.
    pub fn probe(&self) -> Option<usize> {
        self.inner.try_read().map(|log| log.len())
    }

    fn push(&self, log: &mut VecDeque<HistoryRecord>, record: HistoryRecord) {
        while log.len() >= self.retention {
            log.pop_front();
        }
        log.push_back(record);
    }

    fn newest(log: &VecDeque<HistoryRecord>, count: usize) -> Vec<HistoryRecord> {
        log.iter().rev().take(count).cloned().collect()
    }
}
