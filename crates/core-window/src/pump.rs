//! Single-slot coalescing frame pump.
//!
//! The engine runs on a cooperative tick (animation frame, timer, or an
//! explicit call in tests). Producers mark work; the pump merges everything
//! marked since the last drain into one pending set and hands it back once
//! per tick. A superseded pending unit is simply replaced; there is no
//! cancellation protocol, matching the rule "at most one evaluation per
//! scheduling opportunity, always reflecting the latest inputs".
//!
//! Merge semantics: work kinds are a set, not a queue. Scheduling `EVALUATE`
//! twice then `SYNC` once drains as a single `EVALUATE | SYNC`.

use tracing::trace;

bitflags::bitflags! {
    /// Deferred work classes the engine knows about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WorkKind: u8 {
        /// Re-evaluate the window request decision (scroll/resize/data).
        const EVALUATE = 0b0000_0001;
        /// Rebuild the render slice and re-sync selection/cursor overlays.
        const SYNC = 0b0000_0010;
    }
}

/// Counters for observing coalescing behavior in tests and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpMetricsSnapshot {
    /// Total schedule calls.
    pub scheduled: u64,
    /// Schedule calls that merged into already-pending work.
    pub coalesced: u64,
    /// Non-empty drains.
    pub drained: u64,
}

/// The single-slot debounced task queue.
#[derive(Debug)]
pub struct FramePump {
    pending: WorkKind,
    metrics: PumpMetricsSnapshot,
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePump {
    pub fn new() -> Self {
        Self {
            pending: WorkKind::empty(),
            metrics: PumpMetricsSnapshot::default(),
        }
    }

    /// Merge `kind` into the pending slot.
    pub fn schedule(&mut self, kind: WorkKind) {
        self.metrics.scheduled += 1;
        if self.pending.contains(kind) {
            self.metrics.coalesced += 1;
        }
        self.pending |= kind;
        trace!(target: "window.pump", pending = ?self.pending, "schedule");
    }

    /// Whether any work is pending.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drain exactly one merged unit of work. Empty when nothing was
    /// scheduled since the previous drain.
    pub fn drain(&mut self) -> WorkKind {
        let work = self.pending;
        self.pending = WorkKind::empty();
        if !work.is_empty() {
            self.metrics.drained += 1;
            trace!(target: "window.pump", ?work, "drain");
        }
        work
    }

    pub fn metrics(&self) -> PumpMetricsSnapshot {
        self.metrics
    }
}
