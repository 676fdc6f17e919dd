use std::time::Duration;

/// Work deferred until a host transition has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Create surfaces for slots that are still pending.
    InitSurfaces,
    /// Ask live surfaces to re-measure.
    MeasureSurfaces,
}

/// Fire-and-forget timer queue driven by a caller-supplied monotonic clock.
///
/// Tasks never report back. Each task must tolerate running after the thing it
/// targets is gone.
#[derive(Debug, Default)]
pub struct Deferrals {
    // (due, sequence, task), kept sorted by due then insertion.
    queue: Vec<(Duration, u64, DeferredTask)>,
    seq: u64,
}

impl Deferrals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Duration, delay: Duration, task: DeferredTask) {
        let due = now.saturating_add(delay);
        let seq = self.seq;
        self.seq += 1;
        let at = self.queue.partition_point(|(d, _, _)| *d <= due);
        self.queue.insert(at, (due, seq, task));
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<DeferredTask> {
        let split = self.queue.partition_point(|(d, _, _)| *d <= now);
        self.queue.drain(..split).map(|(_, _, task)| task).collect()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.first().map(|(due, _, _)| *due)
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
