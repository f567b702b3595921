use std::time::Duration;

/// Identifies one armed timer. Handles are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// One-shot timer source a carousel arms and cancels.
///
/// Each carousel owns its scheduler, so handles from different instances
/// never interact.
pub trait Scheduler {
    fn arm(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
    /// Move the clock forward and return the timers that fired, oldest first.
    fn elapse(&mut self, elapsed: Duration) -> Vec<TimerHandle>;
    fn pending(&self) -> usize;
}

#[derive(Debug)]
struct PendingTimer {
    handle: TimerHandle,
    remaining: Duration,
}

/// Timers counted down by frame deltas.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    timers: Vec<PendingTimer>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.timers.iter().find(|t| t.handle == handle).map(|t| t.remaining)
    }
}

impl Scheduler for FrameScheduler {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(PendingTimer { handle, remaining: delay });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    fn elapse(&mut self, elapsed: Duration) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        self.timers.retain_mut(|t| {
            t.remaining = t.remaining.saturating_sub(elapsed);
            if t.remaining.is_zero() {
                fired.push(t.handle);
                false
            } else {
                true
            }
        });
        fired
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
