//! Run-until-cancelled bookkeeping for the display-synced loop
//!
//! The browser hands out one request id per scheduled frame. We remember the
//! pending one so teardown can revoke it, and refuse to run frames that
//! arrive after cancellation.

#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<i32>,
    cancelled: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id of the frame just requested
    pub fn scheduled(&mut self, id: i32) {
        if !self.cancelled {
            self.pending = Some(id);
        }
    }

    /// Called at the top of each frame callback; false means stop
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if self.cancelled {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Stop the loop. Returns the request id to revoke, the first time only.
    pub fn cancel(&mut self) -> Option<i32> {
        self.cancelled = true;
        self.pending.take()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_cancelled() {
        let mut fl = FrameLoop::new();
        for id in 1..=3 {
            assert!(fl.begin_frame());
            fl.scheduled(id);
        }
        assert_eq!(fl.frames(), 3);
        assert_eq!(fl.cancel(), Some(3));
        assert!(fl.is_cancelled());
        assert!(!fl.begin_frame());
        assert_eq!(fl.frames(), 3);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut fl = FrameLoop::new();
        fl.scheduled(9);
        assert_eq!(fl.cancel(), Some(9));
        assert_eq!(fl.cancel(), None);
    }

    #[test]
    fn test_no_scheduling_after_cancel() {
        let mut fl = FrameLoop::new();
        fl.cancel();
        fl.scheduled(4);
        assert_eq!(fl.cancel(), None);
    }
}
