//! Frame scheduling.
//!
//! The field never drives itself: after drawing a frame it asks a
//! [`FrameScheduler`] for the next one and is handed back a token. The
//! host later delivers that token to
//! [`ParticleField::on_frame`](crate::field::ParticleField::on_frame).
//! A token that was cancelled, or that the field no longer waits on,
//! draws nothing.

pub mod debounce;

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

pub trait FrameScheduler {
    fn schedule_next_frame(&mut self) -> FrameToken;

    fn cancel(&mut self, token: FrameToken);
}

#[derive(Debug, Default)]
struct ManualQueue {
    next_id: u64,
    pending: VecDeque<FrameToken>,
    cancelled: usize,
}

/// A scheduler whose frames fire only when asked to.
///
/// Clones share the same queue, so a test can keep a handle while the
/// field owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending frame.
    pub fn next_frame(&self) -> Option<FrameToken> {
        self.queue.borrow_mut().pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    pub fn cancelled(&self) -> usize {
        self.queue.borrow().cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_frame(&mut self) -> FrameToken {
        let mut queue = self.queue.borrow_mut();

        let token = FrameToken(queue.next_id);
        queue.next_id += 1;
        queue.pending.push_back(token);

        token
    }

    fn cancel(&mut self, token: FrameToken) {
        let mut queue = self.queue.borrow_mut();

        let before = queue.pending.len();
        queue.pending.retain(|&t| t != token);
        queue.cancelled += before - queue.pending.len();
    }
}

/// Paces frames at a fixed refresh interval.
///
/// At most one frame is pending at a time. It becomes due one interval
/// after the previous frame was taken, or after the first frame was
/// scheduled, since the field draws its first frame itself on mount.
/// The event loop sleeps until
/// [`deadline`](Self::deadline) and then collects it with
/// [`take_due`](Self::take_due).
#[derive(Debug)]
pub struct PacedScheduler {
    interval: Duration,
    last_frame: Option<Instant>,
    next_id: u64,
    pending: Option<FrameToken>,
}

impl PacedScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: None,
            next_id: 0,
            pending: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// When the pending frame becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending?;

        self.last_frame.map(|last| last + self.interval)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<FrameToken> {
        let deadline = self.deadline()?;

        if now < deadline {
            return None;
        }

        self.last_frame = Some(now);
        self.pending.take()
    }
}

impl FrameScheduler for PacedScheduler {
    fn schedule_next_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.pending = Some(token);
        self.last_frame.get_or_insert_with(Instant::now);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_tokens_are_unique_and_fifo() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_next_frame();
        let b = sched.schedule_next_frame();

        assert_ne!(a, b);
        assert_eq!(sched.next_frame(), Some(a));
        assert_eq!(sched.next_frame(), Some(b));
        assert_eq!(sched.next_frame(), None);
    }

    #[test]
    fn manual_cancel_removes_pending() {
        let mut sched = ManualScheduler::new();
        let handle = sched.clone();

        let a = sched.schedule_next_frame();
        sched.cancel(a);
        sched.cancel(a);

        assert_eq!(handle.pending(), 0);
        assert_eq!(handle.cancelled(), 1);
    }

    #[test]
    fn paced_frame_waits_one_interval() {
        let itvl = Duration::from_secs(1);
        let mut sched = PacedScheduler::new(itvl);

        assert_eq!(sched.deadline(), None);

        let first = sched.schedule_next_frame();
        let t1 = sched.deadline().unwrap();
        assert_eq!(sched.take_due(t1 - Duration::from_millis(5)), None);
        assert_eq!(sched.take_due(t1), Some(first));
        assert_eq!(sched.take_due(t1 + itvl), None);

        let second = sched.schedule_next_frame();
        assert_eq!(sched.deadline(), Some(t1 + itvl));
        assert_eq!(sched.take_due(t1 + Duration::from_millis(5)), None);
        assert_eq!(sched.take_due(t1 + itvl), Some(second));
    }

    #[test]
    fn paced_first_frame_waits_after_scheduling() {
        let itvl = Duration::from_secs(1);
        let t0 = Instant::now();
        let mut sched = PacedScheduler::new(itvl);

        sched.schedule_next_frame();

        assert!(sched.deadline().unwrap() >= t0 + itvl);
        assert_eq!(sched.take_due(t0), None);
    }

    #[test]
    fn paced_cancel_clears_deadline() {
        let mut sched = PacedScheduler::new(Duration::from_millis(16));
        let token = sched.schedule_next_frame();
        sched.cancel(token);

        assert_eq!(sched.deadline(), None);
        assert_eq!(sched.take_due(Instant::now() + Duration::from_secs(1)), None);
    }

    #[test]
    fn paced_cancel_ignores_stale_token() {
        let mut sched = PacedScheduler::new(Duration::from_millis(16));
        let stale = sched.schedule_next_frame();
        let fresh = sched.schedule_next_frame();
        sched.cancel(stale);

        assert!(sched.deadline().is_some());
        assert_eq!(
            sched.take_due(Instant::now() + Duration::from_secs(1)),
            Some(fresh)
        );
    }
}
