use std::time::{Duration, Instant};

/// Trailing-edge debouncer: of a burst of values pushed less than
/// `delay` apart, only the last one comes out, `delay` after it arrived.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces whatever is pending and restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if now >= deadline => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn burst_yields_last_value_once() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.push((800, 600), t0);
        d.push((1024, 768), t0 + ms(30));

        assert_eq!(d.poll(t0 + ms(100)), None);
        assert_eq!(d.deadline(), Some(t0 + ms(130)));
        assert_eq!(d.poll(t0 + ms(130)), Some((1024, 768)));
        assert_eq!(d.poll(t0 + ms(500)), None);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn spaced_events_each_fire() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.push(1, t0);
        assert_eq!(d.poll(t0 + ms(100)), Some(1));

        d.push(2, t0 + ms(200));
        assert_eq!(d.poll(t0 + ms(299)), None);
        assert_eq!(d.poll(t0 + ms(300)), Some(2));
    }

    #[test]
    fn reset_drops_pending() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.push(1, t0);
        d.reset();

        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(t0 + ms(1000)), None);
    }
}
