use rand::Rng;
use std::time::{Duration, Instant};

/// A motivational line shown under the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    Quote {
        text: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: "Winston Churchill",
    },
    Quote {
        text: "Don't watch the clock; do what it does. Keep going.",
        author: "Sam Levenson",
    },
    Quote {
        text: "The future belongs to those who believe in the beauty of their dreams.",
        author: "Eleanor Roosevelt",
    },
];

/// Default time between quote changes
pub const DEFAULT_ROTATION_SECS: u64 = 60;

/// Pick a uniformly random quote
pub fn random_quote<R: Rng>(rng: &mut R) -> &'static Quote {
    &QUOTES[rng.gen_range(0..QUOTES.len())]
}

/// Periodic quote selection.
///
/// The timer only exists while the widget is shown: [`QuoteRotator::show`]
/// arms it and [`QuoteRotator::hide`] drops it, so a hidden widget never
/// rotates.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    index: usize,
    interval: Duration,
    next_due: Option<Instant>,
}

impl QuoteRotator {
    pub fn new(interval: Duration) -> Self {
        Self {
            index: 0,
            interval,
            next_due: None,
        }
    }

    pub fn current(&self) -> &'static Quote {
        &QUOTES[self.index]
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm the timer if it is not already running
    pub fn show(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(self.due_after(now));
        }
    }

    /// Next due time, falling back to the default interval when `now +
    /// interval` is not representable
    fn due_after(&self, now: Instant) -> Instant {
        now.checked_add(self.interval)
            .unwrap_or_else(|| now + Duration::from_secs(DEFAULT_ROTATION_SECS))
    }

    /// Cancel the timer
    pub fn hide(&mut self) {
        self.next_due = None;
    }

    /// Advance the timer; returns true when a new quote was picked
    pub fn tick<R: Rng>(&mut self, now: Instant, rng: &mut R) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.index = rng.gen_range(0..QUOTES.len());
                self.next_due = Some(self.due_after(now));
                log::trace!("rotated quote to #{}", self.index);
                true
            }
            _ => false,
        }
    }
}

impl Default for QuoteRotator {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_ROTATION_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_starts_on_first_quote() {
        let rotator = QuoteRotator::default();
        assert_eq!(rotator.index(), 0);
        assert_eq!(rotator.current().author, "Steve Jobs");
        assert!(!rotator.is_running());
    }

    #[test]
    fn test_no_rotation_before_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rotator = QuoteRotator::new(Duration::from_secs(60));
        let start = Instant::now();
        rotator.show(start);

        assert!(!rotator.tick(start + Duration::from_secs(59), &mut rng));
        assert_eq!(rotator.index(), 0);
    }

    #[test]
    fn test_rotates_within_fixed_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut rotator = QuoteRotator::new(Duration::from_secs(60));
        let mut now = Instant::now();
        rotator.show(now);

        for _ in 0..20 {
            now += Duration::from_secs(60);
            assert!(rotator.tick(now, &mut rng));
            assert!(QUOTES.contains(rotator.current()));
        }
    }

    #[test]
    fn test_hidden_rotator_never_fires() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rotator = QuoteRotator::new(Duration::from_secs(60));
        let start = Instant::now();
        rotator.show(start);
        rotator.hide();

        assert!(!rotator.is_running());
        assert!(!rotator.tick(start + Duration::from_secs(3600), &mut rng));
    }

    #[test]
    fn test_show_does_not_reset_running_timer() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rotator = QuoteRotator::new(Duration::from_secs(60));
        let start = Instant::now();
        rotator.show(start);
        rotator.show(start + Duration::from_secs(30));

        assert!(rotator.tick(start + Duration::from_secs(60), &mut rng));
    }

    #[test]
    fn test_huge_interval_uses_default() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut rotator = QuoteRotator::new(Duration::MAX);
        let start = Instant::now();
        rotator.show(start);

        assert!(rotator.is_running());
        assert!(!rotator.tick(start + Duration::from_secs(59), &mut rng));
        assert!(rotator.tick(start + Duration::from_secs(60), &mut rng));
    }

    #[test]
    fn test_random_quote_is_member() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            assert!(QUOTES.contains(random_quote(&mut rng)));
        }
    }
}
