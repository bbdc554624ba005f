//! Reusable effect engines
//!
//! Effects of a recurring shape only supply parameters to one of these
//! instead of carrying a bespoke state machine.

mod envelope;
mod script;
mod shimmer;

use embassy_time::Duration;

pub use envelope::Envelope;
pub use script::{Script, ScriptSeg, ScriptStep, SEG_MAX};
pub use shimmer::{Shimmer, ShimmerSeg};

/// Zero delay
pub const ZERO: Duration = Duration::from_millis(0);

/// Subtract elapsed time from a delay, stopping at zero
#[inline]
pub fn elapse(delay: Duration, elapsed: Duration) -> Duration {
    delay.checked_sub(elapsed).unwrap_or(ZERO)
}

/// Random duration within `[min, max)`, or `min` if the range is empty.
/// Reversed bounds are swapped.
pub fn random_duration(rng: &mut fastrand::Rng, a: Duration, b: Duration) -> Duration {
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    let (min_ms, max_ms) = (min.as_millis(), max.as_millis());
    if min_ms >= max_ms {
        return min;
    }
    Duration::from_millis(rng.u64(min_ms..max_ms))
}

/// Random count within `[min, max)`, or `min` if the range is empty.
/// Reversed bounds are swapped.
pub fn random_count(rng: &mut fastrand::Rng, a: u8, b: u8) -> u8 {
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    if min == max {
        return min;
    }
    rng.u8(min..max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapse_stops_at_zero() {
        let delay = Duration::from_millis(10);
        assert_eq!(elapse(delay, Duration::from_millis(4)), Duration::from_millis(6));
        assert_eq!(elapse(delay, Duration::from_millis(40)), ZERO);
    }

    #[test]
    fn random_ranges() {
        let mut rng = fastrand::Rng::with_seed(1);
        let (a, b) = (Duration::from_millis(5), Duration::from_millis(9));
        for _ in 0..100 {
            let d = random_duration(&mut rng, b, a);
            assert!(d >= a && d < b);
        }
        assert_eq!(random_duration(&mut rng, a, a), a);
        assert_eq!(random_count(&mut rng, 3, 3), 3);
        assert!((2..7).contains(&random_count(&mut rng, 7, 2)));
    }
}
