//! L4 Atomic Layer: interpolation and time-progress primitives
//!
//! `lerp` is applied once per frame to pull a "current" value towards its
//! "target", which gives an exponential ease-out without any physics state.

use std::time::Duration;

/// Linear interpolation between two values
///
/// # Arguments
/// * `start` - Value at `factor == 0`
/// * `end` - Value at `factor == 1`
/// * `factor` - Blend factor, normally in [0.0, 1.0]
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// Progress (0.0 to 1.0) of a transition that has been running for `elapsed`
///
/// A zero duration is always complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        for (a, b) in [(0.0, 100.0), (-42.5, 17.25), (3.0, 3.0), (1e6, -1e6)] {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
    }

    #[test]
    fn test_lerp_midpoint() {
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 1e-9);
        assert!((lerp(-10.0, 10.0, 0.25) + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_monotonic_in_factor() {
        for (a, b) in [(0.0, 100.0), (100.0, 0.0), (-5.0, 5.0)] {
            let mut prev = lerp(a, b, 0.0);
            for i in 1..=20 {
                let v = lerp(a, b, i as f64 / 20.0);
                if b >= a {
                    assert!(v >= prev, "not increasing at step {}", i);
                } else {
                    assert!(v <= prev, "not decreasing at step {}", i);
                }
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                assert!(v >= lo && v <= hi);
                prev = v;
            }
        }
    }

    #[test]
    fn test_repeated_lerp_approaches_without_overshoot() {
        let target = 300.0;
        let mut current = 0.0;
        let mut prev_gap = target - current;
        for _ in 0..200 {
            current = lerp(current, target, 0.06);
            let gap = target - current;
            assert!(current <= target);
            assert!(gap < prev_gap);
            prev_gap = gap;
        }
        assert!(prev_gap < 0.01);
    }

    #[test]
    fn test_progress() {
        let d = Duration::from_millis(1000);
        assert_eq!(progress(Duration::ZERO, d), 0.0);
        assert!((progress(Duration::from_millis(250), d) - 0.25).abs() < 1e-9);
        assert_eq!(progress(Duration::from_millis(5000), d), 1.0);
        assert_eq!(progress(Duration::from_millis(5), Duration::ZERO), 1.0);
    }
}
