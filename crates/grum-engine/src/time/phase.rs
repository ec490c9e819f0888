use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Periodic animation clock.
///
/// Produces a phase in `[0, 1)` that wraps on a fixed period, and a rocking
/// angle `amplitude · sin(2π · phase)` in degrees.
///
/// The phase is computed by integer modulo on elapsed nanoseconds. Wrapping
/// on raw ticks keeps the phase deterministic over long uptimes; a floating
/// point accumulator would drift.
#[derive(Debug, Clone)]
pub struct PhaseClock {
    epoch: Instant,
    period: Duration,
    amplitude_deg: f32,
}

impl PhaseClock {
    /// Creates a clock with the given period and rocking amplitude (degrees).
    ///
    /// `period` must be non-zero.
    pub fn new(period: Duration, amplitude_deg: f32) -> Self {
        debug_assert!(!period.is_zero());
        Self {
            epoch: Instant::now(),
            period,
            amplitude_deg,
        }
    }

    /// Current position within the cycle, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        phase_at(self.epoch.elapsed().as_nanos(), self.period.as_nanos())
    }

    /// Current rocking angle in degrees, in `[-amplitude, amplitude]`.
    pub fn angle(&self) -> f32 {
        angle_at(
            self.epoch.elapsed().as_nanos(),
            self.period.as_nanos(),
            self.amplitude_deg,
        )
    }
}

fn phase_at(elapsed_nanos: u128, period_nanos: u128) -> f64 {
    if period_nanos == 0 {
        return 0.0;
    }
    (elapsed_nanos % period_nanos) as f64 / period_nanos as f64
}

fn angle_at(elapsed_nanos: u128, period_nanos: u128, amplitude_deg: f32) -> f32 {
    ((phase_at(elapsed_nanos, period_nanos) * TAU).sin() * amplitude_deg as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: u128 = 2_000_000_000; // 2s in nanos

    #[test]
    fn phase_wraps_exactly_on_the_period() {
        for k in [1u128, 2, 1_000, 1_000_000_000] {
            assert_eq!(phase_at(k * PERIOD, PERIOD), 0.0);
        }
    }

    #[test]
    fn phase_is_periodic_under_tick_modulo() {
        let t = 123_456_789u128;
        assert_eq!(phase_at(t, PERIOD), phase_at(t + PERIOD, PERIOD));
        assert_eq!(phase_at(t, PERIOD), phase_at(t + 500 * PERIOD, PERIOD));
    }

    #[test]
    fn angle_zero_at_whole_periods() {
        // sin(2π) == 0 up to floating point noise.
        assert!(angle_at(PERIOD, PERIOD, 10.0).abs() < 1e-4);
        assert!(angle_at(7 * PERIOD, PERIOD, 10.0).abs() < 1e-4);
    }

    #[test]
    fn angle_stays_within_amplitude() {
        for i in 0..1000u128 {
            let a = angle_at(i * PERIOD / 997, PERIOD, 10.0);
            assert!(a >= -10.0 && a <= 10.0, "angle {a} out of range");
        }
    }

    #[test]
    fn angle_peaks_at_quarter_period() {
        let a = angle_at(PERIOD / 4, PERIOD, 10.0);
        assert!((a - 10.0).abs() < 1e-3);
    }

    #[test]
    fn clock_angle_is_bounded() {
        let clock = PhaseClock::new(Duration::from_secs(2), 10.0);
        let a = clock.angle();
        assert!(a.abs() <= 10.0);
    }

    #[test]
    fn clock_phase_stays_in_the_unit_interval() {
        let clock = PhaseClock::new(Duration::from_secs(2), 10.0);
        let p = clock.phase();
        assert!((0.0..1.0).contains(&p), "phase {p} out of range");
    }
}
