use std::time::Duration;

/// Exponential backoff for transient queue-store failures.
///
/// The delay for failure `n` (1-indexed) is `first × factor^(n-1)`, clamped
/// to `max`. The base delay derives purely from the attempt number, so
/// delays never shrink across consecutive failures.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// Delay after the first failure.
    pub first: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
}

impl Default for Backoff {
    /// 100ms doubling up to 30s.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 2.0,
        }
    }
}

impl Backoff {
    /// Computes the delay after `attempt` consecutive failures.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return self.first.min(self.max);
        }
        let exp = (attempt - 1).min(i32::MAX as u32) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);
        let max_secs = self.max.as_secs_f64();
        if !secs.is_finite() || secs < 0.0 || secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}
