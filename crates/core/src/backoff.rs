// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff with bounded jitter, shared by the supervisor and
//! the log forwarder's reconnect loop.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MIN: Duration = Duration::from_millis(100);
const DEFAULT_MAX: Duration = Duration::from_secs(30);
const DEFAULT_FACTOR: f64 = 2.0;
const DEFAULT_JITTER: f64 = 0.2;

/// Parameters for exponential backoff with jitter.
///
/// `Duration(attempt)` (1-based) is `clamp(min · factor^(attempt-1), min,
/// max)`, then perturbed by a uniform multiplier in `[-jitter, +jitter]`
/// and re-clamped to `[min, max]`. A zero-valued field falls back to its
/// default on first use via [`BackoffPolicy::with_defaults`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    pub min: Duration,
    pub max: Duration,
    pub factor: f64,
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            factor: DEFAULT_FACTOR,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl BackoffPolicy {
    /// Replace zero/out-of-range fields with their defaults.
    pub fn with_defaults(self) -> Self {
        Self {
            min: if self.min.is_zero() { DEFAULT_MIN } else { self.min },
            max: if self.max.is_zero() { DEFAULT_MAX } else { self.max },
            factor: if self.factor <= 0.0 { DEFAULT_FACTOR } else { self.factor },
            jitter: self.jitter.clamp(0.0, 1.0),
        }
    }

    /// The pre-jitter duration for 1-based `attempt`.
    fn base_duration(&self, attempt: u32) -> Duration {
        let this = self.with_defaults();
        let exp = this.min.as_secs_f64() * this.factor.powi(attempt.saturating_sub(1) as i32);
        Duration::from_secs_f64(exp).clamp(this.min, this.max)
    }

    /// The jittered duration for 1-based `attempt`, using `rng`.
    pub fn duration_with_rng(&self, attempt: u32, rng: &mut impl Rng) -> Duration {
        let this = self.with_defaults();
        let base = self.base_duration(attempt);
        if this.jitter == 0.0 {
            return base;
        }
        let factor = 1.0 + rng.random_range(-this.jitter..=this.jitter);
        let jittered = base.as_secs_f64() * factor;
        Duration::from_secs_f64(jittered.max(0.0)).clamp(this.min, this.max)
    }

    /// The jittered duration for 1-based `attempt`, using the thread RNG.
    pub fn duration(&self, attempt: u32) -> Duration {
        self.duration_with_rng(attempt, &mut rand::rng())
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
